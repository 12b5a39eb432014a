//! Syntax tree for Mermaid `sequenceDiagram` definitions.

/// A parsed sequence diagram: declared (or implied) participants in order of
/// first appearance, followed by the top-level events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceDiagram {
    pub participants: Vec<Participant>,
    pub events: Vec<Event>,
}

impl SequenceDiagram {
    /// Index of a participant by id.
    #[must_use]
    pub fn participant_index(&self, id: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    /// Number of messages, including those nested inside blocks.
    #[must_use]
    pub fn message_count(&self) -> usize {
        count_messages(&self.events)
    }
}

fn count_messages(events: &[Event]) -> usize {
    events
        .iter()
        .map(|event| match event {
            Event::Message(_) => 1,
            Event::Block(block) => block.sections.iter().map(|s| count_messages(&s.events)).sum(),
            Event::Note(_) | Event::Activate(_) | Event::Deactivate(_) => 0,
        })
        .sum()
}

/// A lifeline owner. `label` is the display text (`participant A as Label`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Message(Message),
    Note(Note),
    Block(Block),
    Activate(String),
    Deactivate(String),
}

/// A signal between two participants. `text` keeps raw markup such as
/// `<br/>`; line splitting happens at layout time.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub text: String,
    pub arrow: ArrowStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowStyle {
    /// `->>`
    Solid,
    /// `->`
    SolidOpen,
    /// `-->>`
    Dashed,
    /// `-->`
    DashedOpen,
    /// `-x`
    SolidCross,
    /// `--x`
    DashedCross,
}

impl ArrowStyle {
    #[must_use]
    pub const fn is_dashed(self) -> bool {
        matches!(self, Self::Dashed | Self::DashedOpen | Self::DashedCross)
    }

    #[must_use]
    pub const fn head(self) -> ArrowHead {
        match self {
            Self::Solid | Self::Dashed => ArrowHead::Filled,
            Self::SolidCross | Self::DashedCross => ArrowHead::Cross,
            Self::SolidOpen | Self::DashedOpen => ArrowHead::None,
        }
    }
}

/// Marker drawn at the receiving end of a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHead {
    Filled,
    Cross,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub over: Vec<String>,
    pub text: String,
    pub position: NotePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePosition {
    Over,
    LeftOf,
    RightOf,
}

/// A control flow block (loop, alt, opt, par, critical, break).
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub label: String,
    pub sections: Vec<BlockSection>,
}

/// A section within a block, separated by `else`, `and` or `option`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSection {
    pub label: Option<String>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Loop,
    Alt,
    Opt,
    Par,
    Critical,
    Break,
}

impl BlockKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Alt => "alt",
            Self::Opt => "opt",
            Self::Par => "par",
            Self::Critical => "critical",
            Self::Break => "break",
        }
    }

    /// Keyword that opens a further section inside this block, if any.
    #[must_use]
    pub const fn section_keyword(self) -> Option<&'static str> {
        match self {
            Self::Alt => Some("else"),
            Self::Par => Some("and"),
            Self::Critical => Some("option"),
            Self::Loop | Self::Opt | Self::Break => None,
        }
    }
}
