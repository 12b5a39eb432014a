//! Recursive descent parser for Mermaid sequence diagram syntax.
//!
//! Statements are line-oriented. Blank lines and `%%` comments are dropped
//! before parsing; every other line must be a recognized statement or the
//! whole definition is rejected, matching how the browser renderer refuses
//! malformed input instead of drawing a partial diagram.

use super::ast::{
    ArrowStyle, Block, BlockKind, BlockSection, Event, Message, Note, NotePosition, Participant, SequenceDiagram,
};

pub const HEADER: &str = "sequenceDiagram";

/// Deepest allowed nesting of `loop`/`alt`/`opt`/... blocks.
pub const MAX_BLOCK_DEPTH: usize = 64;

/// Reasons a definition is rejected. Line numbers are 1-based and refer to
/// the original input, comments and blank lines included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: invalid note syntax: {text}")]
    InvalidNote { line: usize, text: String },

    #[error("line {line}: note missing colon: {text}")]
    NoteMissingColon { line: usize, text: String },

    #[error("line {line}: `{keyword}` block is missing `end`")]
    UnterminatedBlock { line: usize, keyword: &'static str },

    #[error("line {line}: `end` without an open block")]
    UnexpectedEnd { line: usize },

    #[error("line {line}: blocks nested deeper than {max}")]
    NestingTooDeep { line: usize, max: usize },

    #[error("line {line}: unrecognized statement: {text}")]
    Unrecognized { line: usize, text: String },
}

type Line<'a> = (usize, &'a str);

/// Participants in order of first appearance.
#[derive(Default)]
struct Registry {
    participants: Vec<Participant>,
}

impl Registry {
    /// Register a declaration like `Alice` or `A as Alice the Great`.
    fn declare(&mut self, rest: &str) {
        let (id, label) = if let Some((name, alias)) = rest.split_once(" as ") {
            (name.trim(), alias.trim())
        } else {
            (rest.trim(), rest.trim())
        };
        if !id.is_empty() && !self.contains(id) {
            self.participants.push(Participant { id: id.to_owned(), label: label.to_owned() });
        }
    }

    /// Implicitly create a participant the first time it is referenced.
    fn ensure(&mut self, id: &str) {
        if !self.contains(id) {
            self.participants.push(Participant { id: id.to_owned(), label: id.to_owned() });
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }
}

/// Parse Mermaid sequence diagram text into an AST.
///
/// Accepts text with or without the `sequenceDiagram` header line; use
/// [`has_header`] when the header is mandatory.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the first offending line.
pub fn parse(input: &str) -> Result<SequenceDiagram, ParseError> {
    let lines: Vec<Line<'_>> = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with("%%"))
        .collect();

    let mut registry = Registry::default();
    let mut pos = 0;

    if lines.first().is_some_and(|(_, l)| l.eq_ignore_ascii_case(HEADER)) {
        pos += 1;
    }

    let events = parse_events(&lines, &mut registry, &mut pos, None, 0)?;

    Ok(SequenceDiagram { participants: registry.participants, events })
}

/// Whether the first statement of `input` is the `sequenceDiagram` header.
#[must_use]
pub fn has_header(input: &str) -> bool {
    input
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("%%"))
        .is_some_and(|l| l.eq_ignore_ascii_case(HEADER))
}

/// Parse events until EOF or one of `stop_keywords`. `depth` counts the
/// blocks enclosing these events.
fn parse_events(
    lines: &[Line<'_>],
    registry: &mut Registry,
    pos: &mut usize,
    stop_keywords: Option<&[&str]>,
    depth: usize,
) -> Result<Vec<Event>, ParseError> {
    let mut events = Vec::new();

    while let Some(&(line_no, line)) = lines.get(*pos) {
        if let Some(stops) = stop_keywords {
            if stops.iter().any(|kw| is_keyword_line(line, kw)) {
                break;
            }
        }

        if line.eq_ignore_ascii_case(HEADER) {
            *pos += 1;
            continue;
        }

        if let Some(rest) = strip_keyword(line, "participant").or_else(|| strip_keyword(line, "actor")) {
            registry.declare(rest);
            *pos += 1;
            continue;
        }

        if let Some(rest) = strip_keyword(line, "activate") {
            let id = rest.trim().to_owned();
            registry.ensure(&id);
            events.push(Event::Activate(id));
            *pos += 1;
            continue;
        }
        if let Some(rest) = strip_keyword(line, "deactivate") {
            let id = rest.trim().to_owned();
            registry.ensure(&id);
            events.push(Event::Deactivate(id));
            *pos += 1;
            continue;
        }

        if is_keyword_line(line, "end") {
            return Err(ParseError::UnexpectedEnd { line: line_no });
        }

        if strip_keyword(line, "note").is_some() {
            events.push(Event::Note(parse_note(line_no, line, registry)?));
            *pos += 1;
            continue;
        }

        if let Some(kind) = try_block_keyword(line) {
            if depth >= MAX_BLOCK_DEPTH {
                return Err(ParseError::NestingTooDeep { line: line_no, max: MAX_BLOCK_DEPTH });
            }
            let label = line
                .split_once(char::is_whitespace)
                .map_or("", |(_, rest)| rest)
                .trim()
                .to_owned();
            *pos += 1;
            let block = parse_block(lines, registry, pos, kind, label, line_no, depth + 1)?;
            events.push(Event::Block(block));
            continue;
        }

        if let Some((msg, activation)) = try_parse_message(line, registry) {
            events.push(Event::Message(msg));
            events.extend(activation);
            *pos += 1;
            continue;
        }

        return Err(ParseError::Unrecognized { line: line_no, text: line.to_owned() });
    }

    Ok(events)
}

/// Parse the body of a block whose opening line has already been consumed.
fn parse_block(
    lines: &[Line<'_>],
    registry: &mut Registry,
    pos: &mut usize,
    kind: BlockKind,
    label: String,
    open_line: usize,
    depth: usize,
) -> Result<Block, ParseError> {
    let stop_keywords: Vec<&str> = match kind.section_keyword() {
        Some(sep) => vec!["end", sep],
        None => vec!["end"],
    };

    let events = parse_events(lines, registry, pos, Some(&stop_keywords), depth)?;
    let mut sections = vec![BlockSection { label: None, events }];

    loop {
        let Some(&(_, line)) = lines.get(*pos) else {
            return Err(ParseError::UnterminatedBlock { line: open_line, keyword: kind.keyword() });
        };
        *pos += 1;

        if is_keyword_line(line, "end") {
            break;
        }

        // parse_events only stops on `end` or this block's section keyword.
        let section_label = kind
            .section_keyword()
            .and_then(|sep| line.get(sep.len()..))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);
        let events = parse_events(lines, registry, pos, Some(&stop_keywords), depth)?;
        sections.push(BlockSection { label: section_label, events });
    }

    Ok(Block { kind, label, sections })
}

/// Parse `From->>To: text`, including the `+`/`-` activation shorthand on
/// the receiving side (`A->>+B: call`, `B-->>-A: reply`).
fn try_parse_message(line: &str, registry: &mut Registry) -> Option<(Message, Option<Event>)> {
    const ARROWS: &[(&str, ArrowStyle)] = &[
        ("-->>", ArrowStyle::Dashed),
        ("->>", ArrowStyle::Solid),
        ("-->", ArrowStyle::DashedOpen),
        ("--x", ArrowStyle::DashedCross),
        ("-x", ArrowStyle::SolidCross),
        ("->", ArrowStyle::SolidOpen),
    ];

    let (head, text) = match line.split_once(':') {
        Some((head, text)) => (head, text.trim()),
        None => (line, ""),
    };

    // Leftmost arrow wins; at the same offset the longest pattern wins.
    let (idx, pattern, arrow) = ARROWS
        .iter()
        .filter_map(|&(pattern, arrow)| head.find(pattern).map(|idx| (idx, pattern, arrow)))
        .min_by_key(|&(idx, pattern, _)| (idx, std::cmp::Reverse(pattern.len())))?;

    let from = head[..idx].trim();
    let rest = head[idx + pattern.len()..].trim();
    let (to, activation) = if let Some(id) = rest.strip_prefix('+') {
        (id.trim(), Some(Event::Activate(id.trim().to_owned())))
    } else if let Some(id) = rest.strip_prefix('-') {
        (id.trim(), Some(Event::Deactivate(from.to_owned())))
    } else {
        (rest, None)
    };

    if from.is_empty() || to.is_empty() || from.contains(char::is_whitespace) || to.contains(char::is_whitespace) {
        return None;
    }

    registry.ensure(from);
    registry.ensure(to);

    Some((Message { from: from.to_owned(), to: to.to_owned(), text: text.to_owned(), arrow }, activation))
}

/// Parse a `Note` from a line like `Note over A,B: text` or `Note left of A: text`.
fn parse_note(line_no: usize, line: &str, registry: &mut Registry) -> Result<Note, ParseError> {
    let rest = line.get(5..).unwrap_or_default();
    let lower = rest.to_ascii_lowercase();

    let (position, after_pos) = if lower.starts_with("left of ") {
        (NotePosition::LeftOf, &rest[8..])
    } else if lower.starts_with("right of ") {
        (NotePosition::RightOf, &rest[9..])
    } else if lower.starts_with("over ") {
        (NotePosition::Over, &rest[5..])
    } else {
        return Err(ParseError::InvalidNote { line: line_no, text: line.to_owned() });
    };

    let (participants_str, text) = after_pos
        .split_once(':')
        .ok_or_else(|| ParseError::NoteMissingColon { line: line_no, text: line.to_owned() })?;

    let over: Vec<String> = participants_str
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            registry.ensure(id);
            id.to_owned()
        })
        .collect();
    if over.is_empty() {
        return Err(ParseError::InvalidNote { line: line_no, text: line.to_owned() });
    }

    Ok(Note { over, text: text.trim().to_owned(), position })
}

/// Strip a keyword prefix (case-insensitive) and return the rest.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return Some(rest.trim());
    }
    None
}

/// `line` is exactly `keyword` or `keyword` followed by a label.
fn is_keyword_line(line: &str, keyword: &str) -> bool {
    strip_keyword(line, keyword).is_some()
}

fn try_block_keyword(line: &str) -> Option<BlockKind> {
    let word = line.split_whitespace().next()?.to_ascii_lowercase();
    match word.as_str() {
        "loop" => Some(BlockKind::Loop),
        "alt" => Some(BlockKind::Alt),
        "opt" => Some(BlockKind::Opt),
        "par" => Some(BlockKind::Par),
        "critical" => Some(BlockKind::Critical),
        "break" => Some(BlockKind::Break),
        _ => None,
    }
}
