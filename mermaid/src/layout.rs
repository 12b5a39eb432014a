//! Layout engine: positions a parsed sequence diagram on a 2D scene.
//!
//! Horizontal spacing is solved first so every message label fits between
//! its endpoints. A single top-to-bottom pass with a y cursor then stacks
//! messages, notes and block frames while tracking open activation bars per
//! participant. The finished scene is translated so that every coordinate is
//! non-negative and offset by [`MARGIN`].

use super::ast::{ArrowStyle, Block, Event, Message, Note, NotePosition, SequenceDiagram};

// ── Geometry ──

pub const MARGIN: f64 = 20.0;
pub const LINE_H: f64 = 18.0;
pub const SELF_LOOP_W: f64 = 40.0;
pub const SELF_LOOP_H: f64 = 20.0;
pub const BLOCK_HEADER_H: f64 = 24.0;

const ACTOR_MIN_W: f64 = 150.0;
const ACTOR_H: f64 = 65.0;
const ACTOR_GAP: f64 = 50.0;
const TEXT_PAD: f64 = 10.0;
const CHAR_W: f64 = 7.5;
const ROW_GAP: f64 = 20.0;
const ARROW_GAP: f64 = 6.0;
const NOTE_MIN_W: f64 = 150.0;
const NOTE_OVERHANG: f64 = 25.0;
const ACTIVATION_W: f64 = 10.0;
const BLOCK_INSET: f64 = 40.0;
const BLOCK_NEST_STEP: f64 = 8.0;

// ── Scene primitives ──

/// One rendered line of a label. `**bold**` markup sets `bold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lifeline {
    pub x: f64,
    pub y1: f64,
    pub y2: f64,
}

/// A message arrow. Self messages (`self_loop`) start and end at `x1` and
/// bulge right by [`SELF_LOOP_W`].
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLine {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub arrow: ArrowStyle,
    pub self_loop: bool,
    pub label: Vec<TextLine>,
    pub label_x: f64,
    /// Baseline of the first label line.
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivationBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub keyword: &'static str,
    pub label: String,
    pub dividers: Vec<BlockDivider>,
}

/// Dashed separator between two sections of an `alt`/`par`/`critical` block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDivider {
    pub y: f64,
    pub label: Option<String>,
}

/// Everything the SVG writer draws, in final coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Top row followed by the mirrored bottom row.
    pub actors: Vec<ActorBox>,
    pub lifelines: Vec<Lifeline>,
    pub messages: Vec<MessageLine>,
    pub notes: Vec<NoteBox>,
    pub activations: Vec<ActivationBar>,
    pub blocks: Vec<BlockFrame>,
}

impl Scene {
    fn translate(&mut self, dx: f64, dy: f64) {
        for a in &mut self.actors {
            a.x += dx;
            a.y += dy;
        }
        for l in &mut self.lifelines {
            l.x += dx;
            l.y1 += dy;
            l.y2 += dy;
        }
        for m in &mut self.messages {
            m.x1 += dx;
            m.x2 += dx;
            m.y += dy;
            m.label_x += dx;
            m.label_y += dy;
        }
        for n in &mut self.notes {
            n.x += dx;
            n.y += dy;
        }
        for b in &mut self.activations {
            b.x += dx;
            b.y += dy;
        }
        for f in &mut self.blocks {
            f.x += dx;
            f.y += dy;
            for d in &mut f.dividers {
                d.y += dy;
            }
        }
    }

    /// Horizontal extent `(min_x, max_x)` of everything drawn.
    fn horizontal_bounds(&self) -> (f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut include = |lo: f64, hi: f64| {
            min_x = min_x.min(lo);
            max_x = max_x.max(hi);
        };

        for a in &self.actors {
            include(a.x, a.x + a.width);
        }
        for n in &self.notes {
            include(n.x, n.x + n.width);
        }
        for f in &self.blocks {
            include(f.x, f.x + f.width);
        }
        for m in &self.messages {
            let label_w = text_width(&m.label);
            if m.self_loop {
                include(m.x1, (m.x1 + SELF_LOOP_W).max(m.label_x + label_w));
            } else {
                include(m.x1.min(m.x2), m.x1.max(m.x2));
                include(m.label_x - label_w / 2.0, m.label_x + label_w / 2.0);
            }
        }

        if min_x > max_x { (0.0, 0.0) } else { (min_x, max_x) }
    }
}

// ── Text measurement ──

/// Split message or note text into display lines on `<br/>` and mark
/// `**bold**` lines.
#[must_use]
pub fn split_label(text: &str) -> Vec<TextLine> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
        .split('\n')
        .map(|piece| TextLine { text: piece.replace("**", "").trim().to_owned(), bold: piece.contains("**") })
        .collect()
}

/// Estimated rendered width of the widest line.
#[must_use]
pub fn text_width(lines: &[TextLine]) -> f64 {
    lines.iter().map(|l| px(l.text.chars().count()) * CHAR_W).fold(0.0, f64::max)
}

#[allow(clippy::cast_precision_loss)]
fn px(count: usize) -> f64 {
    count as f64
}

// ── Layout ──

/// Lay out a parsed diagram. An empty diagram yields an empty scene.
#[must_use]
pub fn layout(diagram: &SequenceDiagram) -> Scene {
    if diagram.participants.is_empty() {
        return Scene::default();
    }

    let widths: Vec<f64> = diagram
        .participants
        .iter()
        .map(|p| (px(p.label.chars().count()) * CHAR_W + 2.0 * TEXT_PAD).max(ACTOR_MIN_W))
        .collect();
    let centers = solve_centers(diagram, &widths);

    let mut builder = Builder {
        diagram,
        open: vec![Vec::new(); centers.len()],
        centers,
        y: ACTOR_H + ROW_GAP,
        last_message_y: None,
        scene: Scene::default(),
    };
    builder.events(&diagram.events, 0);
    let bottom = builder.y;
    builder.close_all(bottom);

    let Builder { centers, mut scene, .. } = builder;

    for (p, (&cx, &w)) in diagram.participants.iter().zip(centers.iter().zip(&widths)) {
        scene.lifelines.push(Lifeline { x: cx, y1: ACTOR_H, y2: bottom });
        for y in [0.0, bottom] {
            scene.actors.push(ActorBox { x: cx - w / 2.0, y, width: w, height: ACTOR_H, label: p.label.clone() });
        }
    }
    // Keep the top row first.
    scene.actors.sort_by(|a, b| a.y.total_cmp(&b.y));

    let (min_x, max_x) = scene.horizontal_bounds();
    scene.translate(MARGIN - min_x, MARGIN);
    scene.width = max_x - min_x + 2.0 * MARGIN;
    scene.height = bottom + ACTOR_H + 2.0 * MARGIN;
    scene
}

/// Participant centers with gaps widened until every message label fits.
fn solve_centers(diagram: &SequenceDiagram, widths: &[f64]) -> Vec<f64> {
    let mut spans = Vec::new();
    collect_spans(diagram, &diagram.events, widths.len(), &mut spans);
    spans.sort_by_key(|&(_, hi, _)| hi);

    let mut gaps = vec![ACTOR_GAP; widths.len()];
    for (lo, hi, needed) in spans {
        let centers = centers_from(widths, &gaps);
        let have = centers[hi] - centers[lo];
        if have < needed {
            gaps[hi] += needed - have;
        }
    }
    centers_from(widths, &gaps)
}

fn centers_from(widths: &[f64], gaps: &[f64]) -> Vec<f64> {
    let mut centers = Vec::with_capacity(widths.len());
    let mut x = 0.0;
    for (i, &w) in widths.iter().enumerate() {
        x = match i.checked_sub(1) {
            Some(prev) => x + widths[prev] / 2.0 + gaps[i] + w / 2.0,
            None => w / 2.0,
        };
        centers.push(x);
    }
    centers
}

/// `(lo, hi, min center distance)` for every message, blocks included.
fn collect_spans(diagram: &SequenceDiagram, events: &[Event], count: usize, out: &mut Vec<(usize, usize, f64)>) {
    for event in events {
        match event {
            Event::Message(msg) => {
                let (Some(a), Some(b)) = (diagram.participant_index(&msg.from), diagram.participant_index(&msg.to))
                else {
                    continue;
                };
                let label_w = text_width(&split_label(&msg.text));
                if a == b {
                    if a + 1 < count {
                        out.push((a, a + 1, label_w + SELF_LOOP_W + 2.0 * TEXT_PAD));
                    }
                } else {
                    out.push((a.min(b), a.max(b), label_w + 2.0 * TEXT_PAD));
                }
            }
            Event::Block(block) => {
                for section in &block.sections {
                    collect_spans(diagram, &section.events, count, out);
                }
            }
            Event::Note(_) | Event::Activate(_) | Event::Deactivate(_) => {}
        }
    }
}

struct Builder<'a> {
    diagram: &'a SequenceDiagram,
    centers: Vec<f64>,
    y: f64,
    last_message_y: Option<f64>,
    /// Start y of each open activation, per participant.
    open: Vec<Vec<f64>>,
    scene: Scene,
}

impl Builder<'_> {
    fn index(&self, id: &str) -> Option<usize> {
        self.diagram.participant_index(id)
    }

    fn events(&mut self, events: &[Event], depth: usize) {
        for event in events {
            match event {
                Event::Message(msg) => self.message(msg),
                Event::Note(note) => self.note(note),
                Event::Block(block) => self.block(block, depth),
                Event::Activate(id) => self.activate(id),
                Event::Deactivate(id) => self.deactivate(id),
            }
        }
    }

    /// Offset from a lifeline to the edge of its open activation bars on the
    /// side facing `dir`.
    fn bar_offset(&self, p: usize, dir: f64) -> f64 {
        match self.open[p].len() {
            0 => 0.0,
            depth => dir * (ACTIVATION_W / 2.0 + px(depth - 1) * ACTIVATION_W / 2.0),
        }
    }

    fn message(&mut self, msg: &Message) {
        let (Some(from), Some(to)) = (self.index(&msg.from), self.index(&msg.to)) else {
            return;
        };
        let label = split_label(&msg.text);
        let label_y = self.y + LINE_H - 4.0;
        let y = self.y + px(label.len()) * LINE_H + ARROW_GAP;

        let line = if from == to {
            let x = self.centers[from] + self.bar_offset(from, 1.0);
            self.y = y + SELF_LOOP_H + ROW_GAP;
            MessageLine {
                x1: x,
                x2: x,
                y,
                arrow: msg.arrow,
                self_loop: true,
                label,
                label_x: x + TEXT_PAD,
                label_y,
            }
        } else {
            let dir = if to > from { 1.0 } else { -1.0 };
            let x1 = self.centers[from] + self.bar_offset(from, dir);
            let x2 = self.centers[to] - self.bar_offset(to, dir);
            self.y = y + ROW_GAP;
            MessageLine {
                x1,
                x2,
                y,
                arrow: msg.arrow,
                self_loop: false,
                label,
                label_x: f64::midpoint(x1, x2),
                label_y,
            }
        };

        self.last_message_y = Some(y);
        self.scene.messages.push(line);
    }

    fn note(&mut self, note: &Note) {
        let indices: Vec<usize> = note.over.iter().filter_map(|id| self.index(id)).collect();
        let (Some(&lo), Some(&hi)) = (indices.iter().min(), indices.iter().max()) else {
            return;
        };
        let lines = split_label(&note.text);
        let text_w = (text_width(&lines) + 2.0 * TEXT_PAD).max(NOTE_MIN_W);

        let (x, width) = match note.position {
            NotePosition::Over => {
                let w = text_w.max(self.centers[hi] - self.centers[lo] + 2.0 * NOTE_OVERHANG);
                (f64::midpoint(self.centers[lo], self.centers[hi]) - w / 2.0, w)
            }
            NotePosition::LeftOf => (self.centers[lo] - NOTE_OVERHANG - text_w, text_w),
            NotePosition::RightOf => (self.centers[hi] + NOTE_OVERHANG, text_w),
        };
        let height = px(lines.len()) * LINE_H + 2.0 * TEXT_PAD;

        self.scene.notes.push(NoteBox { x, y: self.y, width, height, lines });
        self.y += height + ROW_GAP;
    }

    fn block(&mut self, block: &Block, depth: usize) {
        let (lo, hi) = self.participant_range(block).unwrap_or((0, self.centers.len() - 1));
        let inset = (BLOCK_INSET - px(depth) * BLOCK_NEST_STEP).max(BLOCK_NEST_STEP);
        let x = self.centers[lo] - inset;
        let width = self.centers[hi] - self.centers[lo] + 2.0 * inset;

        let top = self.y;
        self.y += BLOCK_HEADER_H;
        let mut dividers = Vec::new();
        for (i, section) in block.sections.iter().enumerate() {
            if i > 0 {
                dividers.push(BlockDivider { y: self.y, label: section.label.clone() });
                self.y += BLOCK_HEADER_H;
            }
            self.events(&section.events, depth + 1);
        }
        self.y += TEXT_PAD;

        self.scene.blocks.push(BlockFrame {
            x,
            y: top,
            width,
            height: self.y - top,
            keyword: block.kind.keyword(),
            label: block.label.clone(),
            dividers,
        });
        self.y += ROW_GAP;
    }

    fn participant_range(&self, block: &Block) -> Option<(usize, usize)> {
        let mut ids = Vec::new();
        for section in &block.sections {
            collect_ids(&section.events, &mut ids);
        }
        let indices: Vec<usize> = ids.iter().filter_map(|id| self.index(id)).collect();
        Some((*indices.iter().min()?, *indices.iter().max()?))
    }

    fn activate(&mut self, id: &str) {
        if let Some(p) = self.index(id) {
            let start = self.last_message_y.unwrap_or(self.y);
            self.open[p].push(start);
        }
    }

    fn deactivate(&mut self, id: &str) {
        let Some(p) = self.index(id) else {
            return;
        };
        let Some(start) = self.open[p].pop() else {
            return;
        };
        let end = self.last_message_y.unwrap_or(self.y).max(start + ROW_GAP);
        self.push_bar(p, start, end);
    }

    fn close_all(&mut self, end: f64) {
        for p in 0..self.open.len() {
            while let Some(start) = self.open[p].pop() {
                self.push_bar(p, start, end.max(start + ROW_GAP));
            }
        }
    }

    /// Bars nest rightwards by half a bar width per level.
    fn push_bar(&mut self, p: usize, start: f64, end: f64) {
        let depth = self.open[p].len();
        let x = self.centers[p] - ACTIVATION_W / 2.0 + px(depth) * ACTIVATION_W / 2.0;
        self.scene.activations.push(ActivationBar { x, y: start, width: ACTIVATION_W, height: end - start });
    }
}

fn collect_ids<'a>(events: &'a [Event], out: &mut Vec<&'a str>) {
    for event in events {
        match event {
            Event::Message(msg) => {
                out.push(&msg.from);
                out.push(&msg.to);
            }
            Event::Note(note) => out.extend(note.over.iter().map(String::as_str)),
            Event::Block(block) => {
                for section in &block.sections {
                    collect_ids(&section.events, out);
                }
            }
            Event::Activate(_) | Event::Deactivate(_) => {}
        }
    }
}
