//! SVG writer for laid-out sequence scenes.
//!
//! Every selector and marker id is prefixed with the render id, so several
//! diagrams can share one document without their styles or `<marker>`
//! references colliding.

use std::fmt::{self, Write};

use super::ast::ArrowHead;
use super::layout::{
    ActivationBar, ActorBox, BlockFrame, LINE_H, Lifeline, MessageLine, NoteBox, SELF_LOOP_H, SELF_LOOP_W, Scene,
    TextLine,
};
use super::theme::Theme;

const FONT_SIZE: f64 = 14.0;
const KEYWORD_TAB_W: f64 = 50.0;
const KEYWORD_TAB_H: f64 = 20.0;

/// Serialize `scene` as a standalone `<svg>` element with id `id`.
///
/// # Errors
///
/// Only propagates `fmt::Error` from the underlying writer.
pub fn write_svg(scene: &Scene, id: &str, theme: &Theme) -> Result<String, fmt::Error> {
    let mut w = SvgWriter { out: String::with_capacity(16 * 1024), id };

    w.open(scene, theme)?;
    w.style(theme)?;
    w.defs()?;
    for frame in &scene.blocks {
        w.block(frame)?;
    }
    for line in &scene.lifelines {
        w.lifeline(line)?;
    }
    for actor in &scene.actors {
        w.actor(actor)?;
    }
    for bar in &scene.activations {
        w.activation(bar)?;
    }
    for note in &scene.notes {
        w.note(note)?;
    }
    for msg in &scene.messages {
        w.message(msg)?;
    }
    w.out.push_str("</svg>");

    Ok(w.out)
}

struct SvgWriter<'a> {
    out: String,
    id: &'a str,
}

impl SvgWriter<'_> {
    fn open(&mut self, scene: &Scene, theme: &Theme) -> fmt::Result {
        write!(
            self.out,
            r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="100%" viewBox="0 0 {w} {h}" style="max-width: {w}px; background-color: {bg};" role="graphics-document document" aria-roledescription="sequence">"#,
            id = self.id,
            w = num(scene.width),
            h = num(scene.height),
            bg = escape(&theme.background),
        )
    }

    fn style(&mut self, t: &Theme) -> fmt::Result {
        let id = self.id;
        self.out.push_str("<style>");
        write!(
            self.out,
            "#{id}{{font-family:{font};font-size:{size}px;fill:{text};}}",
            font = t.font_family,
            size = num(FONT_SIZE),
            text = t.primary_text_color,
        )?;
        write!(self.out, "#{id} .actor{{fill:{};stroke:{};stroke-width:1px;}}", t.actor_bkg, t.actor_border)?;
        write!(self.out, "#{id} .actor-text{{fill:{};text-anchor:middle;dominant-baseline:central;}}", t.actor_text_color)?;
        write!(self.out, "#{id} .actor-line{{stroke:{};stroke-width:0.5px;}}", t.actor_line_color)?;
        write!(self.out, "#{id} .message-line{{stroke:{};stroke-width:1.5px;fill:none;}}", t.signal_color)?;
        write!(self.out, "#{id} .dashed{{stroke-dasharray:3,3;}}")?;
        write!(self.out, "#{id} .message-text{{fill:{};text-anchor:middle;}}", t.signal_text_color)?;
        write!(self.out, "#{id} .self-text{{text-anchor:start;}}")?;
        write!(self.out, "#{id} .arrowhead{{fill:{0};stroke:{0};}}", t.signal_color)?;
        write!(self.out, "#{id} .note{{fill:{};stroke:{};}}", t.note_bkg_color, t.note_border_color)?;
        write!(self.out, "#{id} .note-text{{fill:{};text-anchor:middle;}}", t.note_text_color)?;
        write!(self.out, "#{id} .loop-frame{{fill:none;stroke:{};stroke-width:1px;}}", t.primary_border_color)?;
        write!(self.out, "#{id} .divider{{stroke:{};stroke-dasharray:3,3;}}", t.primary_border_color)?;
        write!(self.out, "#{id} .label-box{{fill:{};stroke:{};}}", t.label_box_bkg_color, t.primary_border_color)?;
        write!(self.out, "#{id} .label-text{{fill:{};text-anchor:middle;dominant-baseline:central;}}", t.label_text_color)?;
        write!(self.out, "#{id} .loop-text{{fill:{};text-anchor:middle;}}", t.loop_text_color)?;
        write!(self.out, "#{id} .activation{{fill:{};stroke:{};}}", t.second_bkg, t.actor_border)?;
        write!(self.out, "#{id} .bold{{font-weight:bold;}}")?;
        self.out.push_str("</style>");
        Ok(())
    }

    fn defs(&mut self) -> fmt::Result {
        write!(
            self.out,
            concat!(
                r#"<defs><marker id="{id}-arrowhead" refX="9" refY="5" markerUnits="userSpaceOnUse" markerWidth="12" markerHeight="12" orient="auto">"#,
                r#"<path class="arrowhead" d="M 0 0 L 10 5 L 0 10 z"/></marker>"#,
                r#"<marker id="{id}-crosshead" refX="4" refY="4.5" markerUnits="userSpaceOnUse" markerWidth="15" markerHeight="8" orient="auto">"#,
                r#"<path class="arrowhead" style="fill:none;stroke-width:1.5px;" d="M 1,2 L 6,7 M 6,2 L 1,7"/></marker></defs>"#,
            ),
            id = self.id,
        )
    }

    fn actor(&mut self, a: &ActorBox) -> fmt::Result {
        write!(
            self.out,
            r#"<g><rect class="actor" x="{x}" y="{y}" width="{w}" height="{h}" rx="3" ry="3"/><text class="actor-text" x="{cx}" y="{cy}">{label}</text></g>"#,
            x = num(a.x),
            y = num(a.y),
            w = num(a.width),
            h = num(a.height),
            cx = num(a.x + a.width / 2.0),
            cy = num(a.y + a.height / 2.0),
            label = escape(&a.label),
        )
    }

    fn lifeline(&mut self, l: &Lifeline) -> fmt::Result {
        write!(
            self.out,
            r#"<line class="actor-line" x1="{x}" y1="{y1}" x2="{x}" y2="{y2}"/>"#,
            x = num(l.x),
            y1 = num(l.y1),
            y2 = num(l.y2),
        )
    }

    fn activation(&mut self, b: &ActivationBar) -> fmt::Result {
        write!(
            self.out,
            r#"<rect class="activation" x="{}" y="{}" width="{}" height="{}"/>"#,
            num(b.x),
            num(b.y),
            num(b.width),
            num(b.height),
        )
    }

    fn note(&mut self, n: &NoteBox) -> fmt::Result {
        write!(
            self.out,
            r#"<g><rect class="note" x="{}" y="{}" width="{}" height="{}"/>"#,
            num(n.x),
            num(n.y),
            num(n.width),
            num(n.height),
        )?;
        let first_baseline = n.y + (n.height - lines_height(&n.lines)) / 2.0 + LINE_H - 4.0;
        self.text_lines("note-text", n.x + n.width / 2.0, first_baseline, &n.lines)?;
        self.out.push_str("</g>");
        Ok(())
    }

    fn message(&mut self, m: &MessageLine) -> fmt::Result {
        let dashed = if m.arrow.is_dashed() { " dashed" } else { "" };
        let marker = match m.arrow.head() {
            ArrowHead::Filled => format!(r#" marker-end="url(#{}-arrowhead)""#, self.id),
            ArrowHead::Cross => format!(r#" marker-end="url(#{}-crosshead)""#, self.id),
            ArrowHead::None => String::new(),
        };

        self.out.push_str("<g>");
        if !m.label.is_empty() {
            let class = if m.self_loop { "message-text self-text" } else { "message-text" };
            self.text_lines(class, m.label_x, m.label_y, &m.label)?;
        }

        if m.self_loop {
            let bulge = m.x1 + SELF_LOOP_W * 1.5;
            write!(
                self.out,
                r#"<path class="message-line{dashed}" d="M {x},{y} C {bx},{top} {bx},{bottom} {x},{end}"{marker}/>"#,
                x = num(m.x1),
                y = num(m.y),
                bx = num(bulge),
                top = num(m.y - 10.0),
                bottom = num(m.y + SELF_LOOP_H + 10.0),
                end = num(m.y + SELF_LOOP_H),
            )?;
        } else {
            write!(
                self.out,
                r#"<line class="message-line{dashed}" x1="{}" y1="{y}" x2="{}" y2="{y}"{marker}/>"#,
                num(m.x1),
                num(m.x2),
                y = num(m.y),
            )?;
        }
        self.out.push_str("</g>");
        Ok(())
    }

    fn block(&mut self, f: &BlockFrame) -> fmt::Result {
        let (x, y) = (f.x, f.y);
        write!(
            self.out,
            r#"<g><rect class="loop-frame" x="{}" y="{}" width="{}" height="{}"/>"#,
            num(x),
            num(y),
            num(f.width),
            num(f.height),
        )?;
        write!(
            self.out,
            r#"<polygon class="label-box" points="{x0},{y0} {x1},{y0} {x1},{y1} {x2},{y2} {x0},{y2}"/><text class="label-text" x="{tx}" y="{ty}">{kw}</text>"#,
            x0 = num(x),
            y0 = num(y),
            x1 = num(x + KEYWORD_TAB_W),
            y1 = num(y + KEYWORD_TAB_H * 0.65),
            x2 = num(x + KEYWORD_TAB_W * 0.84),
            y2 = num(y + KEYWORD_TAB_H),
            tx = num(x + KEYWORD_TAB_W / 2.0),
            ty = num(y + KEYWORD_TAB_H / 2.0),
            kw = f.keyword,
        )?;
        if !f.label.is_empty() {
            write!(
                self.out,
                r#"<text class="loop-text" x="{}" y="{}">[{}]</text>"#,
                num(x + f.width / 2.0),
                num(y + 16.0),
                escape(&f.label),
            )?;
        }
        for d in &f.dividers {
            write!(
                self.out,
                r#"<line class="divider" x1="{}" y1="{y}" x2="{}" y2="{y}"/>"#,
                num(x),
                num(x + f.width),
                y = num(d.y),
            )?;
            if let Some(label) = &d.label {
                write!(
                    self.out,
                    r#"<text class="loop-text" x="{}" y="{}">[{}]</text>"#,
                    num(x + f.width / 2.0),
                    num(d.y + 16.0),
                    escape(label),
                )?;
            }
        }
        self.out.push_str("</g>");
        Ok(())
    }

    fn text_lines(&mut self, class: &str, x: f64, first_baseline: f64, lines: &[TextLine]) -> fmt::Result {
        write!(self.out, r#"<text class="{class}" x="{}" y="{}">"#, num(x), num(first_baseline))?;
        for (i, line) in lines.iter().enumerate() {
            let dy = if i == 0 { 0.0 } else { LINE_H };
            let bold = if line.bold { r#" class="bold""# } else { "" };
            write!(self.out, r#"<tspan x="{}" dy="{}"{bold}>{}</tspan>"#, num(x), num(dy), escape(&line.text))?;
        }
        self.out.push_str("</text>");
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
fn lines_height(lines: &[TextLine]) -> f64 {
    lines.len() as f64 * LINE_H
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub(crate) fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

/// Escape text for use in XML content and attribute values.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
