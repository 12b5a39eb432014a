//! Theme variables accepted by the SVG writer.
//!
//! Slot names follow Mermaid's `themeVariables` so a definition styled for
//! the browser library keeps its look here. Values are emitted verbatim into
//! a scoped `<style>` block; callers own their validity as CSS colors.

/// Color and font slots for a rendered diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub primary_color: String,
    pub primary_text_color: String,
    pub primary_border_color: String,
    pub line_color: String,
    pub secondary_color: String,
    pub tertiary_color: String,
    pub background: String,
    pub main_bkg: String,
    pub second_bkg: String,
    pub tertiary_bkg: String,
    pub actor_bkg: String,
    pub actor_border: String,
    pub actor_text_color: String,
    pub actor_line_color: String,
    pub signal_color: String,
    pub signal_text_color: String,
    pub label_box_bkg_color: String,
    pub label_text_color: String,
    pub loop_text_color: String,
    pub note_border_color: String,
    pub note_bkg_color: String,
    pub note_text_color: String,
    pub font_family: String,
}

impl Default for Theme {
    /// Mermaid's neutral "base" palette.
    fn default() -> Self {
        Self {
            primary_color: "#ECECFF".into(),
            primary_text_color: "#131300".into(),
            primary_border_color: "#9370DB".into(),
            line_color: "#333333".into(),
            secondary_color: "#ffffde".into(),
            tertiary_color: "#f4f4f4".into(),
            background: "#ffffff".into(),
            main_bkg: "#ECECFF".into(),
            second_bkg: "#ffffde".into(),
            tertiary_bkg: "#f4f4f4".into(),
            actor_bkg: "#ECECFF".into(),
            actor_border: "#9370DB".into(),
            actor_text_color: "#000000".into(),
            actor_line_color: "#999999".into(),
            signal_color: "#333333".into(),
            signal_text_color: "#333333".into(),
            label_box_bkg_color: "#ECECFF".into(),
            label_text_color: "#000000".into(),
            loop_text_color: "#000000".into(),
            note_border_color: "#aaaa33".into(),
            note_bkg_color: "#fff5ad".into(),
            note_text_color: "#000000".into(),
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".into(),
        }
    }
}
