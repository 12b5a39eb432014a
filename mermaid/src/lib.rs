//! Mermaid sequence diagram renderer.
//!
//! Turns Mermaid `sequenceDiagram` text into a standalone SVG string:
//!
//! | Module | Stage |
//! |---|---|
//! | [`parse`] | text → [`ast::SequenceDiagram`] |
//! | [`layout`] | AST → [`layout::Scene`] of positioned primitives |
//! | [`svg`] | scene + [`Theme`] → markup scoped to one element id |
//!
//! The crate is pure and synchronous, so the same renderer runs in the
//! browser bundle, on the server and in the CLI.

pub mod ast;
pub mod layout;
pub mod parse;
pub mod svg;
pub mod theme;

pub use parse::{ParseError, parse};
pub use theme::Theme;

/// Why a definition could not be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("definition is empty")]
    Empty,

    #[error("unsupported diagram type: expected `sequenceDiagram`")]
    UnknownDiagramType,

    #[error("invalid element id {0:?}: must start with a letter and contain only letters, digits, `-` or `_`")]
    InvalidId(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write svg: {0}")]
    Write(#[from] std::fmt::Error),
}

/// A text-to-markup diagram renderer.
pub trait DiagramRenderer {
    /// Render `definition` into markup whose root element carries `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the id or the definition is rejected.
    fn render(&self, id: &str, definition: &str) -> Result<String, RenderError>;
}

/// [`DiagramRenderer`] for `sequenceDiagram` definitions with a fixed theme.
#[derive(Debug, Clone, Default)]
pub struct SequenceRenderer {
    pub theme: Theme,
}

impl SequenceRenderer {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl DiagramRenderer for SequenceRenderer {
    fn render(&self, id: &str, definition: &str) -> Result<String, RenderError> {
        render(id, definition, &self.theme)
    }
}

/// Parse, lay out and serialize one sequence diagram.
///
/// # Errors
///
/// See [`RenderError`].
pub fn render(id: &str, definition: &str, theme: &Theme) -> Result<String, RenderError> {
    if !is_valid_id(id) {
        return Err(RenderError::InvalidId(id.to_owned()));
    }
    if definition.trim().is_empty() {
        return Err(RenderError::Empty);
    }
    if !parse::has_header(definition) {
        return Err(RenderError::UnknownDiagramType);
    }

    let diagram = parse(definition)?;
    let scene = layout::layout(&diagram);
    let svg = svg::write_svg(&scene, id, theme)?;

    tracing::debug!(
        id,
        participants = diagram.participants.len(),
        messages = diagram.message_count(),
        bytes = svg.len(),
        "rendered sequence diagram"
    );
    Ok(svg)
}

fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
