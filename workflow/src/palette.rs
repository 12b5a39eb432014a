//! Colors and icons shared by the workflow cards, beams and diagrams.
//!
//! Everything here is a closed enum mapped to Tailwind utility classes or
//! hex strings, so the renderers never assemble class names by hand.

use serde::Serialize;

/// Card and beam color family of a workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorGroup {
    Purple,
    Blue,
    Green,
    Pink,
}

impl ColorGroup {
    /// Stroke color of beams drawn in this group.
    #[must_use]
    pub const fn beam(self) -> &'static str {
        match self {
            Self::Purple => "#6C63FF",
            Self::Blue => "#4C9AFF",
            Self::Green => "#3DBE29",
            Self::Pink => "#C063FF",
        }
    }

    #[must_use]
    pub const fn border_class(self) -> &'static str {
        match self {
            Self::Purple => "border-purple-300",
            Self::Blue => "border-blue-300",
            Self::Green => "border-green-300",
            Self::Pink => "border-pink-300",
        }
    }

    #[must_use]
    pub const fn bg_class(self) -> &'static str {
        match self {
            Self::Purple => "bg-purple-50",
            Self::Blue => "bg-blue-50",
            Self::Green => "bg-green-50",
            Self::Pink => "bg-pink-50",
        }
    }

    #[must_use]
    pub const fn text_class(self) -> &'static str {
        match self {
            Self::Purple => "text-purple-700",
            Self::Blue => "text-blue-700",
            Self::Green => "text-green-700",
            Self::Pink => "text-pink-700",
        }
    }
}

/// Accent used for icon tiles, edges and layer headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Purple,
    Blue,
    Pink,
    Green,
    Orange,
    Indigo,
}

impl Tone {
    const fn name(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Pink => "pink",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Indigo => "indigo",
        }
    }

    /// Icon foreground, e.g. `text-pink-600`.
    #[must_use]
    pub fn icon_class(self) -> String {
        format!("text-{}-600", self.name())
    }

    /// Icon tile background, e.g. `bg-pink-100`.
    #[must_use]
    pub fn tile_class(self) -> String {
        format!("bg-{}-100", self.name())
    }

    /// Connector stroke, e.g. `stroke-pink-400`.
    #[must_use]
    pub fn stroke_class(self) -> String {
        format!("stroke-{}-400", self.name())
    }

    /// Legend dot fill, e.g. `bg-pink-500`.
    #[must_use]
    pub fn dot_class(self) -> String {
        format!("bg-{}-500", self.name())
    }
}

/// Line icons used on the page. Names match the Lucide icon set the SVG
/// paths were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    Bot,
    MessageSquare,
    Brain,
    FileText,
    Settings,
    Database,
    Code,
    Play,
    Users,
    Mail,
    Mic,
    Video,
    FileSpreadsheet,
    Workflow,
    ArrowDown,
}

/// One swatch of a diagram legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub tone: Tone,
}
