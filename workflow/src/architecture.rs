//! Static solution-architecture diagram.
//!
//! A fixed node and edge list grouped into layers by [`Category`]. The layout
//! is a pure function of its inputs; the client renders each layer as a row
//! of cards separated by a downward arrow, followed by the legend.

use serde::Serialize;

use crate::palette::{Icon, LegendEntry, Tone};

/// Widest grid a layer is laid out in.
const MAX_COLUMNS: usize = 5;

/// Layer a node belongs to. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ui,
    DataSource,
    Processing,
    AzureDevOps,
    Config,
    Output,
}

impl Category {
    pub const ORDER: [Self; 6] =
        [Self::Ui, Self::DataSource, Self::Processing, Self::AzureDevOps, Self::Config, Self::Output];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Ui => "User Interface",
            Self::DataSource => "Data Sources",
            Self::Processing => "AI Processing Engine",
            Self::AzureDevOps => "Azure DevOps Test Cases",
            Self::Config => "Configuration & MCP Integration",
            Self::Output => "Test Generation & Execution",
        }
    }

    #[must_use]
    pub const fn icon(self) -> Icon {
        match self {
            Self::Ui => Icon::Bot,
            Self::DataSource => Icon::MessageSquare,
            Self::Processing => Icon::Brain,
            Self::AzureDevOps => Icon::FileText,
            Self::Config => Icon::Settings,
            Self::Output => Icon::Play,
        }
    }

    /// Accent of the layer heading icon.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Ui => Tone::Purple,
            Self::DataSource | Self::Config => Tone::Blue,
            Self::Processing | Self::Output => Tone::Pink,
            Self::AzureDevOps => Tone::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub category: Category,
    pub tone: Tone,
    pub icon: Icon,
}

/// Directed connection between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: &'static str,
    pub to: &'static str,
    pub label: Option<&'static str>,
    pub tone: Tone,
}

const fn node(
    id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    category: Category,
    tone: Tone,
    icon: Icon,
) -> Node {
    Node { id, title, subtitle: Some(subtitle), category, tone, icon }
}

const fn edge(from: &'static str, to: &'static str, tone: Tone) -> Edge {
    Edge { from, to, label: None, tone }
}

const fn labelled(from: &'static str, to: &'static str, label: &'static str, tone: Tone) -> Edge {
    Edge { from, to, label: Some(label), tone }
}

pub const NODES: [Node; 13] = [
    node("ui", "User Interface", "Microsoft Copilot Studio", Category::Ui, Tone::Purple, Icon::Bot),
    node("teams", "Teams Integration", "Teams Connector", Category::DataSource, Tone::Blue, Icon::Users),
    node("emails", "Email Integration", "Outlook Connector", Category::DataSource, Tone::Blue, Icon::Mail),
    node("audio", "Audio Sources", "Meeting Transcripts, Voice Notes", Category::DataSource, Tone::Blue, Icon::Mic),
    node("video", "Video Sources", "Recordings, Demos", Category::DataSource, Tone::Blue, Icon::Video),
    node(
        "sharepoint",
        "Future Sources",
        "SharePoint, Figma Connectors",
        Category::DataSource,
        Tone::Blue,
        Icon::FileSpreadsheet,
    ),
    node("copilot", "Copilot Orchestrator", "Work Item Selection", Category::Processing, Tone::Purple, Icon::Workflow),
    node("ai-engine", "AI Processing Engine", "NLP • ML Models • Risk Analysis", Category::Processing, Tone::Pink, Icon::Brain),
    node("manual-tc", "Azure DevOps", "Manual Test Cases", Category::AzureDevOps, Tone::Green, Icon::FileText),
    node("ado-mcp", "Azure DevOps MCP", "Test Case Descriptions", Category::Config, Tone::Blue, Icon::Settings),
    node("test-config", "Test Configuration", "URL, Browser, Env, Tags", Category::Config, Tone::Orange, Icon::Database),
    node("playwright-mcp", "Playwright MCP", "Test Generation", Category::Output, Tone::Indigo, Icon::Code),
    node("test-execution", "Test Execution", "Build Pipeline", Category::Output, Tone::Pink, Icon::Play),
];

pub const EDGES: [Edge; 17] = [
    edge("ui", "teams", Tone::Purple),
    edge("ui", "emails", Tone::Purple),
    edge("ui", "audio", Tone::Purple),
    edge("ui", "video", Tone::Purple),
    edge("ui", "sharepoint", Tone::Purple),
    labelled("ui", "copilot", "Selects Work Item", Tone::Purple),
    edge("teams", "ai-engine", Tone::Blue),
    edge("emails", "ai-engine", Tone::Blue),
    edge("audio", "ai-engine", Tone::Blue),
    edge("video", "ai-engine", Tone::Blue),
    edge("sharepoint", "ai-engine", Tone::Blue),
    labelled("copilot", "ai-engine", "Triggers Processing", Tone::Purple),
    labelled("ai-engine", "manual-tc", "Creates Test Cases", Tone::Pink),
    labelled("manual-tc", "ado-mcp", "Pulls Descriptions", Tone::Green),
    edge("test-config", "playwright-mcp", Tone::Orange),
    labelled("ado-mcp", "playwright-mcp", "Config + Descriptions", Tone::Blue),
    labelled("playwright-mcp", "test-execution", "Generated Tests", Tone::Indigo),
];

pub const LEGEND: [LegendEntry; 4] = [
    LegendEntry { label: "User Interface", tone: Tone::Purple },
    LegendEntry { label: "Data Sources", tone: Tone::Blue },
    LegendEntry { label: "AI Processing", tone: Tone::Pink },
    LegendEntry { label: "Test Generation", tone: Tone::Green },
];

/// One horizontal band of the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub category: Category,
    pub title: &'static str,
    pub icon: Icon,
    pub tone: Tone,
    /// Grid width for the cards, capped at five.
    pub columns: usize,
    pub nodes: Vec<Node>,
    /// Edges leaving a node of this layer, in edge-list order.
    pub outgoing: Vec<Edge>,
    /// Whether a downward marker follows this layer.
    pub connects_to_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub layers: Vec<Layer>,
    pub legend: Vec<LegendEntry>,
}

impl Layout {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.layers.iter().flat_map(|l| &l.nodes).find(|n| n.id == id)
    }
}

/// Group `nodes` into layers in [`Category::ORDER`]. Empty categories are
/// skipped; node order within a layer follows the input.
#[must_use]
pub fn layout(nodes: &[Node], edges: &[Edge], legend: &[LegendEntry]) -> Layout {
    let mut layers: Vec<Layer> = Category::ORDER
        .into_iter()
        .filter_map(|category| {
            let members: Vec<Node> = nodes.iter().filter(|n| n.category == category).copied().collect();
            if members.is_empty() {
                return None;
            }
            let outgoing = edges.iter().filter(|e| members.iter().any(|n| n.id == e.from)).copied().collect();
            Some(Layer {
                category,
                title: category.title(),
                icon: category.icon(),
                tone: category.tone(),
                columns: members.len().min(MAX_COLUMNS),
                nodes: members,
                outgoing,
                connects_to_next: true,
            })
        })
        .collect();

    if let Some(last) = layers.last_mut() {
        last.connects_to_next = false;
    }

    Layout { layers, legend: legend.to_vec() }
}

/// Layout of the built-in node and edge lists.
#[must_use]
pub fn default_layout() -> Layout {
    layout(&NODES, &EDGES, &LEGEND)
}

#[cfg(test)]
#[path = "architecture_test.rs"]
mod architecture_test;
