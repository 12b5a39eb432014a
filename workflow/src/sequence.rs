//! The "Process Flow Sequence" diagram: its Mermaid definition, theme and legend.

use mermaid::{DiagramRenderer, RenderError, SequenceRenderer, Theme};

use crate::palette::{LegendEntry, Tone};

/// Nine participants, fifteen numbered messages and two notes.
pub const PROCESS_FLOW: &str = "\
sequenceDiagram
    %% Components / Participants
    participant User as User Interface (Copilot Studio)
    participant Copilot as Copilot Orchestrator
    participant AI as AI Processing Service
    participant Teams as Data Connectors (Teams, Emails, Audio, Video)
    participant ADO as Azure DevOps Service
    participant ADOMCP as Azure DevOps MCP Component
    participant Config as Test Configuration Component
    participant PWMCP as Playwright MCP Component
    participant Pipeline as Build Pipeline Service

    %% Flow
    User->>Copilot: 1️⃣ Select Work Item
    Copilot->>AI: 2️⃣ Trigger AI Processing Service

    AI->>Teams: 3️⃣ Fetch Context Data<br/>(Requirements, Conversations, Attachments)
    Teams-->>AI: 4️⃣ Return Enriched Context

    Note over AI: **AI Processing**<br/>Performs NLP, Dependency Detection,<br/>and Risk Analysis
    AI->>ADO: 5️⃣ Create Manual Test Case Artifacts

    ADO-->>Copilot: 6️⃣ Provide Test Case References
    Copilot-->>User: 7️⃣ Display Generated Test Cases

    Note over Copilot,ADOMCP: **Automation Flow Initiated**

    User->>Copilot: 8️⃣ Trigger Automation Workflow
    Copilot->>ADOMCP: 9️⃣ Invoke Azure DevOps MCP Component

    ADOMCP->>ADO: 🔟 Retrieve Test Case Items
    ADO-->>ADOMCP: 1️⃣1️⃣ Return Test Case Descriptions

    Config->>PWMCP: 1️⃣2️⃣ Provide Runtime Configurations<br/>(Browser, Environment, Tags)
    ADOMCP->>PWMCP: 1️⃣3️⃣ Send Test Cases + Configurations

    PWMCP->>Pipeline: 1️⃣4️⃣ Generate and Execute Playwright Tests
    Pipeline-->>User: 1️⃣5️⃣ Return Test Execution Results
";

pub const SEQUENCE_LEGEND: [LegendEntry; 6] = [
    LegendEntry { label: "User Actions", tone: Tone::Indigo },
    LegendEntry { label: "AI Processing", tone: Tone::Pink },
    LegendEntry { label: "Test Generation", tone: Tone::Blue },
    LegendEntry { label: "Data Flow", tone: Tone::Purple },
    LegendEntry { label: "Configuration", tone: Tone::Green },
    LegendEntry { label: "Test Execution", tone: Tone::Orange },
];

/// Theme matching the workflow card palette.
#[must_use]
pub fn process_flow_theme() -> Theme {
    Theme {
        primary_color: "#6C63FF".into(),
        primary_text_color: "#333".into(),
        primary_border_color: "#4C9AFF".into(),
        line_color: "#666".into(),
        secondary_color: "#C063FF".into(),
        tertiary_color: "#3DBE29".into(),
        background: "#ffffff".into(),
        main_bkg: "#ffffff".into(),
        second_bkg: "#f8f9fa".into(),
        tertiary_bkg: "#6C63FF".into(),
        actor_bkg: "#f8f9fa".into(),
        actor_border: "#333".into(),
        actor_text_color: "#333".into(),
        actor_line_color: "#666".into(),
        signal_color: "#333".into(),
        signal_text_color: "#333".into(),
        label_box_bkg_color: "#f8f9fa".into(),
        label_text_color: "#333".into(),
        loop_text_color: "#333".into(),
        note_border_color: "#4C9AFF".into(),
        note_bkg_color: "#e3f2fd".into(),
        note_text_color: "#333".into(),
        ..Theme::default()
    }
}

#[must_use]
pub fn process_flow_renderer() -> SequenceRenderer {
    SequenceRenderer::new(process_flow_theme())
}

/// Element id for one mount of the diagram, e.g. `mermaid-3f2a…`.
#[must_use]
pub fn diagram_id(unique: impl std::fmt::Display) -> String {
    format!("mermaid-{unique}")
}

/// Render [`PROCESS_FLOW`] with `renderer` under element id `id`.
///
/// # Errors
///
/// Propagates the renderer's [`RenderError`].
pub fn render_process_flow(renderer: &impl DiagramRenderer, id: &str) -> Result<String, RenderError> {
    renderer.render(id, PROCESS_FLOW)
}

#[cfg(test)]
#[path = "sequence_test.rs"]
mod sequence_test;
