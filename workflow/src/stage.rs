//! Pipeline stages and their per-run visual state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The workflow illustration shows seven fixed stages plus a non-stateful
//! "User Interface" anchor card. Each stage carries static display metadata
//! and exactly one [`VisualState`] owned by the orchestrator.
//!
//! DESIGN
//! ======
//! Stages are a closed enum indexed `0..7`, so per-stage state lives in a
//! fixed array instead of a map and every stage always has a value.

use serde::Serialize;

use crate::palette::{ColorGroup, Icon, Tone};

pub const STAGE_COUNT: usize = 7;

/// One of the seven pipeline stages, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    DataConnectors,
    AIEngine,
    ManualTestCases,
    AzureDevOpsMCP,
    TestConfig,
    PlaywrightMCP,
    TestExecution,
}

impl Stage {
    pub const ALL: [Self; STAGE_COUNT] = [
        Self::DataConnectors,
        Self::AIEngine,
        Self::ManualTestCases,
        Self::AzureDevOpsMCP,
        Self::TestConfig,
        Self::PlaywrightMCP,
        Self::TestExecution,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable identity string; also the value reported as the processing label.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DataConnectors => "DataConnectors",
            Self::AIEngine => "AIEngine",
            Self::ManualTestCases => "ManualTestCases",
            Self::AzureDevOpsMCP => "AzureDevOpsMCP",
            Self::TestConfig => "TestConfig",
            Self::PlaywrightMCP => "PlaywrightMCP",
            Self::TestExecution => "TestExecution",
        }
    }

    #[must_use]
    pub const fn meta(self) -> &'static StageMeta {
        match self {
            Self::DataConnectors => &DATA_CONNECTORS,
            Self::AIEngine => &AI_ENGINE,
            Self::ManualTestCases => &MANUAL_TEST_CASES,
            Self::AzureDevOpsMCP => &AZURE_DEVOPS_MCP,
            Self::TestConfig => &TEST_CONFIG,
            Self::PlaywrightMCP => &PLAYWRIGHT_MCP,
            Self::TestExecution => &TEST_EXECUTION,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Static display metadata for a stage card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageMeta {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: Icon,
    /// Card border/background family and the color of beams leaving the card.
    pub color: ColorGroup,
    /// Icon tile accent. Differs from `color` for a few cards.
    pub icon_tone: Tone,
    /// Shown on the card while the stage is loading.
    pub loading_caption: &'static str,
    /// Shown in the status banner while the stage is the processing stage.
    /// `None` for stages that never become the processing stage.
    pub status_caption: Option<&'static str>,
}

/// The "User Interface" anchor card. It has no visual state.
pub const USER_INTERFACE: StageMeta = StageMeta {
    title: "User Interface",
    subtitle: "Microsoft Copilot Studio",
    icon: Icon::Bot,
    color: ColorGroup::Purple,
    icon_tone: Tone::Purple,
    loading_caption: "",
    status_caption: None,
};

const DATA_CONNECTORS: StageMeta = StageMeta {
    title: "Data Connectors",
    subtitle: "Teams, Emails, Audio, Video",
    icon: Icon::MessageSquare,
    color: ColorGroup::Blue,
    icon_tone: Tone::Blue,
    loading_caption: "Collecting data...",
    status_caption: Some("Collecting data from various sources..."),
};

const AI_ENGINE: StageMeta = StageMeta {
    title: "AI Processing Engine",
    subtitle: "NLP • ML Models • Risk Analysis",
    icon: Icon::Brain,
    color: ColorGroup::Pink,
    icon_tone: Tone::Pink,
    loading_caption: "Processing with AI...",
    status_caption: Some("Processing with AI engine..."),
};

const MANUAL_TEST_CASES: StageMeta = StageMeta {
    title: "Azure DevOps",
    subtitle: "Manual Test Cases",
    icon: Icon::FileText,
    color: ColorGroup::Green,
    icon_tone: Tone::Green,
    loading_caption: "Creating test cases...",
    status_caption: Some("Creating manual test cases..."),
};

const AZURE_DEVOPS_MCP: StageMeta = StageMeta {
    title: "Azure DevOps MCP",
    subtitle: "Test Cases Integration",
    icon: Icon::Settings,
    color: ColorGroup::Blue,
    icon_tone: Tone::Blue,
    loading_caption: "Pulling test cases...",
    status_caption: Some("Retrieving test case descriptions..."),
};

const TEST_CONFIG: StageMeta = StageMeta {
    title: "Test Configuration",
    subtitle: "URL, Browser, Env, Tags",
    icon: Icon::Database,
    color: ColorGroup::Green,
    icon_tone: Tone::Orange,
    loading_caption: "Pulling configuration...",
    status_caption: None,
};

const PLAYWRIGHT_MCP: StageMeta = StageMeta {
    title: "Playwright MCP",
    subtitle: "Automates tests from NL",
    icon: Icon::Code,
    color: ColorGroup::Blue,
    icon_tone: Tone::Indigo,
    loading_caption: "Generating tests...",
    status_caption: Some("Generating Playwright tests..."),
};

const TEST_EXECUTION: StageMeta = StageMeta {
    title: "Playwright Tests Execution",
    subtitle: "Using Build Pipeline",
    icon: Icon::Play,
    color: ColorGroup::Pink,
    icon_tone: Tone::Pink,
    loading_caption: "Running tests...",
    status_caption: Some("Executing Playwright tests..."),
};

/// Per-stage visual state within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    #[default]
    Idle,
    Loading,
    Success,
    /// Terminal failure marker. Never produced by the scripted timeline.
    Error,
}

impl VisualState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Forward transitions allowed within a single run. Resetting to `Idle`
    /// happens only through a new run and is not a transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Loading) | (Self::Loading, Self::Success) | (Self::Idle | Self::Loading, Self::Error)
        )
    }
}

/// The visual state of every stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageStates([VisualState; STAGE_COUNT]);

impl StageStates {
    #[must_use]
    pub const fn get(&self, stage: Stage) -> VisualState {
        self.0[stage.index()]
    }

    pub fn set(&mut self, stage: Stage, state: VisualState) {
        self.0[stage.index()] = state;
    }

    pub fn reset(&mut self) {
        self.0 = [VisualState::Idle; STAGE_COUNT];
    }

    /// `(stage, state)` pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, VisualState)> + '_ {
        Stage::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;
