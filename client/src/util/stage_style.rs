//! Class and indicator selection for workflow stage cards.
//!
//! Pure functions of a stage's color group and visual state, kept out of the
//! components so they can be tested natively.

#[cfg(test)]
#[path = "stage_style_test.rs"]
mod stage_style_test;

use workflow::VisualState;
use workflow::palette::ColorGroup;

const CARD_BASE: &str = "p-4 rounded-lg border-2 transition-all duration-500";
const HIGHLIGHT: &str = "shadow-lg scale-105";
const SUCCESS: &str = "border-green-300 bg-green-50";

/// Full class list for a stage card.
#[must_use]
pub fn card_class(color: ColorGroup, state: VisualState) -> String {
    let palette = format!("{} {}", color.border_class(), color.bg_class());
    match state {
        VisualState::Loading => format!("{CARD_BASE} {palette} {HIGHLIGHT}"),
        VisualState::Success => format!("{CARD_BASE} {SUCCESS} {HIGHLIGHT}"),
        VisualState::Idle => format!("{CARD_BASE} {palette}"),
        VisualState::Error => format!("{CARD_BASE} {palette} stage-card--error"),
    }
}

/// Small marker drawn next to the stage icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateIndicator {
    Spinner,
    GreenDot,
    RedSquare,
}

#[must_use]
pub fn indicator(state: VisualState) -> Option<StateIndicator> {
    match state {
        VisualState::Idle => None,
        VisualState::Loading => Some(StateIndicator::Spinner),
        VisualState::Success => Some(StateIndicator::GreenDot),
        VisualState::Error => Some(StateIndicator::RedSquare),
    }
}

impl StateIndicator {
    /// Outer element classes.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Spinner => "w-4 h-4 ml-2 animate-spin border-2 border-blue-500 border-t-transparent rounded-full",
            Self::GreenDot => "w-4 h-4 ml-2 bg-green-500 rounded-full flex items-center justify-center",
            Self::RedSquare => "w-4 h-4 ml-2 bg-red-500 flex items-center justify-center",
        }
    }

    /// Inner mark classes, if the indicator has one.
    #[must_use]
    pub const fn inner_class(self) -> Option<&'static str> {
        match self {
            Self::Spinner => None,
            Self::GreenDot => Some("w-2 h-2 bg-white rounded-full"),
            Self::RedSquare => Some("w-2 h-2 bg-white"),
        }
    }
}

/// One dot of the eight-step progress indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotStatus {
    Done,
    Current,
    Pending,
}

#[must_use]
pub fn dot_status(index: usize, step: usize) -> DotStatus {
    match index.cmp(&step) {
        std::cmp::Ordering::Less => DotStatus::Done,
        std::cmp::Ordering::Equal => DotStatus::Current,
        std::cmp::Ordering::Greater => DotStatus::Pending,
    }
}

#[must_use]
pub fn dot_class(status: DotStatus) -> &'static str {
    match status {
        DotStatus::Done => "w-3 h-3 rounded-full transition-all duration-300 bg-green-500",
        DotStatus::Current => "w-3 h-3 rounded-full transition-all duration-300 bg-blue-500 animate-pulse",
        DotStatus::Pending => "w-3 h-3 rounded-full transition-all duration-300 bg-gray-300",
    }
}
