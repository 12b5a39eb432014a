//! The scripted eight-step timeline and its timing configuration.

use serde::Serialize;

use crate::consts::{LEAD_IN_MS, REPLAY_MS, SETTLE_MS, STEP_DURATIONS_MS, TOTAL_STEPS};
use crate::stage::{Stage, VisualState};

use Stage::{AIEngine, AzureDevOpsMCP, DataConnectors, ManualTestCases, PlaywrightMCP, TestConfig, TestExecution};
use VisualState::{Loading, Success};

/// Set one stage's visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageWrite {
    pub stage: Stage,
    pub state: VisualState,
}

const fn write(stage: Stage, state: VisualState) -> StageWrite {
    StageWrite { stage, state }
}

/// What a step does to the processing label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcessingUpdate {
    Keep,
    Set(Stage),
    Clear,
}

/// One atomic step: the writes applied together, then the label update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedStep {
    pub writes: &'static [StageWrite],
    pub processing: ProcessingUpdate,
}

pub const SCRIPT: [ScriptedStep; TOTAL_STEPS] = [
    ScriptedStep { writes: &[write(DataConnectors, Loading)], processing: ProcessingUpdate::Set(DataConnectors) },
    ScriptedStep {
        writes: &[write(DataConnectors, Success), write(AIEngine, Loading)],
        processing: ProcessingUpdate::Set(AIEngine),
    },
    ScriptedStep {
        writes: &[write(AIEngine, Success), write(ManualTestCases, Loading)],
        processing: ProcessingUpdate::Set(ManualTestCases),
    },
    ScriptedStep {
        writes: &[write(ManualTestCases, Success), write(AzureDevOpsMCP, Loading)],
        processing: ProcessingUpdate::Set(AzureDevOpsMCP),
    },
    ScriptedStep {
        writes: &[write(PlaywrightMCP, Loading), write(TestConfig, Loading)],
        processing: ProcessingUpdate::Set(PlaywrightMCP),
    },
    ScriptedStep {
        writes: &[write(AzureDevOpsMCP, Success), write(TestConfig, Success)],
        processing: ProcessingUpdate::Keep,
    },
    ScriptedStep {
        writes: &[write(PlaywrightMCP, Success), write(TestExecution, Loading)],
        processing: ProcessingUpdate::Set(TestExecution),
    },
    ScriptedStep { writes: &[write(TestExecution, Success)], processing: ProcessingUpdate::Clear },
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    #[error("step {index} has a zero duration")]
    ZeroDuration { index: usize },

    #[error("speed must be a positive finite number, got {0}")]
    InvalidSpeed(f64),
}

/// Delays driving one run, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineConfig {
    pub lead_in_ms: u32,
    pub step_durations_ms: [u32; TOTAL_STEPS],
    pub settle_ms: u32,
    pub replay_ms: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            lead_in_ms: LEAD_IN_MS,
            step_durations_ms: STEP_DURATIONS_MS,
            settle_ms: SETTLE_MS,
            replay_ms: REPLAY_MS,
        }
    }
}

impl TimelineConfig {
    /// Reject configurations that would collapse two steps onto one instant.
    ///
    /// # Errors
    ///
    /// [`TimelineError::ZeroDuration`] for the first zero-length step.
    pub fn validate(&self) -> Result<(), TimelineError> {
        match self.step_durations_ms.iter().position(|&d| d == 0) {
            Some(index) => Err(TimelineError::ZeroDuration { index }),
            None => Ok(()),
        }
    }

    /// Scale every delay by `1 / speed`. Step delays never drop below 1 ms.
    ///
    /// # Errors
    ///
    /// [`TimelineError::InvalidSpeed`] unless `speed` is finite and positive.
    pub fn with_speed(self, speed: f64) -> Result<Self, TimelineError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(TimelineError::InvalidSpeed(speed));
        }
        let scale = |ms: u32| scale_ms(ms, speed);
        Ok(Self {
            lead_in_ms: scale(self.lead_in_ms),
            step_durations_ms: self.step_durations_ms.map(|d| scale(d).max(1)),
            settle_ms: scale(self.settle_ms),
            replay_ms: scale(self.replay_ms),
        })
    }

    /// Delay armed before step `step` fires. The first step includes the lead-in.
    #[must_use]
    pub fn step_delay_ms(&self, step: usize) -> Option<u32> {
        let duration = *self.step_durations_ms.get(step)?;
        Some(if step == 0 { self.lead_in_ms.saturating_add(duration) } else { duration })
    }

    /// Time from `start()` until step `step` fires.
    #[must_use]
    pub fn step_offset_ms(&self, step: usize) -> Option<u64> {
        if step >= TOTAL_STEPS {
            return None;
        }
        let steps: u64 = self.step_durations_ms[..=step].iter().map(|&d| u64::from(d)).sum();
        Some(u64::from(self.lead_in_ms) + steps)
    }

    /// Time from `start()` until the last step fires.
    #[must_use]
    pub fn run_length_ms(&self) -> u64 {
        u64::from(self.lead_in_ms) + self.step_durations_ms.iter().map(|&d| u64::from(d)).sum::<u64>()
    }

    /// Time from `start()` until the automatic replay starts the next run.
    #[must_use]
    pub fn cycle_ms(&self) -> u64 {
        self.run_length_ms() + u64::from(self.settle_ms) + u64::from(self.replay_ms)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_ms(ms: u32, speed: f64) -> u32 {
    (f64::from(ms) / speed).round().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;
