//! View state for the interactive workflow.
//!
//! DESIGN
//! ======
//! The orchestrator lives outside the reactive graph. After every transition
//! the pipeline publishes a [`Snapshot`] into one signal; everything the
//! cards, beams and banner show is derived from that snapshot here.

#[cfg(test)]
#[path = "workflow_test.rs"]
mod workflow_test;

use workflow::beam::BeamSpec;
use workflow::consts::TOTAL_STEPS;
use workflow::{Snapshot, Stage, VisualState};

pub const COMPLETE_CAPTION: &str = "TestWise workflow complete! Tests generated and executed.";

/// Status line under the progress dots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Hidden,
    Processing(&'static str),
    Complete,
}

/// Latest published orchestrator state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkflowState {
    pub snapshot: Snapshot,
}

impl WorkflowState {
    #[must_use]
    pub fn stage(&self, stage: Stage) -> VisualState {
        self.snapshot.states.get(stage)
    }

    #[must_use]
    pub fn step(&self) -> usize {
        self.snapshot.step
    }

    #[must_use]
    pub fn beam_active(&self, beam: &BeamSpec) -> bool {
        beam.is_active(self.snapshot.step)
    }

    #[must_use]
    pub fn banner(&self) -> Banner {
        if self.snapshot.complete {
            return Banner::Complete;
        }
        self.snapshot
            .processing
            .and_then(|stage| stage.meta().status_caption)
            .map_or(Banner::Hidden, Banner::Processing)
    }

    /// Indices `0..TOTAL_STEPS` of the progress dots.
    pub fn dots() -> impl Iterator<Item = usize> {
        0..TOTAL_STEPS
    }
}
