use workflow::beam::BEAMS;
use workflow::clock::Simulation;
use workflow::TimelineConfig;

use super::*;

fn at(ms: u64) -> WorkflowState {
    let mut sim = Simulation::new(TimelineConfig::default());
    sim.start();
    sim.advance_to(ms);
    WorkflowState { snapshot: sim.machine().snapshot() }
}

#[test]
fn idle_state_shows_nothing() {
    let state = WorkflowState::default();
    assert_eq!(state.step(), 0);
    assert_eq!(state.banner(), Banner::Hidden);
    assert!(BEAMS.iter().all(|b| !state.beam_active(b)));
}

#[test]
fn banner_follows_processing_stage() {
    assert_eq!(at(2500).banner(), Banner::Processing("Collecting data from various sources..."));
    assert_eq!(at(4500).banner(), Banner::Processing("Processing with AI engine..."));
    // Step 6 keeps the Playwright label.
    assert_eq!(at(12_000).banner(), Banner::Processing("Generating Playwright tests..."));
}

#[test]
fn banner_hidden_between_last_step_and_settle() {
    let state = at(16_000);
    assert_eq!(state.step(), TOTAL_STEPS);
    assert_eq!(state.banner(), Banner::Hidden);
    assert_eq!(at(17_000).banner(), Banner::Complete);
}

#[test]
fn beams_match_step() {
    let state = at(6500);
    let lit: Vec<bool> = BEAMS.iter().map(|b| state.beam_active(b)).collect();
    assert_eq!(lit, [true, true, true, false, false, false, false]);
    assert_eq!(state.stage(Stage::ManualTestCases), VisualState::Loading);
}

#[test]
fn eight_dots() {
    assert_eq!(WorkflowState::dots().count(), 8);
}
