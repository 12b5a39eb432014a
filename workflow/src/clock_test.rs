use super::*;
use crate::orchestrator::Phase;

#[test]
fn advance_delivers_due_timers_in_order() {
    let mut sim = Simulation::new(TimelineConfig::default());
    sim.start();
    assert_eq!(sim.pending_timers(), 1);

    assert_eq!(sim.advance(2499), 0);
    assert_eq!(sim.machine().step(), 0);

    assert_eq!(sim.advance(1), 1);
    assert_eq!(sim.now_ms(), 2500);
    assert_eq!(sim.machine().step(), 1);

    // Two more steps fall due by 6500.
    assert_eq!(sim.advance_to(6500), 2);
    assert_eq!(sim.machine().step(), 3);
    let times: Vec<u64> = sim.trace().iter().map(|t| t.at_ms).collect();
    assert_eq!(times, [2500, 4500, 6500]);
}

#[test]
fn restart_drops_the_queued_timer() {
    let mut sim = Simulation::new(TimelineConfig::default());
    sim.start();
    sim.advance(1000);
    sim.start();
    assert_eq!(sim.pending_timers(), 1);

    // The first run's step would have fired at 2500.
    sim.advance_to(3000);
    assert_eq!(sim.machine().step(), 0);
    sim.advance_to(3500);
    assert_eq!(sim.machine().step(), 1);
}

#[test]
fn teardown_empties_the_queue() {
    let mut sim = Simulation::new(TimelineConfig::default());
    sim.start();
    sim.teardown();
    assert_eq!(sim.pending_timers(), 0);
    assert_eq!(sim.advance(60_000), 0);
    assert_eq!(sim.machine().phase(), Phase::Disposed);
}

#[test]
fn take_trace_drains() {
    let mut sim = Simulation::new(TimelineConfig::default());
    sim.start();
    sim.advance(2500);
    assert_eq!(sim.take_trace().len(), 1);
    assert!(sim.trace().is_empty());
}

#[test]
fn next_due_tracks_the_armed_timer() {
    let mut sim = Simulation::new(TimelineConfig::default());
    assert_eq!(sim.next_due_ms(), None);
    sim.start();
    assert_eq!(sim.next_due_ms(), Some(2500));
    sim.advance_to(2500);
    assert_eq!(sim.next_due_ms(), Some(4500));
}
