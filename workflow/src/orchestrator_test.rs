use super::*;

fn running() -> (Orchestrator, Arm) {
    let mut machine = Orchestrator::default();
    let arm = machine.start().unwrap();
    (machine, arm)
}

#[test]
fn new_machine_is_idle() {
    let machine = Orchestrator::default();
    assert_eq!(machine.phase(), Phase::NotStarted);
    assert_eq!(machine.step(), 0);
    assert_eq!(machine.run_id(), RunId(0));
    assert!(machine.processing().is_none());
    assert!(!machine.is_animating());
    assert!(!machine.is_complete());
    assert!(!machine.has_pending_timer());
    assert_eq!(machine.beams().count(), 0);
}

#[test]
fn start_arms_first_step_with_lead_in() {
    let (machine, arm) = running();
    assert_eq!(arm.delay_ms, 2500);
    assert_eq!(arm.token.run(), RunId(1));
    assert_eq!(machine.phase(), Phase::Running);
    assert!(machine.is_animating());
}

#[test]
fn first_step_sets_loading_and_label() {
    let (mut machine, arm) = running();
    let fired = machine.fire(arm.token);

    let Fired::Step { run, step, writes, next } = fired else {
        panic!("expected a step, got {fired:?}");
    };
    assert_eq!(run, RunId(1));
    assert_eq!(step, 0);
    assert_eq!(writes.len(), 1);
    assert_eq!(next.map(|a| a.delay_ms), Some(2000));

    assert_eq!(machine.step(), 1);
    assert_eq!(machine.state(Stage::DataConnectors), VisualState::Loading);
    assert_eq!(machine.processing(), Some(Stage::DataConnectors));
    assert_eq!(machine.beams().count(), 1);
}

#[test]
fn full_run_settles_then_replays() {
    let (mut machine, mut arm) = running();
    for expected_step in 1..=TOTAL_STEPS {
        let fired = machine.fire(arm.token);
        assert_eq!(machine.step(), expected_step);
        arm = fired.next().unwrap();
    }

    // After the last step the settle delay is armed and the label is cleared.
    assert_eq!(arm.delay_ms, 1000);
    assert!(machine.processing().is_none());
    assert!(machine.is_animating());
    assert!(!machine.is_complete());
    assert!(machine.states().iter().all(|(_, s)| s == VisualState::Success));

    let settled = machine.fire(arm.token);
    assert!(matches!(settled, Fired::Settled { run: RunId(1), .. }));
    assert!(machine.is_complete());
    assert!(!machine.is_animating());
    let replay = settled.next().unwrap();
    assert_eq!(replay.delay_ms, 3000);

    let replayed = machine.fire(replay.token);
    assert!(matches!(replayed, Fired::Replayed { run: RunId(2), .. }));
    assert_eq!(machine.step(), 0);
    assert_eq!(machine.phase(), Phase::Running);
    assert!(machine.states().iter().all(|(_, s)| s == VisualState::Idle));
    assert_eq!(replayed.next().map(|a| a.delay_ms), Some(2500));
}

#[test]
fn restart_supersedes_the_running_timeline() {
    let (mut machine, first) = running();
    let fired = machine.fire(first.token);
    let old_next = fired.next().unwrap();

    let fresh = machine.start().unwrap();
    assert_eq!(machine.run_id(), RunId(2));
    assert_eq!(machine.step(), 0);
    assert_eq!(machine.state(Stage::DataConnectors), VisualState::Idle);
    assert!(machine.processing().is_none());

    // A callback from the old run is ignored.
    assert_eq!(machine.fire(old_next.token), Fired::Stale);
    assert_eq!(machine.step(), 0);

    assert!(matches!(machine.fire(fresh.token), Fired::Step { run: RunId(2), step: 0, .. }));
}

#[test]
fn token_is_single_use() {
    let (mut machine, arm) = running();
    assert!(matches!(machine.fire(arm.token), Fired::Step { .. }));
    assert_eq!(machine.fire(arm.token), Fired::Stale);
    assert_eq!(machine.step(), 1);
}

#[test]
fn teardown_is_terminal() {
    let (mut machine, arm) = running();
    machine.teardown();
    assert_eq!(machine.phase(), Phase::Disposed);
    assert!(!machine.has_pending_timer());

    assert_eq!(machine.fire(arm.token), Fired::Stale);
    assert_eq!(machine.step(), 0);
    assert!(machine.start().is_none());
    assert_eq!(machine.phase(), Phase::Disposed);

    machine.teardown();
    assert_eq!(machine.phase(), Phase::Disposed);
}

#[test]
fn snapshot_mirrors_accessors() {
    let (mut machine, arm) = running();
    machine.fire(arm.token);
    let snap = machine.snapshot();
    assert_eq!(snap.run, machine.run_id());
    assert_eq!(snap.step, 1);
    assert_eq!(snap.states, *machine.states());
    assert_eq!(snap.processing, Some(Stage::DataConnectors));
    assert!(snap.animating);
    assert!(!snap.complete);

    assert_eq!(Snapshot::default().phase, Phase::NotStarted);
}

#[test]
fn custom_config_drives_delays() {
    let config = TimelineConfig { lead_in_ms: 0, step_durations_ms: [1; TOTAL_STEPS], settle_ms: 5, replay_ms: 7 };
    let mut machine = Orchestrator::new(config);
    let mut arm = machine.start().unwrap();
    assert_eq!(arm.delay_ms, 1);
    for _ in 0..TOTAL_STEPS {
        arm = machine.fire(arm.token).next().unwrap();
    }
    assert_eq!(arm.delay_ms, 5);
    assert_eq!(machine.fire(arm.token).next().map(|a| a.delay_ms), Some(7));
}
