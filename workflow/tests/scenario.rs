//! End-to-end runs of the orchestrator under virtual time.

use workflow::beam::BEAMS;
use workflow::clock::Simulation;
use workflow::consts::TOTAL_STEPS;
use workflow::orchestrator::Arm;
use workflow::{Driver, Fired, Phase, Stage, TimelineConfig, TimerHost, VisualState};

fn sim() -> Simulation {
    Simulation::new(TimelineConfig::default())
}

#[test]
fn scripted_timeline_hits_every_milestone() {
    let mut sim = sim();
    sim.start();

    sim.advance_to(2499);
    assert_eq!(sim.machine().state(Stage::DataConnectors), VisualState::Idle);

    sim.advance_to(2500);
    assert_eq!(sim.machine().state(Stage::DataConnectors), VisualState::Loading);
    assert_eq!(sim.machine().processing(), Some(Stage::DataConnectors));

    sim.advance_to(4500);
    assert_eq!(sim.machine().state(Stage::DataConnectors), VisualState::Success);
    assert_eq!(sim.machine().state(Stage::AIEngine), VisualState::Loading);

    sim.advance_to(15_999);
    assert_eq!(sim.machine().step(), TOTAL_STEPS - 1);

    sim.advance_to(16_000);
    assert_eq!(sim.machine().step(), TOTAL_STEPS);
    assert!(sim.machine().states().iter().all(|(_, s)| s == VisualState::Success));
    assert!(sim.machine().processing().is_none());
    assert!(!sim.machine().is_complete());

    sim.advance_to(17_000);
    assert!(sim.machine().is_complete());
    assert!(!sim.machine().is_animating());

    sim.advance_to(20_000);
    assert_eq!(sim.machine().phase(), Phase::Running);
    assert_eq!(sim.machine().step(), 0);
    assert_eq!(sim.machine().run_id().0, 2);
    assert!(sim.machine().states().iter().all(|(_, s)| s == VisualState::Idle));

    let times: Vec<u64> = sim.trace().iter().map(|t| t.at_ms).collect();
    assert_eq!(times, [2500, 4500, 6500, 8500, 10_000, 12_000, 14_000, 16_000, 17_000, 20_000]);
}

#[test]
fn step_is_monotonic_within_a_run_and_transitions_are_legal() {
    let mut sim = sim();
    sim.start();
    let mut last_step = 0;
    let mut last_states = *sim.machine().states();

    for _ in 0..16_000 / 250 {
        sim.advance(250);
        let machine = sim.machine();
        assert!(machine.step() >= last_step);
        for (stage, state) in machine.states().iter() {
            let before = last_states.get(stage);
            assert!(before == state || before.can_transition_to(state), "{stage}: {before:?} -> {state:?}");
        }
        last_step = machine.step();
        last_states = *machine.states();
    }
    assert_eq!(last_step, TOTAL_STEPS);
}

#[test]
fn beams_latch_at_their_thresholds() {
    let mut sim = sim();
    sim.start();
    for step in 1..=TOTAL_STEPS {
        let delay = sim.machine().config().step_delay_ms(step - 1).unwrap_or(0);
        sim.advance(u64::from(delay));
        assert_eq!(sim.machine().step(), step);
        let lit = sim.machine().beams().count();
        let expected = BEAMS.iter().filter(|b| b.threshold <= step).count();
        assert_eq!(lit, expected, "step {step}");
    }
    assert_eq!(sim.machine().beams().count(), BEAMS.len());
}

#[test]
fn restart_mid_run_leaves_no_ghost_writes() {
    let mut sim = sim();
    sim.start();
    sim.advance_to(5000);
    assert_eq!(sim.machine().step(), 2);

    sim.start();
    sim.take_trace();

    // Run 1 would have applied step 3 at 6500.
    sim.advance_to(7499);
    assert_eq!(sim.machine().step(), 0);
    assert!(sim.machine().states().iter().all(|(_, s)| s == VisualState::Idle));
    assert!(sim.trace().is_empty());

    sim.advance_to(7500);
    assert_eq!(sim.machine().step(), 1);
    assert!(sim.trace().iter().all(|t| matches!(t.fired, Fired::Step { run, .. } if run.0 == 2)));
}

#[test]
fn no_writes_after_teardown() {
    let mut sim = sim();
    sim.start();
    sim.advance_to(9000);
    let frozen = sim.machine().snapshot();

    sim.teardown();
    assert_eq!(sim.advance(60_000), 0);
    assert_eq!(sim.machine().phase(), Phase::Disposed);
    assert_eq!(sim.machine().step(), frozen.step);
    assert_eq!(*sim.machine().states(), frozen.states);

    sim.start();
    assert_eq!(sim.pending_timers(), 0);
}

/// A host that cannot cancel: every armed timer eventually fires.
#[derive(Default)]
struct LeakyHost {
    armed: Vec<Arm>,
}

impl TimerHost for LeakyHost {
    type Handle = ();

    fn arm(&mut self, arm: Arm) {
        self.armed.push(arm);
    }
}

#[test]
fn stale_tokens_are_harmless_without_cancellation() {
    let mut driver = Driver::new(TimelineConfig::default(), LeakyHost::default());
    driver.start();
    let first = driver.host_mut().armed[0];
    driver.start();

    // The leaked timer from run 1 arrives first.
    assert_eq!(driver.fire(first.token), Fired::Stale);
    assert_eq!(driver.machine().step(), 0);

    let live = driver.host_mut().armed[1];
    assert!(matches!(driver.fire(live.token), Fired::Step { step: 0, .. }));
    assert_eq!(driver.machine().state(Stage::DataConnectors), VisualState::Loading);

    driver.teardown();
    let late = driver.host_mut().armed[2];
    assert_eq!(driver.fire(late.token), Fired::Stale);
    assert_eq!(driver.machine().step(), 1);
}

#[test]
fn faster_speed_compresses_the_timeline() {
    let config = TimelineConfig::default().with_speed(2.0).unwrap();
    let mut sim = Simulation::new(config);
    sim.start();
    sim.advance_to(8000);
    assert_eq!(sim.machine().step(), TOTAL_STEPS);
}
