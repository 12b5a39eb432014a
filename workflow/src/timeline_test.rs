use super::*;

#[test]
fn default_offsets_match_the_scripted_schedule() {
    let config = TimelineConfig::default();
    assert!(config.validate().is_ok());

    let offsets: Vec<u64> = (0..TOTAL_STEPS).filter_map(|i| config.step_offset_ms(i)).collect();
    assert_eq!(offsets, [2500, 4500, 6500, 8500, 10000, 12000, 14000, 16000]);
    assert_eq!(config.step_offset_ms(TOTAL_STEPS), None);

    assert_eq!(config.run_length_ms(), 16000);
    assert_eq!(config.cycle_ms(), 20000);
}

#[test]
fn first_step_delay_includes_lead_in() {
    let config = TimelineConfig::default();
    assert_eq!(config.step_delay_ms(0), Some(2500));
    assert_eq!(config.step_delay_ms(4), Some(1500));
    assert_eq!(config.step_delay_ms(TOTAL_STEPS), None);
}

#[test]
fn validate_rejects_zero_length_steps() {
    let mut config = TimelineConfig::default();
    config.step_durations_ms[3] = 0;
    assert_eq!(config.validate(), Err(TimelineError::ZeroDuration { index: 3 }));
}

#[test]
fn with_speed_scales_every_delay() {
    let fast = TimelineConfig::default().with_speed(10.0).unwrap();
    assert_eq!(fast.lead_in_ms, 50);
    assert_eq!(fast.step_durations_ms[4], 150);
    assert_eq!(fast.settle_ms, 100);
    assert_eq!(fast.replay_ms, 300);

    let absurd = TimelineConfig::default().with_speed(1e9).unwrap();
    assert!(absurd.validate().is_ok());
}

#[test]
fn with_speed_rejects_non_positive_speeds() {
    for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(TimelineConfig::default().with_speed(speed), Err(TimelineError::InvalidSpeed(_))));
    }
}

#[test]
fn script_only_moves_states_forward() {
    let mut states = crate::stage::StageStates::default();
    for step in &SCRIPT {
        for w in step.writes {
            assert!(states.get(w.stage).can_transition_to(w.state), "{:?} -> {:?}", w.stage, w.state);
            states.set(w.stage, w.state);
        }
    }
    assert!(states.iter().all(|(_, s)| s == VisualState::Success));
}

#[test]
fn script_ends_by_clearing_the_label() {
    assert_eq!(SCRIPT[0].processing, ProcessingUpdate::Set(Stage::DataConnectors));
    assert_eq!(SCRIPT[5].processing, ProcessingUpdate::Keep);
    assert_eq!(SCRIPT[TOTAL_STEPS - 1].processing, ProcessingUpdate::Clear);
}
