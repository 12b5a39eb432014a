use clap::CommandFactory;
use workflow::stage::VisualState;

use super::*;

fn at_ms(event: &TimelineEvent) -> u64 {
    match event {
        TimelineEvent::Step { at_ms, .. } | TimelineEvent::Settled { at_ms, .. } | TimelineEvent::Replayed { at_ms, .. } => {
            *at_ms
        }
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn zero_runs_are_rejected() {
    assert!(Cli::try_parse_from(["testwise", "timeline", "--runs", "0"]).is_err());
    assert!(Cli::try_parse_from(["testwise", "timeline", "--runs", "2", "--speed", "4"]).is_ok());
}

#[test]
fn single_run_ends_when_settled() {
    let events = simulate(TimelineConfig::default(), 1);
    assert_eq!(events.len(), 9);
    let times: Vec<u64> = events.iter().map(at_ms).collect();
    assert_eq!(times, vec![2500, 4500, 6500, 8500, 10000, 12000, 14000, 16000, 17000]);
    assert_eq!(events.last(), Some(&TimelineEvent::Settled { at_ms: 17000, run: RunId(1) }));
}

#[test]
fn second_run_follows_the_replay() {
    let events = simulate(TimelineConfig::default(), 2);
    assert_eq!(events.len(), 19);
    assert_eq!(events[9], TimelineEvent::Replayed { at_ms: 20000, run: RunId(2) });
    assert!(matches!(events[10], TimelineEvent::Step { at_ms: 22500, run: RunId(2), step: 1, .. }));
}

#[test]
fn step_events_carry_writes_and_label() {
    let events = simulate(TimelineConfig::default(), 1);
    let TimelineEvent::Step { writes, processing, .. } = &events[1] else {
        panic!("expected a step event");
    };
    assert_eq!(
        writes,
        &vec![
            StageWrite { stage: Stage::DataConnectors, state: VisualState::Success },
            StageWrite { stage: Stage::AIEngine, state: VisualState::Loading },
        ]
    );
    assert_eq!(*processing, Some(Stage::AIEngine));

    let TimelineEvent::Step { processing, .. } = &events[7] else {
        panic!("expected a step event");
    };
    assert_eq!(*processing, None);
}

#[test]
fn speed_scales_event_times() {
    let config = TimelineConfig::default().with_speed(2.0).unwrap();
    let events = simulate(config, 1);
    assert_eq!(events.first().map(at_ms), Some(1250));
    assert_eq!(events.last().map(at_ms), Some(8500));
}

#[test]
fn end_time_matches_the_last_settle() {
    assert_eq!(simulation_end_ms(&TimelineConfig::default(), 1), 17000);
    assert_eq!(simulation_end_ms(&TimelineConfig::default(), 3), 57000);
}

#[test]
fn end_time_saturates_for_huge_runs() {
    let slow = TimelineConfig { lead_in_ms: u32::MAX, step_durations_ms: [u32::MAX; 8], settle_ms: u32::MAX, replay_ms: u32::MAX };
    assert_eq!(simulation_end_ms(&slow, u32::MAX), u64::MAX);

    let fast = TimelineConfig::default().with_speed(1e9).unwrap();
    assert!(simulation_end_ms(&fast, u32::MAX) >= u64::from(u32::MAX));
}

#[test]
fn step_line_lists_writes_and_processing() {
    let events = simulate(TimelineConfig::default(), 1);
    assert_eq!(
        format_event(&events[1]),
        "   4500ms  run 1  step 2/8  DataConnectors=success AIEngine=loading  processing=AIEngine"
    );
    assert_eq!(format_event(&events[8]), "  17000ms  run 1  settled");
}

#[test]
fn json_events_are_tagged() {
    let events = simulate(TimelineConfig::default(), 1);
    let value = serde_json::to_value(&events[8]).unwrap();
    assert_eq!(value["event"], "settled");
    assert_eq!(value["run"], 1);
}

#[test]
fn sequence_renders_svg() {
    let svg = render_sequence("mermaid-cli").unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("mermaid-cli"));
}

#[test]
fn sequence_rejects_bad_id() {
    assert!(matches!(render_sequence("1 bad"), Err(CliError::Render(_))));
}

#[test]
fn architecture_json_lists_layers() {
    let json = architecture_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["layers"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["legend"].as_array().map(Vec::len), Some(4));
}
