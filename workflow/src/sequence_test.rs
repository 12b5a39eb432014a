use mermaid::ast::Event;

use super::*;

#[test]
fn process_flow_has_expected_shape() {
    let diagram = mermaid::parse(PROCESS_FLOW).unwrap();
    assert_eq!(diagram.participants.len(), 9);
    assert_eq!(diagram.message_count(), 15);

    let notes = diagram.events.iter().filter(|e| matches!(e, Event::Note(_))).count();
    assert_eq!(notes, 2);

    assert_eq!(diagram.participants[0].id, "User");
    assert_eq!(diagram.participants[0].label, "User Interface (Copilot Studio)");
    assert_eq!(diagram.participants[8].id, "Pipeline");
}

#[test]
fn process_flow_renders_with_theme() {
    let svg = render_process_flow(&process_flow_renderer(), "mermaid-test").unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"id="mermaid-test""#));
    assert!(svg.contains("#e3f2fd"), "note background");
    assert!(svg.contains("#f8f9fa"), "actor background");
    assert!(svg.contains("Automation Flow Initiated"));
    assert!(svg.contains("🔟 Retrieve Test Case Items"));
}

#[test]
fn each_mount_gets_its_own_id() {
    let a = diagram_id(1);
    let b = diagram_id(2);
    assert_ne!(a, b);
    assert!(a.starts_with("mermaid-"));
    assert!(render_process_flow(&process_flow_renderer(), &a).is_ok());
}

#[test]
fn renderer_failure_is_reported() {
    let err = render_process_flow(&process_flow_renderer(), "1-bad").unwrap_err();
    assert!(matches!(err, RenderError::InvalidId(_)));
}

#[test]
fn legend_lists_six_swatches() {
    let labels: Vec<&str> = SEQUENCE_LEGEND.iter().map(|e| e.label).collect();
    assert_eq!(
        labels,
        ["User Actions", "AI Processing", "Test Generation", "Data Flow", "Configuration", "Test Execution"]
    );
}
