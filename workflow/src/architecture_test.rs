use std::collections::HashSet;

use super::*;

#[test]
fn layers_follow_category_order() {
    let layout = default_layout();
    let order: Vec<Category> = layout.layers.iter().map(|l| l.category).collect();
    assert_eq!(order, Category::ORDER);

    let titles: Vec<&str> = layout.layers.iter().map(|l| l.title).collect();
    assert_eq!(
        titles,
        [
            "User Interface",
            "Data Sources",
            "AI Processing Engine",
            "Azure DevOps Test Cases",
            "Configuration & MCP Integration",
            "Test Generation & Execution",
        ]
    );
}

#[test]
fn every_node_lands_in_exactly_one_layer() {
    let layout = default_layout();
    let placed: usize = layout.layers.iter().map(|l| l.nodes.len()).sum();
    assert_eq!(placed, NODES.len());

    let data_sources = &layout.layers[1];
    assert_eq!(data_sources.nodes.len(), 5);
    assert_eq!(data_sources.columns, 5);
    assert_eq!(data_sources.nodes[0].id, "teams");
    assert_eq!(data_sources.nodes[4].id, "sharepoint");
}

#[test]
fn edges_reference_known_nodes() {
    let ids: HashSet<&str> = NODES.iter().map(|n| n.id).collect();
    assert_eq!(ids.len(), NODES.len(), "node ids must be unique");
    for edge in &EDGES {
        assert!(ids.contains(edge.from), "unknown source {}", edge.from);
        assert!(ids.contains(edge.to), "unknown target {}", edge.to);
    }
}

#[test]
fn outgoing_edges_are_grouped_by_source_layer() {
    let layout = default_layout();
    let total: usize = layout.layers.iter().map(|l| l.outgoing.len()).sum();
    assert_eq!(total, EDGES.len());

    let ui = &layout.layers[0];
    assert_eq!(ui.outgoing.len(), 6);
    assert_eq!(ui.outgoing[5].label, Some("Selects Work Item"));

    let output = layout.layers.last().unwrap();
    assert_eq!(output.outgoing.len(), 1);
    assert_eq!(output.outgoing[0].label, Some("Generated Tests"));
}

#[test]
fn only_the_last_layer_has_no_marker() {
    let layout = default_layout();
    let markers: Vec<bool> = layout.layers.iter().map(|l| l.connects_to_next).collect();
    assert_eq!(markers, [true, true, true, true, true, false]);
}

#[test]
fn layout_is_deterministic() {
    assert_eq!(default_layout(), default_layout());
}

#[test]
fn empty_categories_are_skipped() {
    let nodes: Vec<Node> = NODES.iter().filter(|n| n.category != Category::Config).copied().collect();
    let layout = layout(&nodes, &EDGES, &LEGEND);
    assert_eq!(layout.layers.len(), 5);
    assert!(layout.layers.iter().all(|l| l.category != Category::Config));
    assert!(layout.node("ado-mcp").is_none());
    assert_eq!(layout.node("ai-engine").map(|n| n.tone), Some(Tone::Pink));
}

#[test]
fn legend_and_json_shape() {
    let layout = default_layout();
    let labels: Vec<&str> = layout.legend.iter().map(|e| e.label).collect();
    assert_eq!(labels, ["User Interface", "Data Sources", "AI Processing", "Test Generation"]);

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["layers"][0]["category"], "ui");
    assert_eq!(json["layers"][1]["category"], "datasource");
    assert_eq!(json["layers"][0]["nodes"][0]["tone"], "purple");
}
