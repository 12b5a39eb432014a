//! Static "Solution Architecture" diagram.
//!
//! Renders `workflow::architecture::default_layout()` as stacked layers with a
//! downward marker between them and a legend underneath. No state, no effects.

use leptos::prelude::*;
use workflow::architecture::{Category, Layer, Node, default_layout};
use workflow::palette::{Icon, LegendEntry};

use crate::components::icons::IconSvg;

/// Grid classes for a layer's cards.
fn grid_class(layer: &Layer) -> &'static str {
    match (layer.category, layer.columns) {
        (Category::DataSource, _) => "grid grid-cols-2 md:grid-cols-3 lg:grid-cols-5 gap-4",
        (Category::Config | Category::Output, _) => "grid grid-cols-1 md:grid-cols-2 gap-6 max-w-2xl mx-auto",
        (_, 1) => "flex justify-center",
        _ => "flex flex-wrap justify-center gap-6",
    }
}

#[component]
fn NodeCard(node: Node) -> impl IntoView {
    let size = if node.category == Category::DataSource { "w-5 h-5" } else { "w-6 h-6" };
    let tile = format!(
        "w-12 h-12 rounded-lg {} flex items-center justify-center mb-3 mx-auto shadow-sm",
        node.tone.tile_class()
    );
    let icon_class = format!("{size} {}", node.tone.icon_class());

    view! {
        <div class="relative group" data-node=node.id>
            <div class="p-4 rounded-lg border-2 border-gray-200 bg-white shadow-sm hover:shadow-md transition-all duration-300 hover:scale-105">
                <div class=tile>
                    <IconSvg icon=node.icon class=icon_class />
                </div>
                <h3 class="text-sm font-semibold text-center text-gray-800 mb-1">{node.title}</h3>
                {node.subtitle.map(|s| view! { <p class="text-xs text-center text-gray-600">{s}</p> })}
            </div>
        </div>
    }
}

#[component]
fn LayerView(layer: Layer) -> impl IntoView {
    let heading_icon = format!("w-5 h-5 {}", layer.tone.icon_class());
    let grid = grid_class(&layer);
    let connects = layer.connects_to_next;
    let cards = layer.nodes.into_iter().map(|node| view! { <NodeCard node=node /> }).collect_view();

    view! {
        <div class="text-center">
            <h3 class="text-lg font-semibold text-gray-800 mb-4 flex items-center justify-center gap-2">
                <IconSvg icon=layer.icon class=heading_icon />
                {layer.title}
            </h3>
            <div class=grid>{cards}</div>
        </div>
        {connects
            .then(|| {
                view! {
                    <div class="flex justify-center">
                        <IconSvg icon=Icon::ArrowDown class="w-6 h-6 text-red-500" />
                    </div>
                }
            })}
    }
}

#[component]
pub fn Legend(entries: Vec<LegendEntry>, #[prop(into)] class: String) -> impl IntoView {
    let items = entries
        .into_iter()
        .map(|entry| {
            let dot = format!("w-3 h-3 {} rounded-full", entry.tone.dot_class());
            view! {
                <div class="flex items-center gap-2 text-gray-600">
                    <div class=dot></div>
                    <span>{entry.label}</span>
                </div>
            }
        })
        .collect_view();

    view! { <div class=class>{items}</div> }
}

#[component]
pub fn ComponentDiagram() -> impl IntoView {
    let layout = default_layout();
    let layers = layout.layers.into_iter().map(|layer| view! { <LayerView layer=layer /> }).collect_view();

    view! {
        <div class="w-full max-w-6xl mx-auto">
            <div class="space-y-8">{layers}</div>
            <div class="mt-8 pt-6 border-t border-gray-200">
                <Legend entries=layout.legend class="grid grid-cols-2 md:grid-cols-4 gap-4 text-sm" />
            </div>
        </div>
    }
}
