//! "Process Flow Sequence" diagram.
//!
//! On mount the container is cleared, the fixed definition is rendered under
//! a fresh `mermaid-<uuid>` id and the SVG is injected. A render failure
//! leaves the container empty and is only logged.

use leptos::prelude::*;
use workflow::sequence::SEQUENCE_LEGEND;

use crate::components::component_diagram::Legend;

#[cfg(feature = "hydrate")]
use workflow::sequence::{diagram_id, process_flow_renderer, render_process_flow};

#[component]
pub fn SequenceDiagram() -> impl IntoView {
    let diagram_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let Some(container) = diagram_ref.get() else {
            return;
        };
        container.set_inner_html("");
        let id = diagram_id(uuid::Uuid::new_v4().simple());
        match render_process_flow(&process_flow_renderer(), &id) {
            Ok(svg) => container.set_inner_html(&svg),
            Err(err) => log::warn!("sequence diagram render failed: {err}"),
        }
    });

    view! {
        <div class="w-full mx-auto">
            <div class="bg-gradient-to-br from-background to-secondary/20 border border-border rounded-xl p-6">
                <div
                    node_ref=diagram_ref
                    class="sequence-diagram w-full overflow-x-auto bg-background rounded-lg p-4 border"
                    style="min-height: 400px"
                ></div>
                <Legend
                    entries=SEQUENCE_LEGEND.to_vec()
                    class="mt-4 grid grid-cols-2 md:grid-cols-3 gap-3 text-xs"
                />
            </div>
        </div>
    }
}
