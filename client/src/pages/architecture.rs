//! Architecture section: interactive workflow, solution diagram, sequence flow.

use leptos::prelude::*;

use crate::components::component_diagram::ComponentDiagram;
use crate::components::sequence_diagram::SequenceDiagram;
use crate::components::workflow_pipeline::WorkflowPipeline;

#[cfg(feature = "hydrate")]
use workflow::consts::RESTART_REARM_MS;

#[component]
fn SectionHeading(title: &'static str, blurb: &'static str) -> impl IntoView {
    view! {
        <div class="text-center mb-8">
            <h3 class="text-3xl font-bold mb-3">{title}</h3>
            <p class="text-lg text-muted-foreground max-w-2xl mx-auto">{blurb}</p>
        </div>
    }
}

#[component]
pub fn ArchitecturePage() -> impl IntoView {
    // Lowered then raised again so the pipeline sees a rising edge.
    let force_restart = RwSignal::new(true);

    let on_restart = move |_| {
        force_restart.set(false);
        #[cfg(feature = "hydrate")]
        gloo_timers::callback::Timeout::new(RESTART_REARM_MS, move || {
            force_restart.try_set(true);
        })
        .forget();
    };

    view! {
        <section id="architecture" class="py-20 bg-muted/30">
            <div class="container mx-auto px-6">
                <div class="mb-20">
                    <SectionHeading
                        title="Interactive Workflow"
                        blurb="Watch the animated flow of data through TestWise components with real-time state indicators"
                    />
                    <div class="rounded-xl border-2 bg-card">
                        <div class="p-6 flex justify-between items-start">
                            <div>
                                <h4 class="text-2xl font-semibold">"Live Component Workflow"</h4>
                                <p class="text-muted-foreground mt-2">
                                    "Interactive animation showing data flow, processing states, and component interactions"
                                </p>
                            </div>
                            <button
                                class="px-4 py-2 bg-primary text-primary-foreground rounded-lg hover:bg-primary/90 transition-colors duration-200 text-sm font-medium"
                                on:click=on_restart
                            >
                                "↻ Restart Animation"
                            </button>
                        </div>
                        <div class="px-6 pb-6">
                            <div class="bg-muted/50 rounded-lg p-8 overflow-x-auto">
                                <WorkflowPipeline force_restart=force_restart />
                            </div>
                        </div>
                    </div>
                </div>

                <div class="mb-20">
                    <SectionHeading
                        title="Solution Architecture"
                        blurb="Explore the modular components that make up TestWise's intelligent testing ecosystem"
                    />
                    <div class="rounded-xl border-2 bg-card p-8">
                        <ComponentDiagram />
                    </div>
                </div>

                <div class="mb-20">
                    <SectionHeading
                        title="Process Flow Sequence"
                        blurb="Step-by-step sequence diagram showing the complete TestWise workflow from user input to test execution"
                    />
                    <div class="p-8 overflow-x-auto">
                        <SequenceDiagram />
                    </div>
                </div>
            </div>
        </section>
    }
}
