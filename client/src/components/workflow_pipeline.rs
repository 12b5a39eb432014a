//! Interactive workflow illustration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hosts the `workflow` orchestrator in the browser: eight cards, seven beams,
//! the progress dots and the status banner. The orchestrator is the only
//! writer of stage state; this component publishes its snapshot into a signal
//! after every transition.
//!
//! DESIGN
//! ======
//! Three triggers funnel into the driver's single `start()`:
//! - a false→true edge of `force_restart` (including its initial `true`),
//! - the container first becoming 30% visible, if nothing has started yet,
//! - the orchestrator's own replay timer.
//!
//! Cleanup tears the driver down (dropping the pending timeout) and
//! disconnects the intersection observer.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use workflow::beam::{Anchor, BEAMS};
use workflow::stage::{STAGE_COUNT, USER_INTERFACE};
use workflow::{Stage, VisualState};

use crate::components::animated_beam::AnimatedBeam;
use crate::components::stage_card::StageCard;
use crate::state::workflow::{Banner, COMPLETE_CAPTION, WorkflowState};
use crate::util::stage_style::{dot_class, dot_status};

#[cfg(feature = "hydrate")]
use workflow::trigger::{RestartEdge, VisibilityTrigger};
#[cfg(feature = "hydrate")]
use workflow::{Driver, Fired, TimelineConfig};

#[cfg(feature = "hydrate")]
use crate::util::observers::{IntersectionGuard, observe_intersection};
#[cfg(feature = "hydrate")]
use crate::util::timers::GlooTimerHost;

type DivRef = NodeRef<leptos::html::Div>;

const TOP_ROW: [Stage; 3] = [Stage::DataConnectors, Stage::AIEngine, Stage::ManualTestCases];
const BOTTOM_ROW: [Stage; 4] = [Stage::AzureDevOpsMCP, Stage::TestConfig, Stage::PlaywrightMCP, Stage::TestExecution];

#[component]
pub fn WorkflowPipeline(#[prop(into)] force_restart: Signal<bool>) -> impl IntoView {
    let view_state = RwSignal::new(WorkflowState::default());
    let container_ref = DivRef::new();
    let diagram_ref = DivRef::new();
    let ui_ref = DivRef::new();
    let stage_refs: [DivRef; STAGE_COUNT] = std::array::from_fn(|_| DivRef::new());

    #[cfg(feature = "hydrate")]
    {
        let driver = StoredValue::new_local(None::<Driver<GlooTimerHost>>);
        let visibility = StoredValue::new_local(None::<IntersectionGuard>);
        let edge = StoredValue::new(RestartEdge::default());

        let publish = move || {
            let snapshot = driver.try_with_value(|d| d.as_ref().map(|d| d.machine().snapshot())).flatten();
            if let Some(snapshot) = snapshot {
                view_state.try_set(WorkflowState { snapshot });
            }
        };

        let host = GlooTimerHost::new(move |token| {
            let fired = driver.try_update_value(|d| d.as_mut().map(|d| d.fire(token))).flatten();
            if fired.is_some_and(|f| f != Fired::Stale) {
                publish();
            }
        });
        driver.set_value(Some(Driver::new(TimelineConfig::default(), host)));

        let start = move || {
            driver.try_update_value(|d| d.as_mut().map(Driver::start));
            publish();
        };
        let start_if_not_started = move || {
            let started = driver.try_update_value(|d| d.as_mut().is_some_and(Driver::start_if_not_started));
            if started == Some(true) {
                publish();
            }
        };

        Effect::new(move || {
            let value = force_restart.get();
            if edge.try_update_value(|e| e.observe(value)) == Some(true) {
                log::debug!("workflow restart requested");
                start();
            }
        });

        Effect::new(move || {
            let Some(container) = container_ref.get() else {
                return;
            };
            let mut trigger = VisibilityTrigger::default();
            let observed = observe_intersection(container.as_ref(), trigger.threshold(), move |ratio, intersecting| {
                if trigger.observe(ratio, intersecting) {
                    start_if_not_started();
                }
            });
            match observed {
                Ok(guard) => visibility.set_value(Some(guard)),
                Err(err) => log::warn!("workflow visibility observer unavailable: {err:?}"),
            }
        });

        on_cleanup(move || {
            visibility.try_update_value(Option::take);
            driver.try_update_value(|d| {
                if let Some(d) = d.as_mut() {
                    d.teardown();
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = force_restart;
    }

    let card = move |stage: Stage| {
        view! {
            <StageCard
                meta=stage.meta()
                state=Signal::derive(move || view_state.get().stage(stage))
                node_ref=stage_refs[stage.index()]
            />
        }
    };
    let anchor_ref = move |anchor: Anchor| match anchor {
        Anchor::UserInterface => ui_ref,
        Anchor::Stage(stage) => stage_refs[stage.index()],
    };

    let beams = BEAMS
        .iter()
        .map(|beam| {
            view! {
                <AnimatedBeam
                    container_ref=diagram_ref
                    from_ref=anchor_ref(beam.from)
                    to_ref=anchor_ref(beam.to)
                    active=Signal::derive(move || view_state.get().beam_active(beam))
                    color=beam.color.beam()
                />
            }
        })
        .collect_view();

    let dots = WorkflowState::dots()
        .map(|i| view! { <div class=move || dot_class(dot_status(i, view_state.get().step()))></div> })
        .collect_view();

    let banner = move || match view_state.get().banner() {
        Banner::Hidden => None,
        Banner::Processing(caption) => Some(
            view! {
                <div class="inline-flex items-center px-4 py-2 bg-blue-50 border border-blue-200 rounded-lg">
                    <div class="w-5 h-5 animate-spin border-2 border-blue-500 border-t-transparent rounded-full mr-2"></div>
                    <span class="text-sm font-medium text-blue-700">{caption}</span>
                </div>
            }
            .into_any(),
        ),
        Banner::Complete => Some(
            view! {
                <div class="inline-flex items-center px-4 py-2 bg-green-50 border border-green-200 rounded-lg">
                    <div class="w-5 h-5 bg-green-500 rounded-full flex items-center justify-center mr-2">
                        <div class="w-2 h-2 bg-white rounded-full"></div>
                    </div>
                    <span class="text-sm font-medium text-green-700">{COMPLETE_CAPTION}</span>
                </div>
            }
            .into_any(),
        ),
    };

    view! {
        <div class="relative w-full" node_ref=container_ref>
            <div class="w-full border border-gray-200 rounded-lg bg-gradient-to-br from-gray-50 to-white p-6">
                <div class="relative w-full" node_ref=diagram_ref>
                    <div class="grid grid-cols-1 lg:grid-cols-4 gap-6 mb-8">
                        <StageCard meta=&USER_INTERFACE state=Signal::stored(VisualState::Idle) node_ref=ui_ref />
                        {TOP_ROW.map(card).collect_view()}
                    </div>
                    <div class="grid grid-cols-1 lg:grid-cols-4 gap-6">
                        {BOTTOM_ROW.map(card).collect_view()}
                    </div>
                    {beams}
                </div>

                <div class="mt-6 flex justify-center">
                    <div class="flex space-x-2">{dots}</div>
                </div>

                <div class="mt-4 text-center">{banner}</div>
            </div>
        </div>
    }
}
