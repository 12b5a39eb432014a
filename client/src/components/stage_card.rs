//! One card of the workflow illustration.

use leptos::prelude::*;
use workflow::VisualState;
use workflow::stage::StageMeta;

use crate::components::icons::IconSvg;
use crate::util::stage_style::{card_class, indicator};

/// Card for a stage (or the stateless User Interface anchor) with its state marker.
///
/// `node_ref` is the beam anchor; beams attach to the card's center.
#[component]
pub fn StageCard(
    meta: &'static StageMeta,
    #[prop(into)] state: Signal<VisualState>,
    node_ref: NodeRef<leptos::html::Div>,
) -> impl IntoView {
    let class = move || card_class(meta.color, state.get());
    let tile_class = format!(
        "w-12 h-12 rounded-lg {} flex items-center justify-center shadow-sm",
        meta.icon_tone.tile_class()
    );
    let icon_class = format!("w-6 h-6 {}", meta.icon_tone.icon_class());

    let marker = move || {
        indicator(state.get()).map(|ind| {
            view! {
                <div class=ind.class()>
                    {ind.inner_class().map(|inner| view! { <div class=inner></div> })}
                </div>
            }
        })
    };
    let caption = move || {
        (state.get() == VisualState::Loading && !meta.loading_caption.is_empty()).then(|| {
            view! { <p class="text-xs text-center text-red-600 mt-1">{meta.loading_caption}</p> }
        })
    };

    view! {
        <div class="flex flex-col items-center">
            <div node_ref=node_ref class=class data-state=move || state.get().as_str()>
                <div class="flex items-center justify-center mb-2">
                    <div class=tile_class>
                        <IconSvg icon=meta.icon class=icon_class />
                    </div>
                    {marker}
                </div>
                <h3 class="text-xs font-semibold text-center text-gray-800">{meta.title}</h3>
                <p class="text-xs text-center text-gray-600">{meta.subtitle}</p>
                {caption}
            </div>
        </div>
    }
}
