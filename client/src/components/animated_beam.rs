//! Curved connector drawn between two workflow cards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Geometry comes from `workflow::beam`. This component only measures the
//! container and anchor elements, caches the last path, and re-measures when
//! any of them resizes. The beam is rendered only while `active`.

use leptos::prelude::*;
use workflow::beam::BeamPath;

#[cfg(feature = "hydrate")]
use workflow::beam::{BeamGeometry, BeamOptions};
#[cfg(feature = "hydrate")]
use workflow::consts::BEAM_CURVATURE;

#[cfg(feature = "hydrate")]
use crate::util::observers::{ResizeGuard, observe_resize, rect_of};

type DivRef = NodeRef<leptos::html::Div>;

#[component]
pub fn AnimatedBeam(
    container_ref: DivRef,
    from_ref: DivRef,
    to_ref: DivRef,
    #[prop(into)] active: Signal<bool>,
    color: &'static str,
    #[prop(optional)] curvature: Option<f64>,
) -> impl IntoView {
    let path = RwSignal::new(None::<BeamPath>);

    #[cfg(feature = "hydrate")]
    {
        let cache = StoredValue::new_local(BeamGeometry::default());
        let guard = StoredValue::new_local(None::<ResizeGuard>);
        let opts = BeamOptions { curvature: curvature.unwrap_or(BEAM_CURVATURE), ..BeamOptions::default() };

        let measure = move || {
            let (Some(container), Some(from), Some(to)) =
                (container_ref.get_untracked(), from_ref.get_untracked(), to_ref.get_untracked())
            else {
                return;
            };
            let next = cache.try_update_value(|g| g.resolve(rect_of(&container), rect_of(&from), rect_of(&to), &opts));
            if let Some(next) = next {
                path.try_set(Some(next));
            }
        };

        Effect::new(move || {
            let (Some(container), Some(from), Some(to)) = (container_ref.get(), from_ref.get(), to_ref.get()) else {
                return;
            };
            measure();
            match observe_resize(&[container.as_ref(), from.as_ref(), to.as_ref()], measure) {
                Ok(observer) => guard.set_value(Some(observer)),
                Err(err) => log::warn!("beam resize observer unavailable: {err:?}"),
            }
        });

        on_cleanup(move || {
            guard.try_update_value(Option::take);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (container_ref, from_ref, to_ref, curvature);
    }

    let visible = move || if active.get() { path.get() } else { None };

    view! {
        {move || visible().map(|p| render_path(&p, color))}
    }
}

fn render_path(p: &BeamPath, color: &'static str) -> impl IntoView + use<> {
    let d = p.to_svg_d();
    view! {
        <svg
            class="pointer-events-none absolute left-0 top-0 transform-gpu"
            width=p.width
            height=p.height
            viewBox=format!("0 0 {} {}", p.width, p.height)
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        >
            <path d=d.clone() stroke=color stroke-width="2" stroke-opacity="0.2" stroke-linecap="round"></path>
            <path
                class="beam-flow"
                d=d
                stroke=color
                stroke-width="2"
                stroke-linecap="round"
                stroke-dasharray="8 12"
            ></path>
        </svg>
    }
}
