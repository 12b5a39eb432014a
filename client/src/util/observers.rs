//! RAII wrappers around `IntersectionObserver` and `ResizeObserver`.
//!
//! Each guard owns both the observer and the JS closure it calls. Dropping
//! the guard disconnects the observer before the closure is freed.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ResizeObserver};
use workflow::beam::Rect;

pub struct IntersectionGuard {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for IntersectionGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Call `on_entry(ratio, intersecting)` for each intersection change of `target`.
///
/// # Errors
///
/// Returns the browser error if the observer cannot be created.
pub fn observe_intersection(
    target: &Element,
    threshold: f64,
    mut on_entry: impl FnMut(f64, bool) + 'static,
) -> Result<IntersectionGuard, JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_entry(entry.intersection_ratio(), entry.is_intersecting());
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    observer.observe(target);
    Ok(IntersectionGuard { observer, _callback: callback })
}

pub struct ResizeGuard {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
}

impl Drop for ResizeGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Call `on_resize` whenever any of `targets` changes size.
///
/// # Errors
///
/// Returns the browser error if the observer cannot be created.
pub fn observe_resize(targets: &[&Element], mut on_resize: impl FnMut() + 'static) -> Result<ResizeGuard, JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
        move |_entries: js_sys::Array, _observer: ResizeObserver| on_resize(),
    );
    let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
    for target in targets {
        observer.observe(target);
    }
    Ok(ResizeGuard { observer, _callback: callback })
}

/// Viewport rectangle of `el`.
#[must_use]
pub fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}
