//! TestWise landing page: Leptos app rendered on the server and hydrated in
//! the browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | HTML shell and router |
//! | [`pages`] | Route-level screens |
//! | [`components`] | Workflow cards, beams and diagrams |
//! | [`state`] | View state derived from orchestrator snapshots |
//! | [`util`] | Styling helpers, browser timers and observers |

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach to the server-rendered DOM.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"console logger already installed".into());
    }
    leptos::mount::hydrate_body(app::App);
}
