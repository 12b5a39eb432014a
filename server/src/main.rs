//! TestWise landing page server.
//!
//! Serves the server-rendered page, the hydration bundle under `/pkg` and a
//! `/healthz` probe. Configuration comes from the environment (optionally a
//! `.env` file) layered over the Leptos metadata in the workspace manifest;
//! only variables that are set override it.

#![recursion_limit = "512"]

mod config;
mod routes;

use leptos::prelude::get_configuration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let mut leptos_options = get_configuration(None).expect("leptos configuration").leptos_options;
    ServerConfig::from_env().apply(&mut leptos_options);
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.clone();

    let app = routes::app(leptos_options);
    let listener = tokio::net::TcpListener::bind(addr).await.expect("failed to bind");

    tracing::info!(%addr, %site_root, "testwise listening");
    axum::serve(listener, app).await.expect("server failed");
}
