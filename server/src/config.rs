//! Environment overrides for the Leptos server options.
//!
//! The base options come from `[[workspace.metadata.leptos]]` (or the
//! `LEPTOS_*` variables cargo-leptos exports). `PORT`, `SITE_ADDR` and
//! `SITE_ROOT` replace a field only when set; an unparseable value is logged
//! and ignored so the manifest value stays in effect.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::IpAddr;
use std::path::PathBuf;

use leptos::prelude::LeptosOptions;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be an integer in 1..=65535, got {0:?}")]
    InvalidPort(String),
    #[error("SITE_ADDR must be an IP address, got {0:?}")]
    InvalidHost(String),
    #[error("SITE_ROOT must not be empty")]
    EmptySiteRoot,
}

/// Overrides read from the environment. `None` keeps the manifest value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    /// Directory holding the compiled `pkg/` assets.
    pub site_root: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("SITE_ADDR").and_then(|raw| accept(parse_host(&raw))),
            port: lookup("PORT").and_then(|raw| accept(parse_port(&raw))),
            site_root: lookup("SITE_ROOT").and_then(|raw| accept(parse_site_root(&raw))),
        }
    }

    /// Replace the fields of `options` that were overridden.
    pub fn apply(&self, options: &mut LeptosOptions) {
        if let Some(host) = self.host {
            options.site_addr.set_ip(host);
        }
        if let Some(port) = self.port {
            options.site_addr.set_port(port);
        }
        if let Some(root) = &self.site_root {
            options.site_root = root.to_string_lossy().into_owned().into();
        }
    }
}

fn accept<T>(parsed: Result<T, ConfigError>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "invalid configuration value; keeping the manifest setting");
            None
        }
    }
}

pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_owned())),
    }
}

pub fn parse_host(raw: &str) -> Result<IpAddr, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidHost(raw.to_owned()))
}

pub fn parse_site_root(raw: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptySiteRoot);
    }
    Ok(PathBuf::from(trimmed))
}
