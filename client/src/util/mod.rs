//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser-only concerns (timers, DOM observers) are isolated here behind the
//! `hydrate` feature so components stay renderable on the server.

#[cfg(feature = "hydrate")]
pub mod observers;
pub mod stage_style;
#[cfg(feature = "hydrate")]
pub mod timers;
