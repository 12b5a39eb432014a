//! Workflow engine for the TestWise architecture showcase.
//!
//! This crate is pure Rust with no browser dependencies. It owns the timed
//! state machine behind the interactive workflow illustration, the beam
//! geometry drawn between its cards, and the static data behind the two
//! architecture diagrams. The Leptos client renders what this crate computes;
//! the CLI drives the same machine under virtual time.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`orchestrator`] | Sans-IO state machine: steps, stage states, run lifecycle |
//! | [`timeline`] | The scripted eight steps and [`timeline::TimelineConfig`] |
//! | [`driver`] | Binds the machine to a cancellable [`driver::TimerHost`] |
//! | [`clock`] | Virtual-time host and [`clock::Simulation`] |
//! | [`trigger`] | Visibility and force-restart edge detection |
//! | [`stage`] | Stages, display metadata and [`stage::VisualState`] |
//! | [`beam`] | Beam thresholds and curve geometry |
//! | [`architecture`] | Static solution-architecture layout |
//! | [`sequence`] | Process-flow sequence definition and theme |
//! | [`palette`] | Color groups, tones and icons |
//! | [`consts`] | Timing and threshold constants |

pub mod architecture;
pub mod beam;
pub mod clock;
pub mod consts;
pub mod driver;
pub mod orchestrator;
pub mod palette;
pub mod sequence;
pub mod stage;
pub mod timeline;
pub mod trigger;

pub use driver::{Driver, TimerHost};
pub use orchestrator::{Fired, Orchestrator, Phase, RunId, Snapshot};
pub use stage::{Stage, VisualState};
pub use timeline::{TimelineConfig, TimelineError};
