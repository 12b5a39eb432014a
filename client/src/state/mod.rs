//! Client-side view state derived from the `workflow` crate.

pub mod workflow;
