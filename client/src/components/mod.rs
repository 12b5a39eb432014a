//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the three architecture showcases. Stateful behavior
//! lives in the `workflow` crate; components measure, observe and display.

pub mod animated_beam;
pub mod component_diagram;
pub mod icons;
pub mod sequence_diagram;
pub mod stage_card;
pub mod workflow_pipeline;
