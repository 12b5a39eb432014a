//! Shared constants for the workflow crate.

// ── Timeline ────────────────────────────────────────────────────

/// Number of scripted steps in one run. `AnimationStep` ranges over `0..=TOTAL_STEPS`.
pub const TOTAL_STEPS: usize = 8;

/// Delay between `start()` and the first step's own duration, in ms.
pub const LEAD_IN_MS: u32 = 500;

/// Per-step delays in ms. Step `i` fires `STEP_DURATIONS_MS[i]` after step `i - 1`.
pub const STEP_DURATIONS_MS: [u32; TOTAL_STEPS] = [2000, 2000, 2000, 2000, 1500, 2000, 2000, 2000];

/// Grace period after the last step before the run counts as settled.
pub const SETTLE_MS: u32 = 1000;

/// Pause between settling and the automatic replay.
pub const REPLAY_MS: u32 = 3000;

// ── Triggers ────────────────────────────────────────────────────

/// Fraction of the container that must be visible to start the first run.
pub const VISIBILITY_THRESHOLD: f64 = 0.3;

/// Delay between the restart button lowering and re-raising the force-restart flag.
pub const RESTART_REARM_MS: u32 = 100;

// ── Beams ───────────────────────────────────────────────────────

pub const BEAM_COUNT: usize = 7;

/// Default control-point lift for beam curves, in px.
pub const BEAM_CURVATURE: f64 = 0.0;
