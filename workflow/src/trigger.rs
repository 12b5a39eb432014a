//! Edge detectors that decide when to call `start()`.

use crate::consts::VISIBILITY_THRESHOLD;

/// Fires once, the first time the container is sufficiently visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f64,
    fired: bool,
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}

impl VisibilityTrigger {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold, fired: false }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Feed one intersection observation. Returns `true` exactly once.
    pub fn observe(&mut self, ratio: f64, intersecting: bool) -> bool {
        if self.fired || !intersecting || ratio < self.threshold {
            return false;
        }
        self.fired = true;
        true
    }

    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Detects false→true edges of the force-restart flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestartEdge {
    last: bool,
}

impl RestartEdge {
    /// Record the latest flag value. Returns `true` on a rising edge.
    pub fn observe(&mut self, value: bool) -> bool {
        let rising = value && !self.last;
        self.last = value;
        rising
    }
}

#[cfg(test)]
#[path = "trigger_test.rs"]
mod trigger_test;
