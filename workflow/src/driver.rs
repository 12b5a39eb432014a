//! Binds an [`Orchestrator`] to a concrete timer source.
//!
//! The driver owns the one cancellable handle for the live timer. Arming a
//! new timer or tearing down drops the previous handle, which cancels it on
//! hosts that support cancellation (a dropped `gloo_timers` `Timeout` clears
//! itself). Stale tokens that still arrive are rejected by the orchestrator.

use crate::orchestrator::{Arm, Fired, Orchestrator, Phase, RunId, TimerToken};
use crate::timeline::TimelineConfig;

/// A source of one-shot timers.
///
/// `arm` schedules a call back into [`Driver::fire`] with `arm.token` after
/// `arm.delay_ms`. Dropping the returned handle must cancel the timer or make
/// it harmless.
pub trait TimerHost {
    type Handle;

    fn arm(&mut self, arm: Arm) -> Self::Handle;
}

pub struct Driver<H: TimerHost> {
    machine: Orchestrator,
    host: H,
    pending: Option<H::Handle>,
}

impl<H: TimerHost> Driver<H> {
    pub fn new(config: TimelineConfig, host: H) -> Self {
        Self { machine: Orchestrator::new(config), host, pending: None }
    }

    /// Single entry point for every trigger: mount, visibility, force-restart.
    pub fn start(&mut self) -> RunId {
        self.pending = None;
        let arm = self.machine.start();
        self.schedule(arm);
        self.machine.run_id()
    }

    /// Start only if no run has been started yet. Returns whether it started.
    pub fn start_if_not_started(&mut self) -> bool {
        if self.machine.phase() != Phase::NotStarted {
            return false;
        }
        self.start();
        true
    }

    /// Deliver an elapsed timer and arm whatever comes next.
    pub fn fire(&mut self, token: TimerToken) -> Fired {
        let fired = self.machine.fire(token);
        if fired != Fired::Stale {
            self.pending = None;
            self.schedule(fired.next());
        }
        fired
    }

    /// Dispose the machine and cancel the pending timer. Idempotent.
    pub fn teardown(&mut self) {
        self.machine.teardown();
        self.pending = None;
    }

    #[must_use]
    pub const fn machine(&self) -> &Orchestrator {
        &self.machine
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn schedule(&mut self, arm: Option<Arm>) {
        if let Some(arm) = arm {
            self.pending = Some(self.host.arm(arm));
        }
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;
