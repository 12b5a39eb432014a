//! Browser timer host for the workflow driver.
//!
//! Each armed timer is a `gloo_timers` [`Timeout`]. The driver keeps the
//! handle; dropping it clears the browser timeout, so a superseded run never
//! receives its callback.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use workflow::TimerHost;
use workflow::orchestrator::{Arm, TimerToken};

/// Delivers elapsed tokens to `sink`.
pub struct GlooTimerHost {
    sink: Rc<dyn Fn(TimerToken)>,
}

impl GlooTimerHost {
    pub fn new(sink: impl Fn(TimerToken) + 'static) -> Self {
        Self { sink: Rc::new(sink) }
    }
}

impl TimerHost for GlooTimerHost {
    type Handle = Timeout;

    fn arm(&mut self, arm: Arm) -> Timeout {
        let sink = Rc::clone(&self.sink);
        Timeout::new(arm.delay_ms, move || sink(arm.token))
    }
}
