//! Virtual time for running the orchestrator without a browser.
//!
//! [`VirtualTimerHost`] keeps armed timers in a shared queue; [`Simulation`]
//! wraps a [`Driver`] over that host and delivers due timers in order as
//! time is advanced. Used by the CLI and the tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::driver::{Driver, TimerHost};
use crate::orchestrator::{Arm, Fired, Orchestrator, RunId, TimerToken};
use crate::timeline::TimelineConfig;

#[derive(Debug, Default)]
struct Queue {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: u64,
    due_ms: u64,
    token: TimerToken,
}

/// Timer host backed by a virtual queue.
#[derive(Debug, Clone, Default)]
pub struct VirtualTimerHost {
    queue: Rc<RefCell<Queue>>,
}

/// Handle for a queued virtual timer. Dropping it removes the timer.
#[derive(Debug)]
pub struct VirtualTimer {
    id: u64,
    queue: Weak<RefCell<Queue>>,
}

impl Drop for VirtualTimer {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            if let Ok(mut queue) = queue.try_borrow_mut() {
                queue.entries.retain(|e| e.id != self.id);
            }
        }
    }
}

impl TimerHost for VirtualTimerHost {
    type Handle = VirtualTimer;

    fn arm(&mut self, arm: Arm) -> VirtualTimer {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let id = queue.next_id;
        let due_ms = queue.now_ms + u64::from(arm.delay_ms);
        queue.entries.push(Entry { id, due_ms, token: arm.token });
        VirtualTimer { id, queue: Rc::downgrade(&self.queue) }
    }
}

/// One delivered timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub at_ms: u64,
    pub fired: Fired,
}

/// An orchestrator driven by virtual time.
pub struct Simulation {
    driver: Driver<VirtualTimerHost>,
    queue: Rc<RefCell<Queue>>,
    trace: Vec<TraceEntry>,
}

impl Simulation {
    #[must_use]
    pub fn new(config: TimelineConfig) -> Self {
        let host = VirtualTimerHost::default();
        let queue = Rc::clone(&host.queue);
        Self { driver: Driver::new(config, host), queue, trace: Vec::new() }
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    pub fn start(&mut self) -> RunId {
        self.driver.start()
    }

    pub fn start_if_not_started(&mut self) -> bool {
        self.driver.start_if_not_started()
    }

    pub fn teardown(&mut self) {
        self.driver.teardown();
    }

    /// Advance by `ms`, delivering every timer that falls due. Returns the
    /// number of timers delivered.
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.now_ms() + ms;
        self.advance_to(target)
    }

    /// Advance to absolute time `target_ms`. Timers armed while advancing are
    /// delivered too if they fall due by `target_ms`.
    pub fn advance_to(&mut self, target_ms: u64) -> usize {
        let mut delivered = 0;
        loop {
            let next = self
                .queue
                .borrow()
                .entries
                .iter()
                .filter(|e| e.due_ms <= target_ms)
                .min_by_key(|e| (e.due_ms, e.id))
                .copied();
            let Some(entry) = next else {
                break;
            };

            {
                let mut queue = self.queue.borrow_mut();
                queue.entries.retain(|e| e.id != entry.id);
                queue.now_ms = queue.now_ms.max(entry.due_ms);
            }

            // No queue borrow may be held here: firing drops timer handles.
            let fired = self.driver.fire(entry.token);
            self.trace.push(TraceEntry { at_ms: entry.due_ms, fired });
            delivered += 1;
        }

        let mut queue = self.queue.borrow_mut();
        queue.now_ms = queue.now_ms.max(target_ms);
        delivered
    }

    /// Due time of the earliest queued timer.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.borrow().entries.iter().map(|e| e.due_ms).min()
    }

    /// Timers currently queued.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    #[must_use]
    pub fn machine(&self) -> &Orchestrator {
        self.driver.machine()
    }

    #[must_use]
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn take_trace(&mut self) -> Vec<TraceEntry> {
        std::mem::take(&mut self.trace)
    }
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;
