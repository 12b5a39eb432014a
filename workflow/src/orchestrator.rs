//! Workflow orchestrator: the timed state machine behind the animation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The orchestrator exclusively owns the animation step, every stage's
//! [`VisualState`], the processing label and the run lifecycle. Renderers read
//! it; nothing else writes to it.
//!
//! DESIGN
//! ======
//! The machine is sans-IO. It never touches a clock: every transition that
//! needs time returns an [`Arm`] request (token + delay) and the caller hands
//! the token back through [`Orchestrator::fire`] when the delay elapses. At
//! most one token is live. `start()` and `teardown()` replace or drop it, so a
//! callback from a superseded run carries a stale token and is ignored.
//!
//! ```text
//! NotStarted --start--> Running(0) --timer--> Running(1) ... Running(8)
//! Running(8) --settle--> Settled --replay--> Running(0)
//! any --start--> Running(0)        any --teardown--> Disposed
//! ```
//!
//! TRADE-OFFS
//! ==========
//! Stale tokens are filtered here as well as cancelled by the driver. Either
//! mechanism alone is enough; the machine stays correct even with a host
//! that cannot cancel timers.

use serde::Serialize;

use crate::beam::{self, BeamSpec};
use crate::consts::TOTAL_STEPS;
use crate::stage::{Stage, StageStates, VisualState};
use crate::timeline::{ProcessingUpdate, SCRIPT, StageWrite, TimelineConfig};

/// Identity of one playthrough. Strictly increasing per orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RunId(pub u64);

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle for one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    run: RunId,
    seq: u64,
}

impl TimerToken {
    #[must_use]
    pub const fn run(self) -> RunId {
        self.run
    }
}

/// Request to call [`Orchestrator::fire`] with `token` after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arm {
    pub token: TimerToken,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Step(usize),
    Settle,
    Replay,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Settled,
    /// Terminal. No timer is armed and no write is applied.
    Disposed,
}

/// Outcome of delivering a timer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fired {
    /// The token was superseded or the machine is disposed. Nothing changed.
    Stale,
    /// Scripted step `step` (0-based) was applied; the animation step is now `step + 1`.
    Step { run: RunId, step: usize, writes: &'static [StageWrite], next: Option<Arm> },
    /// The grace delay after the last step elapsed.
    Settled { run: RunId, next: Option<Arm> },
    /// Auto-replay started run `run`.
    Replayed { run: RunId, next: Option<Arm> },
}

impl Fired {
    /// The follow-up timer to arm, if any.
    #[must_use]
    pub fn next(&self) -> Option<Arm> {
        match self {
            Self::Stale => None,
            Self::Step { next, .. } | Self::Settled { next, .. } | Self::Replayed { next, .. } => *next,
        }
    }
}

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub run: RunId,
    pub phase: Phase,
    pub step: usize,
    pub states: StageStates,
    pub processing: Option<Stage>,
    pub animating: bool,
    pub complete: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Orchestrator::new(TimelineConfig::default()).snapshot()
    }
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: TimelineConfig,
    phase: Phase,
    step: usize,
    states: StageStates,
    processing: Option<Stage>,
    run: RunId,
    seq: u64,
    pending: Option<(TimerToken, TimerKind)>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            phase: Phase::NotStarted,
            step: 0,
            states: StageStates::default(),
            processing: None,
            run: RunId(0),
            seq: 0,
            pending: None,
        }
    }

    /// Begin a new run, superseding any run in progress.
    ///
    /// Resets the step, every stage and the label, then returns the timer for
    /// the first step. Returns `None` once disposed.
    pub fn start(&mut self) -> Option<Arm> {
        if self.phase == Phase::Disposed {
            tracing::debug!(run = %self.run, "start ignored after teardown");
            return None;
        }

        self.run = RunId(self.run.0 + 1);
        self.phase = Phase::Running;
        self.step = 0;
        self.states.reset();
        self.processing = None;
        self.pending = None;

        tracing::debug!(run = %self.run, "run started");
        self.arm(TimerKind::Step(0))
    }

    /// Deliver an elapsed timer.
    pub fn fire(&mut self, token: TimerToken) -> Fired {
        let kind = match self.pending {
            Some((live, kind)) if live == token => kind,
            _ => {
                tracing::debug!(token_run = %token.run, run = %self.run, "ignoring stale timer");
                return Fired::Stale;
            }
        };
        self.pending = None;

        match kind {
            TimerKind::Step(index) => self.apply_step(index),
            TimerKind::Settle => {
                self.phase = Phase::Settled;
                tracing::debug!(run = %self.run, step = self.step, "run settled");
                Fired::Settled { run: self.run, next: self.arm(TimerKind::Replay) }
            }
            TimerKind::Replay => {
                let next = self.start();
                Fired::Replayed { run: self.run, next }
            }
        }
    }

    /// Move to the terminal `Disposed` phase and forget the pending timer.
    pub fn teardown(&mut self) {
        if self.phase != Phase::Disposed {
            tracing::debug!(run = %self.run, step = self.step, "orchestrator disposed");
        }
        self.phase = Phase::Disposed;
        self.pending = None;
    }

    fn apply_step(&mut self, index: usize) -> Fired {
        let Some(script) = SCRIPT.get(index) else {
            return Fired::Stale;
        };

        self.step = index + 1;
        for write in script.writes {
            debug_assert!(self.states.get(write.stage).can_transition_to(write.state));
            self.states.set(write.stage, write.state);
        }
        match script.processing {
            ProcessingUpdate::Keep => {}
            ProcessingUpdate::Set(stage) => self.processing = Some(stage),
            ProcessingUpdate::Clear => self.processing = None,
        }

        tracing::debug!(run = %self.run, step = self.step, processing = ?self.processing, "step applied");

        let next = if self.step < TOTAL_STEPS {
            self.arm(TimerKind::Step(self.step))
        } else {
            self.arm(TimerKind::Settle)
        };
        Fired::Step { run: self.run, step: index, writes: script.writes, next }
    }

    fn arm(&mut self, kind: TimerKind) -> Option<Arm> {
        let delay_ms = match kind {
            TimerKind::Step(i) => self.config.step_delay_ms(i)?,
            TimerKind::Settle => self.config.settle_ms,
            TimerKind::Replay => self.config.replay_ms,
        };
        self.seq += 1;
        let token = TimerToken { run: self.run, seq: self.seq };
        self.pending = Some((token, kind));
        Some(Arm { token, delay_ms })
    }

    // ── Inspection ───────────────────────────────────────────────

    #[must_use]
    pub const fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Current animation step in `0..=8`.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn state(&self, stage: Stage) -> VisualState {
        self.states.get(stage)
    }

    #[must_use]
    pub const fn states(&self) -> &StageStates {
        &self.states
    }

    /// Stage currently named in the status banner.
    #[must_use]
    pub const fn processing(&self) -> Option<Stage> {
        self.processing
    }

    /// Beams active at the current step.
    pub fn beams(&self) -> impl Iterator<Item = &'static BeamSpec> + use<> {
        beam::active_beams(self.step)
    }

    #[must_use]
    pub const fn run_id(&self) -> RunId {
        self.run
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Running
    }

    /// All eight steps ran and the grace delay has passed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step == TOTAL_STEPS && self.phase == Phase::Settled
    }

    /// Whether a timer is currently expected.
    #[must_use]
    pub const fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            run: self.run,
            phase: self.phase,
            step: self.step,
            states: self.states,
            processing: self.processing,
            animating: self.is_animating(),
            complete: self.is_complete(),
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod orchestrator_test;
