//! # Frame Scheduler
//!
//! Drift-correcting fixed-rate step scheduling.
//!
//! ## Design
//!
//! The scheduler keeps a target tick that advances by one period per logical
//! step. Three cases on each poll:
//!
//! ```text
//! now < target                 -> wait out the remainder, re-poll
//! now - target <= stall window -> advance target one period, run one step
//! now - target  > stall window -> resync target to now, run ONE step
//! ```
//!
//! The resync case is the drift correction: after a stall (a step that ran
//! far over budget) the schedule realigns instead of firing a burst of
//! catch-up steps. Under sustained overload the loop degrades to "as fast as
//! possible" with no backlog accumulation.

use crate::clock::{TickCount, TickSource};

/// Outcome of a scheduler poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Not yet due; suspend for this many ticks (always >= 1) and re-poll.
    Wait(u32),
    /// Exactly one logical step may run now.
    Run {
        /// True when the schedule was realigned after a stall.
        resynced: bool,
    },
}

/// Fixed-rate step scheduler with stall recovery.
pub struct FrameScheduler {
    /// Ticks per logical step (>= 1).
    period: u32,
    /// Overshoot beyond this many ticks counts as a stall.
    stall_window: u32,
    /// Tick at which the next step becomes due.
    target: TickCount,
}

impl FrameScheduler {
    /// Creates a scheduler for `target_rate` steps per second on a clock at
    /// `frequency` ticks per second.
    ///
    /// The period is rounded up and clamped to at least one tick. A stall is
    /// an overshoot of more than `stall_periods` periods.
    ///
    /// # Panics
    ///
    /// Panics if `target_rate` is zero.
    #[must_use]
    pub fn new(frequency: u32, target_rate: u32, stall_periods: u32, start: TickCount) -> Self {
        assert!(target_rate > 0, "target rate must be non-zero");
        let period = frequency.div_ceil(target_rate).max(1);
        Self {
            period,
            stall_window: stall_periods.saturating_mul(period),
            target: start,
        }
    }

    /// Ticks per logical step.
    #[must_use]
    pub const fn period(&self) -> u32 {
        self.period
    }

    /// The tick at which the next step becomes due.
    #[must_use]
    pub const fn target(&self) -> TickCount {
        self.target
    }

    /// Decides whether a step may run at `now`.
    ///
    /// Permits at most one step per call; the caller loops on [`Frame::Wait`].
    pub fn poll(&mut self, now: TickCount) -> Frame {
        let lag = now.since(self.target);
        if lag < 0 {
            return Frame::Wait(now.ticks_until(self.target).max(1));
        }

        #[allow(clippy::cast_sign_loss)]
        let resynced = lag as u32 > self.stall_window;
        if resynced {
            tracing::warn!(
                lag_ticks = lag,
                period = self.period,
                "stall detected, realigning schedule"
            );
            self.target = now;
        }
        self.target = self.target.wrapping_add(self.period);
        Frame::Run { resynced }
    }

    /// Polls and sleeps on `source` until one step is due.
    ///
    /// Returns true if the schedule was realigned this step.
    pub fn wait_for_step(&mut self, source: &impl TickSource) -> bool {
        loop {
            match self.poll(source.now()) {
                Frame::Wait(ticks) => source.sleep(ticks),
                Frame::Run { resynced } => return resynced,
            }
        }
    }
}
