//! # Lifecycle Guard
//!
//! In-flight tracking for asynchronous callbacks and the monotonic shutdown
//! flag, used to sequence safe teardown.
//!
//! ## The Problem
//!
//! ```text
//! Main loop:                    Host thread:
//!   unregister callback           callback entered just before
//!   free shared state             ... still reading shared state -> UB
//! ```
//!
//! Unregistration stops *new* invocations; it says nothing about one already
//! executing. Each callback therefore brackets its body with an in-flight
//! guard, and teardown proceeds only once the count has drained:
//!
//! ```text
//! 1. set the shutdown flag          (callbacks short-circuit)
//! 2. unregister from the source     (no new invocations)
//! 3. wait_drained()                 (in-progress invocations finish)
//! 4. free the shared state
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Single-shot shutdown flag.
///
/// Transitions false -> true exactly once and is never reset. Callbacks read
/// it to short-circuit work during teardown.
#[derive(Debug, Default)]
pub struct ShutdownFlag {
    requested: AtomicBool,
}

impl ShutdownFlag {
    /// Creates an unset flag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Sets the flag. Idempotent.
    pub fn request(&self) {
        if !self.requested.swap(true, Ordering::AcqRel) {
            tracing::info!("shutdown requested");
        }
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

/// Atomic count of currently-executing invocations of one callback.
///
/// [`InFlight::enter`] returns a guard whose `Drop` impl performs the
/// decrement, so no exit path - early return included - can leak a count.
#[derive(Debug, Default)]
pub struct InFlight {
    count: AtomicUsize,
}

impl InFlight {
    /// Creates a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
        }
    }

    /// Marks one invocation as executing. Must be the first action of the
    /// callback body.
    #[must_use = "dropping the guard immediately defeats in-flight tracking"]
    pub fn enter(&self) -> InFlightGuard<'_> {
        self.count.fetch_add(1, Ordering::AcqRel);
        InFlightGuard { counter: self }
    }

    /// Number of invocations currently executing.
    #[must_use]
    pub fn current(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Whether no invocation is currently executing.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.current() == 0
    }

    /// Blocks until the count reaches zero, sleeping `poll_interval` between
    /// polls.
    ///
    /// Call only after the callback has been unregistered from its source;
    /// otherwise new invocations can keep the count alive indefinitely.
    pub fn wait_drained(&self, poll_interval: Duration) {
        while !self.is_drained() {
            std::thread::sleep(poll_interval);
        }
    }
}

/// RAII bracket around one callback invocation.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    counter: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.count.fetch_sub(1, Ordering::AcqRel);
    }
}
