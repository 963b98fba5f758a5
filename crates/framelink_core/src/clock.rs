//! # Tick Clock
//!
//! Wrap-safe tick arithmetic and the platform clock abstraction.
//!
//! The platform hands out an unsigned tick counter that wraps at its width.
//! Every comparison in this crate goes through signed-difference arithmetic
//! (`(a - b) as i32`), which stays correct across the wrap as long as two
//! compared counts are less than half the counter range apart.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

/// A point on the platform's monotonic tick counter.
///
/// Wraps at `u32::MAX`. Never compare two counts with `<` / `>` directly;
/// use [`TickCount::since`] or [`TickCount::is_before`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TickCount(u32);

impl TickCount {
    /// Wraps a raw counter value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Advances by `ticks`, wrapping at the counter width.
    #[must_use]
    pub const fn wrapping_add(self, ticks: u32) -> Self {
        Self(self.0.wrapping_add(ticks))
    }

    /// Signed distance from `earlier` to `self`.
    ///
    /// Positive when `self` is ahead of `earlier`, negative when behind.
    /// Correct across wraparound for distances under half the counter range.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn since(self, earlier: Self) -> i32 {
        self.0.wrapping_sub(earlier.0) as i32
    }

    /// Whether `self` is strictly before `other` on the wrapping timeline.
    #[must_use]
    pub const fn is_before(self, other: Self) -> bool {
        self.since(other) < 0
    }

    /// Ticks remaining until `deadline`, or 0 if the deadline has passed.
    #[must_use]
    pub fn ticks_until(self, deadline: Self) -> u32 {
        let diff = deadline.since(self);
        u32::try_from(diff).unwrap_or(0)
    }
}

/// A monotonic tick counter owned by the platform.
///
/// The main loop is the only caller of [`TickSource::sleep`]; asynchronous
/// callbacks must never suspend on a clock.
pub trait TickSource {
    /// Current counter value.
    fn now(&self) -> TickCount;

    /// Counter frequency in ticks per second.
    fn frequency(&self) -> u32;

    /// Suspends the calling thread for roughly `ticks` ticks.
    fn sleep(&self, ticks: u32);
}

/// Standard-library tick source backed by [`Instant`].
pub struct StdTickSource {
    epoch: Instant,
    frequency: u32,
}

impl StdTickSource {
    /// Creates a source ticking at `frequency` ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `frequency` is zero.
    #[must_use]
    pub fn new(frequency: u32) -> Self {
        assert!(frequency > 0, "tick frequency must be non-zero");
        Self {
            epoch: Instant::now(),
            frequency,
        }
    }

    /// Millisecond-resolution source (1000 ticks per second).
    #[must_use]
    pub fn millis() -> Self {
        Self::new(1_000)
    }
}

impl TickSource for StdTickSource {
    fn now(&self) -> TickCount {
        let elapsed = self.epoch.elapsed().as_nanos() * u128::from(self.frequency)
            / 1_000_000_000;
        #[allow(clippy::cast_possible_truncation)]
        let ticks = elapsed as u32;
        TickCount::new(ticks)
    }

    fn frequency(&self) -> u32 {
        self.frequency
    }

    fn sleep(&self, ticks: u32) {
        let nanos = u64::from(ticks) * 1_000_000_000 / u64::from(self.frequency);
        std::thread::sleep(Duration::from_nanos(nanos));
    }
}

/// Hand-driven tick source for deterministic tests.
///
/// `sleep` advances simulated time instead of suspending, so scheduler
/// behavior can be exercised without wall-clock delays.
pub struct ManualTickSource {
    ticks: AtomicU32,
    frequency: u32,
}

impl ManualTickSource {
    /// Creates a source at `frequency` ticks per second, starting at tick 0.
    #[must_use]
    pub fn new(frequency: u32) -> Self {
        Self {
            ticks: AtomicU32::new(0),
            frequency,
        }
    }

    /// Advances simulated time by `ticks`.
    pub fn advance(&self, ticks: u32) {
        self.ticks.fetch_add(ticks, Ordering::AcqRel);
    }

    /// Jumps simulated time to an absolute counter value.
    pub fn set(&self, raw: u32) {
        self.ticks.store(raw, Ordering::Release);
    }
}

impl TickSource for ManualTickSource {
    fn now(&self) -> TickCount {
        TickCount::new(self.ticks.load(Ordering::Acquire))
    }

    fn frequency(&self) -> u32 {
        self.frequency
    }

    fn sleep(&self, ticks: u32) {
        self.advance(ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_difference_ordering() {
        let a = TickCount::new(100);
        let b = TickCount::new(133);

        assert!(a.is_before(b));
        assert!(!b.is_before(a));
        assert_eq!(b.since(a), 33);
        assert_eq!(a.since(b), -33);
        assert_eq!(a.ticks_until(b), 33);
        assert_eq!(b.ticks_until(a), 0);
    }

    #[test]
    fn test_comparison_across_wraparound() {
        let before_wrap = TickCount::new(u32::MAX - 10);
        let after_wrap = before_wrap.wrapping_add(33);

        assert_eq!(after_wrap.raw(), 22);
        assert!(before_wrap.is_before(after_wrap));
        assert_eq!(after_wrap.since(before_wrap), 33);
        assert_eq!(before_wrap.ticks_until(after_wrap), 33);
    }

    #[test]
    fn test_manual_source_sleep_advances() {
        let source = ManualTickSource::new(1_000);
        assert_eq!(source.now(), TickCount::new(0));

        source.sleep(5);
        source.advance(2);
        assert_eq!(source.now(), TickCount::new(7));
    }

    #[test]
    fn test_std_source_is_monotonic() {
        let source = StdTickSource::millis();
        let a = source.now();
        source.sleep(2);
        let b = source.now();
        assert!(b.since(a) >= 2);
    }
}
