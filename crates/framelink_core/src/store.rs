//! # Shared Framebuffer Store
//!
//! Double-buffered frame exchange between the application step and the
//! asynchronous render callback.
//!
//! ## Architecture
//!
//! ```text
//!   main loop                               render callback (host thread)
//!   ─────────                               ───────────────────────────
//!   lock back  ──> game step mutates        try_lock front (NEVER blocks)
//!   unlock back                               ├─ held?      skip frame
//!   commit_frame:                             ├─ shutdown?  skip frame
//!     lock back, lock front                   ├─ dest small? skip frame
//!     copy back -> front                      └─ copy front -> dest, inverted
//!     unlock both
//! ```
//!
//! The back buffer's mutex doubles as the step lock: whoever holds it owns
//! the frame under construction. The front buffer always holds a complete,
//! self-consistent frame because the commit copy and the snapshot read hold
//! the same lock - a partial frame is never observable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::lifecycle::ShutdownFlag;

/// Outcome of a snapshot attempt.
///
/// A skip is not an error: the display keeps the previous (stale but
/// complete) frame, and the destination is never partially written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Snapshot {
    /// The destination now holds a complete inverted frame.
    Written,
    /// Nothing was written to the destination.
    Skipped(SkipReason),
}

/// Why a snapshot attempt wrote nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The front-buffer lock was held; blocking here could stall the host's
    /// display thread.
    Contended,
    /// Shutdown is in progress.
    ShuttingDown,
    /// The caller-supplied destination is smaller than one frame.
    Undersized,
}

/// Back/front buffer pair for one monochrome frame.
pub struct FrameStore {
    /// Frame under construction. This mutex is the step lock.
    back: Mutex<Box<[u8]>>,
    /// Last committed frame, read by the render callback.
    front: Mutex<Box<[u8]>>,
    frame_size: usize,
    shutdown: Arc<ShutdownFlag>,
    commits: AtomicU64,
}

impl FrameStore {
    /// Creates a store with both buffers zeroed.
    ///
    /// # Panics
    ///
    /// Panics if `frame_size` is zero.
    #[must_use]
    pub fn new(frame_size: usize, shutdown: Arc<ShutdownFlag>) -> Arc<Self> {
        assert!(frame_size > 0, "frame size must be non-zero");
        Arc::new(Self {
            back: Mutex::new(vec![0; frame_size].into_boxed_slice()),
            front: Mutex::new(vec![0; frame_size].into_boxed_slice()),
            frame_size,
            shutdown,
            commits: AtomicU64::new(0),
        })
    }

    /// Size of one frame in bytes.
    #[must_use]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Number of frames committed so far.
    #[must_use]
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::Acquire)
    }

    /// Acquires the step lock and returns the back buffer for mutation.
    ///
    /// Held by the main loop for the duration of one game step. The render
    /// callback never touches this buffer.
    pub fn step_buffer(&self) -> MutexGuard<'_, Box<[u8]>> {
        self.back.lock()
    }

    /// Publishes the back buffer: copies it into the front buffer under the
    /// front-buffer lock.
    ///
    /// Called once per logical step, after the game step has released the
    /// step lock. Blocking here is fine - only the main loop commits.
    pub fn commit_frame(&self) {
        let back = self.back.lock();
        let mut front = self.front.lock();
        front.copy_from_slice(&back);
        drop(front);
        drop(back);
        self.commits.fetch_add(1, Ordering::AcqRel);
    }

    /// Copies the front buffer into `dest`, inverting every byte.
    ///
    /// Non-blocking: if the front lock is held, shutdown has been requested,
    /// or `dest` is smaller than one frame, nothing is written and the skip
    /// reason is returned. A successful snapshot is always byte-for-byte one
    /// committed frame - never a mix of two commits.
    pub fn snapshot_for_render(&self, dest: &mut [u8]) -> Snapshot {
        if self.shutdown.is_requested() {
            return Snapshot::Skipped(SkipReason::ShuttingDown);
        }
        if dest.len() < self.frame_size {
            return Snapshot::Skipped(SkipReason::Undersized);
        }
        let Some(front) = self.front.try_lock() else {
            tracing::trace!("front buffer contended, frame skipped");
            return Snapshot::Skipped(SkipReason::Contended);
        };
        for (dst, src) in dest[..self.frame_size].iter_mut().zip(front.iter()) {
            *dst = !*src;
        }
        Snapshot::Written
    }
}
