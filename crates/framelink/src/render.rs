//! # Render Callback Adapter
//!
//! The body behind [`RenderSink`]: bracket with the in-flight guard,
//! validate, delegate to the store's non-blocking snapshot. Every failure
//! is a defensive no-op - the destination is never partially written and
//! the host thread is never blocked.

use std::sync::Arc;

use framelink_core::{FrameStore, InFlight, ShutdownFlag, Snapshot};

use crate::platform::RenderSink;

/// Render callback state shared with the display host.
pub struct RenderAdapter {
    store: Arc<FrameStore>,
    in_flight: Arc<InFlight>,
    shutdown: Arc<ShutdownFlag>,
}

impl RenderAdapter {
    /// Creates the adapter over a session's frame store.
    #[must_use]
    pub fn new(store: Arc<FrameStore>, in_flight: Arc<InFlight>, shutdown: Arc<ShutdownFlag>) -> Self {
        Self {
            store,
            in_flight,
            shutdown,
        }
    }
}

impl RenderSink for RenderAdapter {
    fn fill(&self, dest: &mut [u8]) {
        // First action on entry, released on every exit path.
        let _guard = self.in_flight.enter();

        if self.shutdown.is_requested() {
            return;
        }
        if dest.len() < self.store.frame_size() {
            tracing::trace!(
                dest_len = dest.len(),
                frame_size = self.store.frame_size(),
                "undersized render destination, frame skipped"
            );
            return;
        }
        match self.store.snapshot_for_render(dest) {
            Snapshot::Written => {}
            Snapshot::Skipped(reason) => {
                tracing::trace!(?reason, "render snapshot skipped");
            }
        }
    }
}
