//! # Input Callback Adapter
//!
//! Producer side of the input pipeline: the host delivers events on its own
//! thread, the router enqueues them without blocking. Consumption, exit
//! interception and button tracking happen on the main loop (see
//! `Session::drain_input`), where the game's state query is available.

use std::sync::Arc;

use framelink_core::{InFlight, InputEvent, InputQueue, ShutdownFlag};

use crate::platform::InputSink;

/// Input callback state shared with the input host.
pub struct InputRouter {
    queue: Arc<InputQueue>,
    in_flight: Arc<InFlight>,
    shutdown: Arc<ShutdownFlag>,
}

impl InputRouter {
    /// Creates the router over a session's input queue.
    #[must_use]
    pub fn new(queue: Arc<InputQueue>, in_flight: Arc<InFlight>, shutdown: Arc<ShutdownFlag>) -> Self {
        Self {
            queue,
            in_flight,
            shutdown,
        }
    }
}

impl InputSink for InputRouter {
    fn deliver(&self, event: InputEvent) {
        // First action on entry, released on every exit path.
        let _guard = self.in_flight.enter();

        if self.shutdown.is_requested() {
            return;
        }
        // Overflow drops the event; the producer must never stall.
        let _ = self.queue.offer(event);
    }
}
