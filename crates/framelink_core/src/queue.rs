//! # Input Event Queue
//!
//! Bounded FIFO between the asynchronous input callback (producer) and the
//! main loop (consumer).
//!
//! Both ends are non-blocking. On overflow the newest event is dropped -
//! the producer runs on a host thread that must never stall, and a lost
//! keypress is preferable to a frozen input pipeline.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

/// Physical key identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKey {
    /// D-pad up.
    Up,
    /// D-pad down.
    Down,
    /// D-pad left.
    Left,
    /// D-pad right.
    Right,
    /// Primary action key.
    Ok,
    /// Secondary action key; a long press is the conventional exit gesture.
    Back,
}

/// What happened to the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    /// Key went down.
    Press,
    /// Key came back up.
    Release,
    /// Key has been held past the host's long-press threshold.
    LongPress,
}

/// One input event, produced by the host and consumed exactly once by the
/// main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Which key.
    pub key: InputKey,
    /// Press, release or long press.
    pub kind: InputKind,
}

impl InputEvent {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(key: InputKey, kind: InputKind) -> Self {
        Self { key, kind }
    }
}

/// Bounded drop-newest input queue.
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
    capacity: usize,
}

impl InputQueue {
    /// Creates a queue holding at most `capacity` pending events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "input queue capacity must be non-zero");
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Enqueues an event without blocking.
    ///
    /// Returns false if the event was dropped (queue full or consumer gone).
    pub fn offer(&self, event: InputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                tracing::debug!(?dropped, "input queue full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Dequeues the oldest pending event without blocking.
    #[must_use]
    pub fn drain_one(&self) -> Option<InputEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: InputKey) -> InputEvent {
        InputEvent::new(key, InputKind::Press)
    }

    #[test]
    fn test_fifo_order_preserved() {
        let queue = InputQueue::new(8);
        let events = [
            press(InputKey::Up),
            press(InputKey::Ok),
            InputEvent::new(InputKey::Ok, InputKind::Release),
            press(InputKey::Left),
        ];

        for event in events {
            assert!(queue.offer(event));
        }
        for event in events {
            assert_eq!(queue.drain_one(), Some(event));
        }
        assert_eq!(queue.drain_one(), None);
    }

    #[test]
    fn test_overflow_drops_newest() {
        let queue = InputQueue::new(2);

        assert!(queue.offer(press(InputKey::Up)));
        assert!(queue.offer(press(InputKey::Down)));
        // C is dropped, not blocked, and the queue never exceeds capacity.
        assert!(!queue.offer(press(InputKey::Left)));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.drain_one(), Some(press(InputKey::Up)));
        assert_eq!(queue.drain_one(), Some(press(InputKey::Down)));
        assert_eq!(queue.drain_one(), None);
    }

    #[test]
    fn test_drain_empty_is_none() {
        let queue = InputQueue::new(4);
        assert!(queue.is_empty());
        assert_eq!(queue.drain_one(), None);
    }

    #[test]
    fn test_queue_recovers_after_drain() {
        let queue = InputQueue::new(2);
        assert!(queue.offer(press(InputKey::Up)));
        assert!(queue.offer(press(InputKey::Down)));
        assert!(!queue.offer(press(InputKey::Ok)));

        let _ = queue.drain_one();
        assert!(queue.offer(press(InputKey::Ok)));
        assert_eq!(queue.len(), 2);
    }
}
