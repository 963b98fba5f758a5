//! # External Interfaces
//!
//! The narrow seams between this pipeline and its collaborators: the game on
//! one side, the host platform's display and input subsystems on the other.
//! Nothing outside this module is reachable by either party.

use std::sync::Arc;

use framelink_core::InputEvent;

use crate::error::HostError;

/// The external game collaborator.
///
/// `setup` and `step` run on the main-loop thread while the step lock is
/// held; the game owns the back buffer for their duration and must not
/// retain references past the call.
pub trait Game {
    /// Called once before the loop starts.
    fn setup(&mut self, ctx: &mut StepContext<'_>);

    /// Called once per logical tick. Mutates the back buffer.
    fn step(&mut self, ctx: &mut StepContext<'_>);

    /// Receives input events, in the order received, strictly before the
    /// step that consumes them.
    fn handle_input(&mut self, event: InputEvent) {
        let _ = event;
    }

    /// Opaque state query: whether an exit gesture may end the session now.
    fn exit_permitted(&self) -> bool {
        true
    }
}

/// Exclusive view of the frame under construction, passed to [`Game::setup`]
/// and [`Game::step`].
pub struct StepContext<'a> {
    frame: &'a mut [u8],
    buttons: u8,
    elapsed_ms: u16,
    exit: &'a mut bool,
}

impl<'a> StepContext<'a> {
    /// Builds a context for one step.
    #[must_use]
    pub fn new(frame: &'a mut [u8], buttons: u8, elapsed_ms: u16, exit: &'a mut bool) -> Self {
        Self {
            frame,
            buttons,
            elapsed_ms,
            exit,
        }
    }

    /// The back buffer, for the game to draw into.
    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut *self.frame
    }

    /// Currently held buttons as a packed mask (`BTN_*` bits).
    #[must_use]
    pub const fn pressed(&self) -> u8 {
        self.buttons
    }

    /// Milliseconds since session start, wrapping at `u16::MAX`.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u16 {
        self.elapsed_ms
    }

    /// Asks the session to end after this step completes.
    pub fn request_exit(&mut self) {
        *self.exit = true;
    }
}

/// The render callback exposed to the display host.
///
/// The host may invoke [`RenderSink::fill`] from any thread, at any time,
/// at any frequency. The implementation never blocks.
pub trait RenderSink: Send + Sync {
    /// Fills `dest` with the current frame, or leaves it untouched.
    fn fill(&self, dest: &mut [u8]);
}

/// The input callback exposed to the input host.
///
/// Same contract as [`RenderSink`]: any thread, any time, never blocks.
pub trait InputSink: Send + Sync {
    /// Delivers one input event.
    fn deliver(&self, event: InputEvent);
}

/// The platform's display subsystem.
pub trait DisplayHost {
    /// Registers the render callback. Until unregistered, the host may
    /// invoke it at will.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the host cannot accept the callback;
    /// the launch sequence aborts and unwinds.
    fn register_render(&mut self, sink: Arc<dyn RenderSink>) -> Result<(), HostError>;

    /// Unregisters the render callback. No *new* invocations start after
    /// this returns; an in-progress one may still be executing.
    fn unregister_render(&mut self);

    /// Triggers an asynchronous display commit; the host will call the
    /// registered render callback when it wants to paint.
    fn commit(&mut self);
}

/// The platform's input-event subsystem.
pub trait InputHost {
    /// Subscribes the input callback to the host's event stream.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the host cannot accept the subscription.
    fn subscribe(&mut self, sink: Arc<dyn InputSink>) -> Result<(), HostError>;

    /// Removes the subscription. Same caveat as
    /// [`DisplayHost::unregister_render`].
    fn unsubscribe(&mut self);
}
