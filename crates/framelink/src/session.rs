//! # Session
//!
//! One application session: owned context, scheduler-driven main loop,
//! safe teardown.
//!
//! ## Control Flow
//!
//! ```text
//! launch:   validate config -> build store/queue/guards
//!           -> register render callback -> subscribe input callback
//! run:      game.setup under the step lock, first commit
//!           loop:
//!             scheduler wait            (only main-loop suspension point)
//!             drain input queue         (exit interception, button state,
//!                                        forward to game - FIFO, pre-step)
//!             step lock -> game.step -> unlock
//!             commit back -> front
//!             display.commit()          (host paints asynchronously)
//!           until exit requested        (checked once per iteration)
//! teardown: shutdown flag -> unsubscribe input -> drain input callback
//!           -> unregister render -> drain render callback -> drop state
//! ```
//!
//! Teardown runs in strict reverse order of acquisition, and a launch
//! failure unwinds through the same path, skipping resources not yet
//! acquired.

use std::sync::Arc;
use std::time::Duration;

use framelink_core::{
    ButtonState, FrameScheduler, FrameStore, InFlight, InputKind, InputQueue, ShutdownFlag,
    TickSource,
};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::input::InputRouter;
use crate::platform::{DisplayHost, Game, InputHost, StepContext};
use crate::render::RenderAdapter;

/// An active session bridging one game to one host.
///
/// All shared pipeline state lives here as owned fields; the session's
/// lifetime is one application run, not the whole process.
pub struct Session<G, D, I, T>
where
    G: Game,
    D: DisplayHost,
    I: InputHost,
    T: TickSource,
{
    game: G,
    display: D,
    input: I,
    source: T,
    config: SessionConfig,
    store: Arc<FrameStore>,
    queue: Arc<InputQueue>,
    buttons: ButtonState,
    shutdown: Arc<ShutdownFlag>,
    render_in_flight: Arc<InFlight>,
    input_in_flight: Arc<InFlight>,
    exit_requested: bool,
    steps: u64,
    torn_down: bool,
}

impl<G, D, I, T> Session<G, D, I, T>
where
    G: Game,
    D: DisplayHost,
    I: InputHost,
    T: TickSource,
{
    /// Builds the session context and registers both callbacks with the
    /// host.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the configuration is invalid or a host
    /// rejects a registration. A partial launch unwinds through the normal
    /// teardown ordering before returning.
    pub fn launch(
        game: G,
        mut display: D,
        mut input: I,
        source: T,
        config: SessionConfig,
    ) -> SessionResult<Self> {
        config.validate()?;

        let shutdown = Arc::new(ShutdownFlag::new());
        let store = FrameStore::new(config.frame_size, Arc::clone(&shutdown));
        let queue = Arc::new(InputQueue::new(config.input_queue_capacity));
        let render_in_flight = Arc::new(InFlight::new());
        let input_in_flight = Arc::new(InFlight::new());

        let render_sink = Arc::new(RenderAdapter::new(
            Arc::clone(&store),
            Arc::clone(&render_in_flight),
            Arc::clone(&shutdown),
        ));
        if let Err(err) = display.register_render(render_sink) {
            // Nothing registered yet; no drain needed.
            return Err(SessionError::RenderRegistration(err));
        }

        let input_sink = Arc::new(InputRouter::new(
            Arc::clone(&queue),
            Arc::clone(&input_in_flight),
            Arc::clone(&shutdown),
        ));
        if let Err(err) = input.subscribe(input_sink) {
            // Unwind the render side through the normal teardown ordering.
            shutdown.request();
            display.unregister_render();
            render_in_flight.wait_drained(Duration::from_millis(config.drain_poll_interval_ms));
            return Err(SessionError::InputRegistration(err));
        }

        tracing::info!(
            target_fps = config.target_fps,
            frame_size = config.frame_size,
            queue_capacity = config.input_queue_capacity,
            "session launched"
        );

        Ok(Self {
            game,
            display,
            input,
            source,
            config,
            store,
            queue,
            buttons: ButtonState::new(),
            shutdown,
            render_in_flight,
            input_in_flight,
            exit_requested: false,
            steps: 0,
            torn_down: false,
        })
    }

    /// Runs the session to completion: setup, main loop, teardown.
    pub fn run(&mut self) {
        let mut scheduler = FrameScheduler::new(
            self.source.frequency(),
            self.config.target_fps,
            self.config.stall_threshold_periods,
            self.source.now(),
        );

        self.step(true);

        while !self.exit_requested {
            let _resynced = scheduler.wait_for_step(&self.source);
            self.drain_input();
            // The exit flag is checked once per iteration, at the top: an
            // accepted exit gesture still lets this step finish.
            self.step(false);
        }

        self.teardown();
    }

    /// Steps committed so far (setup included).
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The game collaborator, for inspection after [`Session::run`].
    #[must_use]
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Whether the loop has been asked to end.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Drains all pending input, in FIFO order, before the next step.
    ///
    /// A long press of the exit key is intercepted here - not forwarded -
    /// when the game's opaque state query permits exit. The query runs on
    /// the main loop, never in the asynchronous callback.
    fn drain_input(&mut self) {
        while let Some(event) = self.queue.drain_one() {
            if event.key == self.config.exit_key
                && event.kind == InputKind::LongPress
                && self.game.exit_permitted()
            {
                tracing::info!("exit gesture accepted");
                self.exit_requested = true;
                continue;
            }
            self.buttons.apply(event);
            self.game.handle_input(event);
        }
    }

    /// Runs one game step under the step lock, then publishes the frame.
    fn step(&mut self, setup: bool) {
        let buttons = self.buttons.pressed();
        let elapsed_ms = self.elapsed_ms();
        let mut exit = false;
        {
            let mut frame = self.store.step_buffer();
            let mut ctx = StepContext::new(&mut frame[..], buttons, elapsed_ms, &mut exit);
            if setup {
                self.game.setup(&mut ctx);
            } else {
                self.game.step(&mut ctx);
            }
        }
        if exit {
            self.exit_requested = true;
        }

        self.store.commit_frame();
        self.display.commit();
        self.steps += 1;
    }

    /// Milliseconds since session start, wrapping at `u16::MAX`.
    #[allow(clippy::cast_possible_truncation)]
    fn elapsed_ms(&self) -> u16 {
        let ticks = u64::from(self.source.now().raw());
        let ms = ticks * 1_000 / u64::from(self.source.frequency());
        ms as u16
    }

    /// Tears the session down in strict reverse order of acquisition.
    ///
    /// Unregistration alone does not guarantee an in-progress callback has
    /// finished; the drains close that race before state is dropped.
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let poll = Duration::from_millis(self.config.drain_poll_interval_ms);

        self.shutdown.request();
        self.input.unsubscribe();
        self.input_in_flight.wait_drained(poll);
        self.display.unregister_render();
        self.render_in_flight.wait_drained(poll);

        tracing::info!(steps = self.steps, "session torn down");
    }
}

impl<G, D, I, T> Drop for Session<G, D, I, T>
where
    G: Game,
    D: DisplayHost,
    I: InputHost,
    T: TickSource,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
