//! # FRAMELINK
//!
//! A real-time presentation and input pipeline: an externally-driven game
//! producing frames at a fixed logical rate on one side, an asynchronous
//! display/input host invoking callbacks on its own threads on the other.
//!
//! ## Components
//!
//! ```text
//! ┌────────────┐   wait    ┌────────────────────── Session ───────────────┐
//! │ Scheduler  │──────────>│ drain input -> step lock -> game.step        │
//! └────────────┘           │ -> commit back->front -> display.commit()   │
//!                          └───────────────┬──────────────────┬──────────┘
//!        host threads                      │                  │
//!  ┌──────────────────┐   deliver   ┌──────┴─────┐    ┌───────┴───────┐
//!  │ input callback   │────────────>│ InputQueue │    │  FrameStore   │
//!  │ render callback  │<────────────│ (bounded)  │    │ (back/front)  │
//!  └──────────────────┘  snapshot   └────────────┘    └───────────────┘
//! ```
//!
//! The host-facing callbacks never block; the main loop suspends only in
//! the scheduler's wait and on the step lock. Teardown is sequenced by
//! in-flight guards so no callback outlives the state it reads.

pub mod config;
pub mod error;
pub mod input;
pub mod platform;
pub mod render;
pub mod session;

pub use config::{SessionConfig, DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_SIZE};
pub use error::{HostError, SessionError, SessionResult};
pub use input::InputRouter;
pub use platform::{DisplayHost, Game, InputHost, InputSink, RenderSink, StepContext};
pub use render::RenderAdapter;
pub use session::Session;

pub use framelink_core::{
    ButtonState, Frame, FrameScheduler, FrameStore, InFlight, InFlightGuard, InputEvent, InputKey,
    InputKind, InputQueue, ManualTickSource, ShutdownFlag, SkipReason, Snapshot, StdTickSource,
    TickCount, TickSource,
};
