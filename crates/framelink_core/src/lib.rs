//! # FRAMELINK Core
//!
//! Timing and exchange primitives for bridging a fixed-rate application loop
//! to an asynchronous display/input host:
//!
//! - Wrap-safe tick arithmetic and a drift-correcting frame scheduler
//! - A double-buffered framebuffer store with a non-blocking render snapshot
//! - A bounded drop-newest input queue
//! - In-flight guards and a shutdown flag for safe callback teardown
//!
//! ## Architecture Rules
//!
//! 1. **Callbacks never block** - the render snapshot and the input enqueue
//!    are `try_` operations; a dropped frame or event beats a stalled host
//! 2. **Single writer per buffer** - the step lock owns the back buffer,
//!    the commit copy owns the front buffer
//! 3. **Teardown is ordered** - flag, unregister, drain, then free

pub mod buttons;
pub mod clock;
pub mod fixed;
pub mod lifecycle;
pub mod queue;
pub mod sched;
pub mod store;

pub use buttons::{ButtonState, BTN_A, BTN_B, BTN_DOWN, BTN_LEFT, BTN_RIGHT, BTN_UP};
pub use clock::{ManualTickSource, StdTickSource, TickCount, TickSource};
pub use lifecycle::{InFlight, InFlightGuard, ShutdownFlag};
pub use queue::{InputEvent, InputKey, InputKind, InputQueue};
pub use sched::{Frame, FrameScheduler};
pub use store::{FrameStore, SkipReason, Snapshot};
