//! Countdown computation and tick scheduling.
//!
//! This module owns the time arithmetic: decomposing the distance to the
//! target instant into display units, formatting digits, and driving the
//! recurring one-second update schedule per widget instance.

pub mod clock;
pub mod timer;

pub use clock::{target_millis, Countdown, TimeUnit};
pub use timer::{TickTimer, TimerState};
