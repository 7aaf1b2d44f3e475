//! The repeating tick source seam.
//!
//! The core never owns a clock. Whoever hosts the controller supplies a
//! [`Scheduler`] that calls back into `Controller::tick` roughly once per
//! interval until the returned handle is cancelled.

use std::time::Duration;

/// Default spacing between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub trait Scheduler {
    type Handle: TickHandle;

    fn schedule_repeating(&mut self, interval: Duration) -> Self::Handle;
}

/// Cancels a running tick source. Consumed so it cannot be cancelled twice.
pub trait TickHandle {
    fn cancel(self);
}
