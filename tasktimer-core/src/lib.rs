//! Countdown core shared by the tasktimer front end.
//!
//! Nothing here touches the terminal, the clock or the desktop. Those arrive
//! through the [`Scheduler`] and [`Notifier`] traits so the whole state
//! machine can be driven tick by tick in tests.

pub mod controller;
pub mod format;
pub mod input;
pub mod log;
pub mod notify;
pub mod scheduler;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod timer;

pub use controller::{Controller, Settings};
pub use format::{elapsed_label, format_duration, format_time, progress_percent};
pub use input::{normalize_field, parse_field, DurationInput, InputError};
pub use log::{CompletedTask, CompletedTaskLog, TaskId, UNNAMED_TASK};
pub use notify::{Notification, Notifier, Permission};
pub use scheduler::{Scheduler, TickHandle, TICK_INTERVAL};
pub use timer::{Effect, Phase, TimerMachine, TimerState, WarningTracking, DEFAULT_WARNING_PERIOD};
