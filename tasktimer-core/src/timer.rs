//! Countdown state machine.
//!
//! Every operation mutates the state and then runs [`TimerMachine::evaluate`]
//! against a snapshot taken beforehand. Completion and warning-window edges
//! are detected there and nowhere else, which keeps notifications from being
//! requested twice for the same edge.

use crate::format::format_duration;
use crate::input::DurationInput;
use crate::log::CompletedTask;
use crate::notify::Notification;
use tracing::{debug, info};

/// Seconds before the end at which the warning window opens.
pub const DEFAULT_WARNING_PERIOD: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    pub is_running: bool,
    /// Seconds remaining. Never above `total_time`.
    pub time_left: u64,
    pub total_time: u64,
    pub current_task: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningTracking {
    pub period: u64,
    pub in_window: bool,
    /// The entry notification went out for the current window.
    pub shown: bool,
}

impl WarningTracking {
    fn new(period: u64) -> Self {
        Self {
            period,
            in_window: false,
            shown: false,
        }
    }
}

/// Output of an operation, applied by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Completed(CompletedTask),
    Notify(Notification),
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    is_running: bool,
    time_left: u64,
    in_window: bool,
}

#[derive(Debug, Clone)]
pub struct TimerMachine {
    state: TimerState,
    warning: WarningTracking,
    started: bool,
}

impl Default for TimerMachine {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_PERIOD)
    }
}

impl TimerMachine {
    pub fn new(warning_period: u64) -> Self {
        Self {
            state: TimerState::default(),
            warning: WarningTracking::new(warning_period),
            started: false,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn warning(&self) -> &WarningTracking {
        &self.warning
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_in_warning_period(&self) -> bool {
        self.warning.in_window
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_running {
            Phase::Running
        } else if self.started && self.state.time_left > 0 {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }

    /// The tick source is only wanted while there is something to count down.
    pub fn needs_ticks(&self) -> bool {
        self.state.is_running && self.state.time_left > 0
    }

    /// Load a new duration. Zero is ignored so an active session is not wiped by accident.
    pub fn configure(&mut self, duration: DurationInput, task: &str) -> Vec<Effect> {
        let total = duration.total_seconds();
        if total == 0 {
            debug!("Ignoring zero duration");
            return Vec::new();
        }
        let before = self.snapshot();
        self.state.time_left = total;
        self.state.total_time = total;
        self.state.current_task = task.to_string();
        info!("Configured {}s for {:?}", total, task);
        self.evaluate(before)
    }

    pub fn start(&mut self, task: &str) -> Vec<Effect> {
        let before = self.snapshot();
        self.state.is_running = true;
        self.state.current_task = task.to_string();
        self.started = true;
        self.evaluate(before)
    }

    pub fn pause(&mut self) -> Vec<Effect> {
        let before = self.snapshot();
        self.state.is_running = false;
        self.evaluate(before)
    }

    /// Unlike `configure`, a zero duration is accepted.
    pub fn reset(&mut self, duration: DurationInput, task: &str) -> Vec<Effect> {
        let before = self.snapshot();
        let total = duration.total_seconds();
        self.state = TimerState {
            is_running: false,
            time_left: total,
            total_time: total,
            current_task: task.to_string(),
        };
        self.started = false;
        info!("Reset to {}s", total);
        self.evaluate(before)
    }

    pub fn tick(&mut self) -> Vec<Effect> {
        let before = self.snapshot();
        if self.state.is_running && self.state.time_left > 0 {
            self.state.time_left -= 1;
        }
        self.evaluate(before)
    }

    pub fn set_warning_period(&mut self, seconds: u64) -> Vec<Effect> {
        let before = self.snapshot();
        self.warning.period = seconds;
        self.evaluate(before)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            is_running: self.state.is_running,
            time_left: self.state.time_left,
            in_window: self.warning.in_window,
        }
    }

    fn evaluate(&mut self, before: Snapshot) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.state.is_running && self.state.time_left == 0 {
            let task = CompletedTask::new(&self.state.current_task, self.state.total_time);
            info!("Session {:?} complete after {}s", task.name, task.duration);
            self.state.is_running = false;
            self.started = false;
            let notice = Notification::new(
                "Timer Complete!",
                format!("{} session finished!", task.name),
            );
            effects.push(Effect::Completed(task));
            effects.push(Effect::Notify(notice));
        }

        if before.is_running != self.state.is_running {
            debug!(
                "Running {} -> {} at {}s (was {}s)",
                before.is_running, self.state.is_running, self.state.time_left, before.time_left
            );
        }

        let in_window = self.state.is_running
            && self.state.time_left > 0
            && self.state.time_left <= self.warning.period;

        if in_window {
            if !before.in_window {
                debug!("Entered warning window at {}s", self.state.time_left);
                self.warning.shown = false;
            }
            self.warning.in_window = true;

            if !self.warning.shown && self.state.time_left == self.warning.period {
                self.warning.shown = true;
                let task = if self.state.current_task.is_empty() {
                    "your task"
                } else {
                    self.state.current_task.as_str()
                };
                effects.push(Effect::Notify(Notification::new(
                    "Timer Warning!",
                    format!(
                        "Only {} remaining for {}",
                        format_duration(self.warning.period),
                        task
                    ),
                )));
            }
        } else {
            if before.in_window {
                debug!("Left warning window");
            }
            self.warning.in_window = false;
            self.warning.shown = false;
        }

        effects
    }
}
