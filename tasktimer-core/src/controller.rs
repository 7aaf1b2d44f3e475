//! Owns the timer, the completed-task log and the two outside capabilities.
//!
//! All user intents and ticks go through here. After each one the effects
//! produced by the state machine are applied and the tick source is brought in
//! line with the new state.

use crate::input::DurationInput;
use crate::log::{CompletedTaskLog, TaskId};
use crate::notify::{Notification, Notifier, Permission};
use crate::scheduler::{Scheduler, TickHandle, TICK_INTERVAL};
use crate::timer::{Effect, TimerMachine, DEFAULT_WARNING_PERIOD};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Settings {
    pub tick_interval: Duration,
    pub warning_period: u64,
    /// Attached to every notification request.
    pub icon: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            warning_period: DEFAULT_WARNING_PERIOD,
            icon: None,
        }
    }
}

pub struct Controller<S: Scheduler, N: Notifier> {
    machine: TimerMachine,
    log: CompletedTaskLog,
    scheduler: S,
    ticker: Option<S::Handle>,
    notifier: N,
    settings: Settings,
}

impl<S: Scheduler, N: Notifier> Controller<S, N> {
    pub fn new(scheduler: S, notifier: N, settings: Settings) -> Self {
        Self {
            machine: TimerMachine::new(settings.warning_period),
            log: CompletedTaskLog::new(),
            scheduler,
            ticker: None,
            notifier,
            settings,
        }
    }

    pub fn machine(&self) -> &TimerMachine {
        &self.machine
    }

    pub fn log(&self) -> &CompletedTaskLog {
        &self.log
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn configure(&mut self, duration: DurationInput, task: &str) {
        let effects = self.machine.configure(duration, task);
        self.apply(effects);
    }

    pub fn start(&mut self, task: &str) {
        if self.notifier.permission() == Permission::Default {
            debug!("Requesting notification permission");
            self.notifier.request_permission();
        }
        let effects = self.machine.start(task);
        self.apply(effects);
    }

    pub fn pause(&mut self) {
        let effects = self.machine.pause();
        self.apply(effects);
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self, task: &str) {
        if self.machine.is_running() {
            self.pause();
        } else {
            self.start(task);
        }
    }

    pub fn reset(&mut self, duration: DurationInput, task: &str) {
        let effects = self.machine.reset(duration, task);
        self.apply(effects);
    }

    pub fn set_warning_period(&mut self, seconds: u64) {
        let effects = self.machine.set_warning_period(seconds);
        self.apply(effects);
    }

    pub fn tick(&mut self) {
        let effects = self.machine.tick();
        self.apply(effects);
    }

    /// Delete a logged session. Unknown ids are ignored.
    pub fn remove_completed(&mut self, id: TaskId) -> bool {
        let removed = self.log.remove(id);
        if removed {
            debug!("Removed completed task {}", id);
        }
        removed
    }

    /// Cancel the tick source. Also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.ticker.take() {
            debug!("Cancelling tick source on shutdown");
            handle.cancel();
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Completed(task) => self.log.append(task),
                Effect::Notify(notification) => self.dispatch(notification),
            }
        }
        self.sync_ticker();
    }

    fn dispatch(&mut self, notification: Notification) {
        let notification = notification.with_icon(self.settings.icon.clone());
        match self.notifier.permission() {
            Permission::Granted => {
                info!("Notifying: {}", notification.title);
                self.notifier.notify(&notification);
            }
            permission => {
                debug!(
                    "Skipping notification {:?}, permission is {:?}",
                    notification.title, permission
                );
            }
        }
    }

    fn sync_ticker(&mut self) {
        match (self.machine.needs_ticks(), self.ticker.is_some()) {
            // Only scheduled while none is held, so at most one is ever alive.
            (true, false) => {
                debug!("Scheduling ticks every {:?}", self.settings.tick_interval);
                self.ticker = Some(self.scheduler.schedule_repeating(self.settings.tick_interval));
            }
            (false, true) => {
                if let Some(handle) = self.ticker.take() {
                    debug!("Cancelling tick source");
                    handle.cancel();
                }
            }
            _ => {}
        }
    }
}

impl<S: Scheduler, N: Notifier> Drop for Controller<S, N> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
