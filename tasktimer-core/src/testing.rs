//! In-memory collaborators for driving a [`Controller`](crate::Controller)
//! without a real clock or desktop.

use crate::notify::{Notification, Notifier, Permission};
use crate::scheduler::{Scheduler, TickHandle};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Schedule {
    next_id: usize,
    active: Vec<usize>,
    scheduled: usize,
    cancelled: usize,
    last_interval: Option<Duration>,
}

/// Counts tick sources instead of running them. Tests call `tick()` themselves.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    inner: Rc<RefCell<Schedule>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick sources scheduled and not yet cancelled.
    pub fn active(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn scheduled(&self) -> usize {
        self.inner.borrow().scheduled
    }

    pub fn cancelled(&self) -> usize {
        self.inner.borrow().cancelled
    }

    pub fn last_interval(&self) -> Option<Duration> {
        self.inner.borrow().last_interval
    }
}

#[derive(Debug)]
pub struct ManualHandle {
    id: usize,
    inner: Rc<RefCell<Schedule>>,
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_repeating(&mut self, interval: Duration) -> ManualHandle {
        let mut schedule = self.inner.borrow_mut();
        let id = schedule.next_id;
        schedule.next_id += 1;
        schedule.active.push(id);
        schedule.scheduled += 1;
        schedule.last_interval = Some(interval);
        ManualHandle {
            id,
            inner: Rc::clone(&self.inner),
        }
    }
}

impl TickHandle for ManualHandle {
    fn cancel(self) {
        let mut schedule = self.inner.borrow_mut();
        schedule.active.retain(|&id| id != self.id);
        schedule.cancelled += 1;
    }
}

/// Keeps every delivered notification.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    pub permission: Permission,
    /// Answer given when permission is requested.
    pub answer: Permission,
    pub permission_requests: usize,
    pub delivered: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn granted() -> Self {
        Self::with_permission(Permission::Granted, Permission::Granted)
    }

    pub fn denied() -> Self {
        Self::with_permission(Permission::Denied, Permission::Denied)
    }

    /// Undecided until asked, then answers with `answer`.
    pub fn undecided(answer: Permission) -> Self {
        Self::with_permission(Permission::Default, answer)
    }

    fn with_permission(permission: Permission, answer: Permission) -> Self {
        Self {
            permission,
            answer,
            permission_requests: 0,
            delivered: Vec::new(),
        }
    }

    pub fn titles(&self) -> Vec<&str> {
        self.delivered.iter().map(|n| n.title.as_str()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) {
        self.permission_requests += 1;
        self.permission = self.answer;
    }

    fn notify(&mut self, notification: &Notification) {
        self.delivered.push(notification.clone());
    }
}
