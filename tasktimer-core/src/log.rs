//! The in-memory record of finished sessions

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

/// Label used when a session finishes without a task name.
pub const UNNAMED_TASK: &str = "Unnamed Task";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A finished session. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub id: TaskId,
    pub name: String,
    /// Configured length of the session, in seconds.
    pub duration: u64,
    /// Always equal to `duration`: sessions are only logged on natural completion.
    pub time_spent: u64,
    pub completed_at: DateTime<Local>,
}

impl CompletedTask {
    pub fn new(name: &str, duration: u64) -> Self {
        let name = if name.is_empty() { UNNAMED_TASK } else { name };
        Self {
            id: TaskId::new(),
            name: name.to_string(),
            duration,
            time_spent: duration,
            completed_at: Local::now(),
        }
    }
}

/// Completed sessions, newest first.
#[derive(Debug, Clone, Default)]
pub struct CompletedTaskLog {
    entries: VecDeque<CompletedTask>,
}

impl CompletedTaskLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, task: CompletedTask) {
        self.entries.push_front(task);
    }

    /// Drop the entry with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|task| task.id != id);
        self.entries.len() != before
    }

    pub fn get(&self, index: usize) -> Option<&CompletedTask> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompletedTask> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all logged durations, in seconds.
    pub fn total_time(&self) -> u64 {
        self.entries.iter().map(|task| task.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(log: &CompletedTaskLog) -> Vec<&str> {
        log.iter().map(|task| task.name.as_str()).collect()
    }

    #[test]
    fn test_append_prepends() {
        let mut log = CompletedTaskLog::new();
        log.append(CompletedTask::new("first", 60));
        log.append(CompletedTask::new("second", 120));
        log.append(CompletedTask::new("third", 180));

        assert_eq!(names(&log), vec!["third", "second", "first"]);
        assert_eq!(log.total_time(), 360);
    }

    #[test]
    fn test_remove_by_id() {
        let mut log = CompletedTaskLog::new();
        log.append(CompletedTask::new("keep", 60));
        let doomed = CompletedTask::new("drop", 60);
        let id = doomed.id;
        log.append(doomed);

        assert!(log.remove(id));
        assert_eq!(names(&log), vec!["keep"]);
        assert!(!log.remove(id));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut log = CompletedTaskLog::new();
        log.append(CompletedTask::new("a", 10));
        log.append(CompletedTask::new("b", 20));
        let before: Vec<CompletedTask> = log.iter().cloned().collect();

        assert!(!log.remove(TaskId::new()));

        let after: Vec<CompletedTask> = log.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_unnamed_fallback() {
        let task = CompletedTask::new("", 300);
        assert_eq!(task.name, UNNAMED_TASK);
        assert_eq!(task.duration, 300);
        assert_eq!(task.time_spent, 300);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = CompletedTask::new("x", 1);
        let b = CompletedTask::new("x", 1);
        assert_ne!(a.id, b.id);
    }
}
