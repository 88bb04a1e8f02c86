//! Task types for the Team Pulse dashboard.
//!
//! A [`Task`] is a unit of work assigned to a member. Tasks are created
//! with zero progress and are only ever mutated through
//! [`Task::set_progress`], which keeps the `completed` flag derived from
//! the progress value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of work assigned to a team member.
///
/// Invariant: `completed == (progress == 100)`. The flag is never set
/// independently; every progress write goes through [`Task::set_progress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (UUID v7, time-ordered).
    pub id: TaskId,
    /// Free-text label.
    pub title: String,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Completion percentage in [0, 100].
    pub progress: u8,
    /// Whether the task is finished. Derived from `progress`.
    pub completed: bool,
}

impl Task {
    /// Creates a new task with a fresh id, zero progress, not completed.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            due_date,
            progress: 0,
            completed: false,
        }
    }

    /// Sets the progress, clamping the requested value into [0, 100].
    ///
    /// `completed` becomes `true` iff the clamped value is exactly 100.
    pub fn set_progress(&mut self, requested: i32) {
        let clamped = u8::try_from(requested.clamp(0, 100)).unwrap_or(100);
        self.progress = clamped;
        self.completed = clamped == 100;
    }
}
