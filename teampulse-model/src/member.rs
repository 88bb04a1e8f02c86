//! Member types for the Team Pulse dashboard.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// Unique identifier for a team member.
///
/// Wraps the opaque identifier string assigned by the external directory.
/// Stable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    /// Creates a member id from a directory-provided identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Availability status of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    /// Member is actively working.
    Working,
    /// Member is on a break.
    Break,
    /// Member is in a meeting.
    Meeting,
    /// Member is offline.
    Offline,
}

impl MemberStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [Self::Working, Self::Break, Self::Meeting, Self::Offline];
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Working => write!(f, "Working"),
            Self::Break => write!(f, "Break"),
            Self::Meeting => write!(f, "Meeting"),
            Self::Offline => write!(f, "Offline"),
        }
    }
}

/// A team participant.
///
/// The roster of members is created once by the bulk fetch; afterwards only
/// `status` and `tasks` mutate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Directory-assigned identifier, stable across the session.
    pub id: MemberId,
    /// Display name, immutable after creation.
    pub name: String,
    /// Portrait URL, immutable after creation.
    pub picture: String,
    /// Current availability status.
    pub status: MemberStatus,
    /// Assigned tasks, in assignment order.
    pub tasks: Vec<Task>,
}

impl Member {
    /// Creates a freshly fetched member: offline, no tasks.
    #[must_use]
    pub fn new(id: MemberId, name: impl Into<String>, picture: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            picture: picture.into(),
            status: MemberStatus::Offline,
            tasks: Vec::new(),
        }
    }

    /// Returns a mutable reference to the task with the given id, if any.
    pub fn task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == *task_id)
    }

    /// Number of tasks that are not yet completed.
    #[must_use]
    pub fn active_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }
}
