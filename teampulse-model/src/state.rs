//! Application state tree for the Team Pulse dashboard.
//!
//! [`AppState`] is the single source of truth. It is owned exclusively by
//! the store; consumers read snapshots and change state only through the
//! store's named mutation operations.

use serde::{Deserialize, Serialize};

use crate::member::{Member, MemberId};

/// Which view is active. Does not affect the underlying data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Aggregated team view.
    #[default]
    Lead,
    /// Personal view for the current user.
    Member,
}

impl Role {
    /// Returns the other role.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Lead => Self::Member,
            Self::Member => Self::Lead,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lead => write!(f, "Lead"),
            Self::Member => write!(f, "Member"),
        }
    }
}

/// Lifecycle of the one-shot roster fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchPhase {
    /// No fetch has been dispatched yet.
    #[default]
    NotStarted,
    /// A fetch is in flight.
    Loading,
    /// The roster was loaded.
    Succeeded,
    /// The fetch failed; see the roster error message.
    Failed,
}

/// The team roster together with its fetch lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// All members, in directory order.
    pub list: Vec<Member>,
    /// Where the one-shot fetch currently stands.
    pub phase: FetchPhase,
    /// Failure message when `phase` is [`FetchPhase::Failed`].
    pub error: Option<String>,
}

impl Roster {
    /// Finds a member by id.
    #[must_use]
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.list.iter().find(|m| m.id == *id)
    }

    /// Finds a member by id, mutably.
    pub fn member_mut(&mut self, id: &MemberId) -> Option<&mut Member> {
        self.list.iter_mut().find(|m| m.id == *id)
    }

    /// Whether the roster contains a member with the given id.
    #[must_use]
    pub fn contains(&self, id: &MemberId) -> bool {
        self.member(id).is_some()
    }
}

/// The full application state, persisted across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Active view.
    pub role: Role,
    /// Denormalized copy of one roster member, kept in sync with the
    /// roster entry of the same id after every mutation that touches it.
    pub current_user: Option<Member>,
    /// Team roster with fetch status.
    pub roster: Roster,
    /// Display preference, orthogonal to all other state.
    pub dark_mode: bool,
}
