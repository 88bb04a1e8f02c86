//! State store for the Team Pulse dashboard.
//!
//! [`Store`] exclusively owns the [`AppState`] tree and exposes the fixed
//! set of named mutation operations. Consumers read via [`Store::state`]
//! and never hold mutable references into the tree.
//!
//! Two rules hold across all mutations:
//!
//! - **Consistency rule**: whenever a mutation touches the roster member
//!   whose id matches `current_user`, the denormalized `current_user` copy
//!   is replaced with the updated entry in the same operation.
//! - **Silent no-op on miss**: mutations referencing a member or task id
//!   absent from the roster leave the state tree untouched. Stale ids are
//!   expected during normal operation and are not errors.
//!
//! Every successful mutation triggers a best-effort persistence write; a
//! failed write is logged and the in-memory state stays authoritative.

use chrono::NaiveDate;

use teampulse_model::member::{Member, MemberId, MemberStatus};
use teampulse_model::state::{AppState, FetchPhase};
use teampulse_model::task::{Task, TaskId};

use crate::persist::StateFile;

/// Caller-supplied fields for a new task.
///
/// Field validation (non-empty title, parseable date) happens in the
/// presentation layer before a draft is built.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    /// Free-text task label.
    pub title: String,
    /// Calendar due date.
    pub due_date: NaiveDate,
}

/// Owns the application state and applies mutations to it.
pub struct Store {
    state: AppState,
    persistence: Option<StateFile>,
}

impl Store {
    /// Creates a store over the given initial state, without persistence.
    #[must_use]
    pub const fn new(state: AppState) -> Self {
        Self {
            state,
            persistence: None,
        }
    }

    /// Creates a store backed by a state file.
    ///
    /// The initial state is loaded from the file, falling back to the
    /// default state when the file is absent or malformed. A `Loading`
    /// fetch phase read from disk is normalized to `NotStarted`: no fetch
    /// can be in flight at startup, and leaving the phase as-is would gate
    /// the roster fetch off forever.
    #[must_use]
    pub fn open(file: StateFile) -> Self {
        let mut state = file.load_or_default();
        if state.roster.phase == FetchPhase::Loading {
            tracing::debug!("normalizing persisted Loading phase to NotStarted");
            state.roster.phase = FetchPhase::NotStarted;
        }
        Self {
            state,
            persistence: Some(file),
        }
    }

    /// Read access to the full application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Consumes the store, returning the owned state. Test helper.
    #[must_use]
    pub fn into_state(self) -> AppState {
        self.state
    }

    // -- Roster fetch lifecycle ---------------------------------------------

    /// Marks the roster fetch as started.
    ///
    /// Gated: the transition only happens from [`FetchPhase::NotStarted`],
    /// so the fetch is dispatched at most once per session. Returns whether
    /// the caller should dispatch a fetch.
    pub fn begin_fetch(&mut self) -> bool {
        if self.state.roster.phase != FetchPhase::NotStarted {
            return false;
        }
        self.state.roster.phase = FetchPhase::Loading;
        self.persist();
        true
    }

    /// Applies a successful roster fetch.
    ///
    /// Replaces the roster, clears any previous error, and initializes
    /// `current_user` to the first member when none is set.
    pub fn apply_fetch_success(&mut self, members: Vec<Member>) {
        self.state.roster.phase = FetchPhase::Succeeded;
        self.state.roster.error = None;
        self.state.roster.list = members;
        if self.state.current_user.is_none() {
            self.state.current_user = self.state.roster.list.first().cloned();
        }
        self.persist();
    }

    /// Applies a failed roster fetch: the error is recorded and the
    /// existing roster is left untouched.
    pub fn apply_fetch_failure(&mut self, error: String) {
        self.state.roster.phase = FetchPhase::Failed;
        self.state.roster.error = Some(error);
        self.persist();
    }

    // -- View state ---------------------------------------------------------

    /// Toggles between the lead and member views. No other effects.
    pub fn switch_role(&mut self) {
        self.state.role = self.state.role.toggled();
        self.persist();
    }

    /// Flips the dark-mode flag. No other effects.
    pub fn toggle_dark_mode(&mut self) {
        self.state.dark_mode = !self.state.dark_mode;
        self.persist();
    }

    // -- Current user -------------------------------------------------------

    /// Sets `current_user` to a copy of the matching roster entry, or to
    /// `None` when no entry matches. Pure lookup; the roster is unchanged.
    pub fn select_current_user(&mut self, id: &MemberId) {
        self.state.current_user = self.state.roster.member(id).cloned();
        self.persist();
    }

    /// Re-points `current_user` at the first roster member when it is
    /// absent or refers to an id no longer present.
    ///
    /// Called once per UI tick, this is the "next read cycle" resolution
    /// step that repairs a stale persisted selection.
    pub fn resolve_current_user(&mut self) {
        if self.state.roster.list.is_empty() {
            return;
        }
        let stale = self
            .state
            .current_user
            .as_ref()
            .is_none_or(|u| !self.state.roster.contains(&u.id));
        if stale {
            self.state.current_user = self.state.roster.list.first().cloned();
            self.persist();
        }
    }

    // -- Member mutations ---------------------------------------------------

    /// Replaces the status of the member with the given id.
    ///
    /// Silent no-op when the id is not in the roster.
    pub fn update_member_status(&mut self, id: &MemberId, status: MemberStatus) {
        let Some(member) = self.state.roster.member_mut(id) else {
            return;
        };
        member.status = status;
        self.sync_current_user(id);
        self.persist();
    }

    /// Appends a new task to the member's task sequence.
    ///
    /// The task gets a fresh id, zero progress, and is not completed.
    /// Returns the new task's id, or `None` (silent no-op) when the member
    /// id is not in the roster.
    pub fn assign_task(&mut self, id: &MemberId, draft: TaskDraft) -> Option<TaskId> {
        let member = self.state.roster.member_mut(id)?;
        let task = Task::new(draft.title, draft.due_date);
        let task_id = task.id.clone();
        member.tasks.push(task);
        self.sync_current_user(id);
        self.persist();
        Some(task_id)
    }

    /// Sets the progress of one task, clamping the requested value into
    /// [0, 100] and deriving the completed flag.
    ///
    /// Only the matching task changes; order and all other tasks are
    /// preserved. Silent no-op when the member or task id is not found.
    pub fn update_task_progress(&mut self, id: &MemberId, task_id: &TaskId, requested: i32) {
        let Some(task) = self
            .state
            .roster
            .member_mut(id)
            .and_then(|m| m.task_mut(task_id))
        else {
            return;
        };
        task.set_progress(requested);
        self.sync_current_user(id);
        self.persist();
    }

    // -- Internal -----------------------------------------------------------

    /// Applies the consistency rule after a mutation that touched `id`.
    fn sync_current_user(&mut self, id: &MemberId) {
        if self
            .state
            .current_user
            .as_ref()
            .is_some_and(|u| u.id == *id)
            && let Some(updated) = self.state.roster.member(id)
        {
            self.state.current_user = Some(updated.clone());
        }
    }

    /// Fire-and-forget persistence write. Never fails the mutation.
    fn persist(&self) {
        if let Some(file) = &self.persistence
            && let Err(e) = file.save(&self.state)
        {
            tracing::warn!("failed to persist state: {e}");
        }
    }
}
