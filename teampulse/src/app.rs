//! Application state and event handling.
//!
//! [`App`] wraps the [`Store`] with the ephemeral interaction state the
//! presentation layer needs: panel focus, list selections, the assign-task
//! form, and the member-list filter/sort. All durable state lives in the
//! store and changes only through its mutation operations.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use teampulse_model::member::{Member, MemberId, MemberStatus};
use teampulse_model::state::Role;

use crate::roster::FetchEvent;
use crate::store::{Store, TaskDraft};

/// Which panel is focused in the lead view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadFocus {
    /// Assign-task form.
    Form,
    /// Member list.
    Members,
}

/// Which panel is focused in the member view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberFocus {
    /// Status picker row.
    StatusPicker,
    /// Task list.
    Tasks,
}

/// Fields of the assign-task form, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Member selector.
    Member,
    /// Task title input.
    Title,
    /// Due date input (`YYYY-MM-DD`).
    DueDate,
}

impl FormField {
    const fn next(self) -> Self {
        match self {
            Self::Member => Self::Title,
            Self::Title => Self::DueDate,
            Self::DueDate => Self::Member,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Member => Self::DueDate,
            Self::Title => Self::Member,
            Self::DueDate => Self::Title,
        }
    }
}

/// Outcome line shown under the assign-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFeedback {
    /// Validation failed; nothing was dispatched.
    Error(String),
    /// A task was assigned to the named member.
    Assigned(String),
}

/// The assign-task form state.
#[derive(Debug)]
pub struct TaskForm {
    /// Index into the roster list for the member selector.
    pub member_index: usize,
    /// Task title input buffer.
    pub title: String,
    /// Due date input buffer (`YYYY-MM-DD`).
    pub due_date: String,
    /// Currently focused field.
    pub field: FormField,
    /// Result of the last submit attempt.
    pub feedback: Option<FormFeedback>,
}

impl TaskForm {
    fn new() -> Self {
        Self {
            member_index: 0,
            title: String::new(),
            due_date: String::new(),
            field: FormField::Member,
            feedback: None,
        }
    }

    fn clear_inputs(&mut self) {
        self.title.clear();
        self.due_date.clear();
        self.field = FormField::Member;
    }
}

/// Status filter for the lead member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Show every member.
    All,
    /// Show only members with the given status.
    Only(MemberStatus),
}

impl StatusFilter {
    /// Cycles All -> Working -> Break -> Meeting -> Offline -> All.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Only(MemberStatus::Working),
            Self::Only(MemberStatus::Working) => Self::Only(MemberStatus::Break),
            Self::Only(MemberStatus::Break) => Self::Only(MemberStatus::Meeting),
            Self::Only(MemberStatus::Meeting) => Self::Only(MemberStatus::Offline),
            Self::Only(MemberStatus::Offline) => Self::All,
        }
    }

    /// Whether a member passes the filter.
    #[must_use]
    pub fn matches(&self, member: &Member) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => member.status == *status,
        }
    }

    /// Short label for the list title.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Only(status) => status.to_string(),
        }
    }
}

/// Sort order for the lead member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSort {
    /// Alphabetical by name.
    Name,
    /// Most active (uncompleted) tasks first.
    ActiveTasks,
}

impl MemberSort {
    /// Returns the other sort order.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Name => Self::ActiveTasks,
            Self::ActiveTasks => Self::Name,
        }
    }

    /// Short label for the list title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ActiveTasks => "active tasks",
        }
    }
}

/// Main application state.
pub struct App {
    /// The state store. All durable state lives here.
    pub store: Store,
    /// Focused panel in the lead view.
    pub lead_focus: LeadFocus,
    /// Focused panel in the member view.
    pub member_focus: MemberFocus,
    /// Assign-task form state.
    pub form: TaskForm,
    /// Member list filter.
    pub filter: StatusFilter,
    /// Member list sort order.
    pub sort: MemberSort,
    /// Selected row in the (filtered, sorted) member list.
    pub selected_member: usize,
    /// Selected entry in the status picker.
    pub selected_status: usize,
    /// Selected row among the current user's active tasks.
    pub selected_task: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the application over a store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        let mut app = Self {
            store,
            lead_focus: LeadFocus::Form,
            member_focus: MemberFocus::StatusPicker,
            form: TaskForm::new(),
            filter: StatusFilter::All,
            sort: MemberSort::Name,
            selected_member: 0,
            selected_status: 0,
            selected_task: 0,
            should_quit: false,
        };
        app.sync_status_cursor();
        app
    }

    /// Per-frame housekeeping: resolve a stale current user and keep list
    /// selections inside their bounds.
    pub fn tick(&mut self) {
        self.store.resolve_current_user();
        self.clamp_selections();
    }

    /// Drains pending fetch events and applies the store transitions.
    pub fn drain_fetch_events(&mut self, rx: &mut mpsc::Receiver<FetchEvent>) {
        while let Ok(event) = rx.try_recv() {
            match event {
                FetchEvent::Loaded(members) => self.store.apply_fetch_success(members),
                FetchEvent::Failed(message) => self.store.apply_fetch_failure(message),
            }
        }
    }

    /// The member list as the lead view shows it: filtered, then sorted.
    #[must_use]
    pub fn visible_members(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self
            .store
            .state()
            .roster
            .list
            .iter()
            .filter(|m| self.filter.matches(m))
            .collect();
        match self.sort {
            MemberSort::Name => members.sort_by(|a, b| a.name.cmp(&b.name)),
            MemberSort::ActiveTasks => {
                members.sort_by(|a, b| b.active_task_count().cmp(&a.active_task_count()));
            }
        }
        members
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.store.switch_role();
                self.sync_status_cursor();
                return;
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.store.toggle_dark_mode();
                return;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.cycle_focus();
                return;
            }
            _ => {}
        }

        // Focus-specific shortcuts
        match self.store.state().role {
            Role::Lead => match self.lead_focus {
                LeadFocus::Form => self.handle_form_key(key),
                LeadFocus::Members => self.handle_members_key(key),
            },
            Role::Member => match self.member_focus {
                MemberFocus::StatusPicker => self.handle_status_key(key),
                MemberFocus::Tasks => self.handle_tasks_key(key),
            },
        }
    }

    /// Cycle focus between the two panels of the active view.
    const fn cycle_focus(&mut self) {
        match self.store.state().role {
            Role::Lead => {
                self.lead_focus = match self.lead_focus {
                    LeadFocus::Form => LeadFocus::Members,
                    LeadFocus::Members => LeadFocus::Form,
                };
            }
            Role::Member => {
                self.member_focus = match self.member_focus {
                    MemberFocus::StatusPicker => MemberFocus::Tasks,
                    MemberFocus::Tasks => MemberFocus::StatusPicker,
                };
            }
        }
    }

    // -- Lead view: assign-task form ----------------------------------------

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_task_form(),
            KeyCode::Up => self.form.field = self.form.field.prev(),
            KeyCode::Down => self.form.field = self.form.field.next(),
            KeyCode::Left if self.form.field == FormField::Member => {
                self.form.member_index = self.form.member_index.saturating_sub(1);
            }
            KeyCode::Right if self.form.field == FormField::Member => {
                let len = self.store.state().roster.list.len();
                if self.form.member_index + 1 < len {
                    self.form.member_index += 1;
                }
            }
            KeyCode::Char(c) => match self.form.field {
                FormField::Title => self.form.title.push(c),
                FormField::DueDate => self.form.due_date.push(c),
                FormField::Member => {}
            },
            KeyCode::Backspace => {
                match self.form.field {
                    FormField::Title => self.form.title.pop(),
                    FormField::DueDate => self.form.due_date.pop(),
                    FormField::Member => None,
                };
            }
            _ => {}
        }
    }

    /// Validates the form and dispatches the assignment.
    ///
    /// Empty fields and unparseable dates are rejected here, before the
    /// store is involved.
    fn submit_task_form(&mut self) {
        let title = self.form.title.trim().to_string();
        if title.is_empty() {
            self.form.feedback = Some(FormFeedback::Error("Task title is required".to_string()));
            return;
        }
        let Ok(due_date) = NaiveDate::parse_from_str(self.form.due_date.trim(), "%Y-%m-%d") else {
            self.form.feedback = Some(FormFeedback::Error(
                "Due date must be YYYY-MM-DD".to_string(),
            ));
            return;
        };
        let target = self
            .store
            .state()
            .roster
            .list
            .get(self.form.member_index)
            .map(|m| (m.id.clone(), m.name.clone()));
        let Some((member_id, member_name)) = target else {
            self.form.feedback = Some(FormFeedback::Error("No member selected".to_string()));
            return;
        };

        self.store.assign_task(&member_id, TaskDraft { title, due_date });
        self.form.clear_inputs();
        self.form.feedback = Some(FormFeedback::Assigned(member_name));
    }

    // -- Lead view: member list ---------------------------------------------

    fn handle_members_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_member = self.selected_member.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible_members().len();
                if self.selected_member + 1 < len {
                    self.selected_member += 1;
                }
            }
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.selected_member = 0;
            }
            KeyCode::Char('s') => self.sort = self.sort.toggled(),
            KeyCode::Enter => self.select_member_under_cursor(),
            _ => {}
        }
    }

    /// Makes the highlighted list row the current user.
    fn select_member_under_cursor(&mut self) {
        let id = self
            .visible_members()
            .get(self.selected_member)
            .map(|m| m.id.clone());
        if let Some(id) = id {
            self.store.select_current_user(&id);
            self.sync_status_cursor();
        }
    }

    // -- Member view: status picker -----------------------------------------

    fn handle_status_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_status = self.selected_status.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_status + 1 < MemberStatus::ALL.len() {
                    self.selected_status += 1;
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.selected_status = (c as usize) - ('1' as usize);
                self.apply_selected_status();
            }
            KeyCode::Enter => self.apply_selected_status(),
            _ => {}
        }
    }

    fn apply_selected_status(&mut self) {
        let Some(id) = self.current_user_id() else {
            return;
        };
        let status = MemberStatus::ALL[self.selected_status.min(MemberStatus::ALL.len() - 1)];
        self.store.update_member_status(&id, status);
    }

    // -- Member view: task list ---------------------------------------------

    fn handle_tasks_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_task = self.selected_task.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.active_task_count();
                if self.selected_task + 1 < len {
                    self.selected_task += 1;
                }
            }
            KeyCode::Char('+' | '=') => self.adjust_selected_task(10),
            KeyCode::Char('-' | '_') => self.adjust_selected_task(-10),
            _ => {}
        }
    }

    /// Steps the selected active task's progress by `delta`.
    fn adjust_selected_task(&mut self, delta: i32) {
        let target = self.store.state().current_user.as_ref().and_then(|user| {
            user.tasks
                .iter()
                .filter(|t| !t.completed)
                .nth(self.selected_task)
                .map(|t| (user.id.clone(), t.id.clone(), i32::from(t.progress)))
        });
        let Some((member_id, task_id, progress)) = target else {
            return;
        };
        self.store
            .update_task_progress(&member_id, &task_id, progress + delta);
    }

    // -- Internal -----------------------------------------------------------

    fn current_user_id(&self) -> Option<MemberId> {
        self.store.state().current_user.as_ref().map(|u| u.id.clone())
    }

    fn active_task_count(&self) -> usize {
        self.store
            .state()
            .current_user
            .as_ref()
            .map_or(0, Member::active_task_count)
    }

    /// Points the status picker at the current user's status.
    fn sync_status_cursor(&mut self) {
        if let Some(user) = self.store.state().current_user.as_ref()
            && let Some(idx) = MemberStatus::ALL.iter().position(|s| *s == user.status)
        {
            self.selected_status = idx;
        }
    }

    /// Keeps list selections inside their current bounds.
    fn clamp_selections(&mut self) {
        let roster_len = self.store.state().roster.list.len();
        self.form.member_index = self.form.member_index.min(roster_len.saturating_sub(1));

        let visible_len = self.visible_members().len();
        self.selected_member = self.selected_member.min(visible_len.saturating_sub(1));

        let active_len = self.active_task_count();
        self.selected_task = self.selected_task.min(active_len.saturating_sub(1));
    }
}
