//! Integration tests for the state store mutation contracts.
//!
//! Exercises the progress clamp, the completion invariant, the
//! current-user consistency rule, silent no-ops on unknown ids, and task
//! id uniqueness through the public store API.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;

use chrono::NaiveDate;

use teampulse::store::{Store, TaskDraft};
use teampulse_model::member::{Member, MemberId, MemberStatus};
use teampulse_model::state::{AppState, FetchPhase, Role};
use teampulse_model::task::TaskId;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        due_date: due(),
    }
}

fn make_member(id: &str, name: &str) -> Member {
    Member::new(MemberId::new(id), name, format!("https://pics.example/{id}"))
}

/// A store with a three-member roster loaded and `m1` as current user.
fn loaded_store() -> Store {
    let mut store = Store::new(AppState::default());
    assert!(store.begin_fetch());
    store.apply_fetch_success(vec![
        make_member("m1", "Alice"),
        make_member("m2", "Bob"),
        make_member("m3", "Carol"),
    ]);
    store
}

// ---------------------------------------------------------------------------
// Progress clamp + completion invariant
// ---------------------------------------------------------------------------

#[test]
fn progress_clamp_holds_for_extreme_inputs() {
    let mut store = loaded_store();
    let member_id = MemberId::new("m1");
    let task_id = store.assign_task(&member_id, draft("clamp")).unwrap();

    for (requested, expected) in [
        (i32::MIN, 0u8),
        (-1, 0),
        (0, 0),
        (1, 1),
        (55, 55),
        (99, 99),
        (100, 100),
        (101, 100),
        (i32::MAX, 100),
    ] {
        store.update_task_progress(&member_id, &task_id, requested);
        let task = &store.state().roster.member(&member_id).unwrap().tasks[0];
        assert_eq!(task.progress, expected, "requested {requested}");
        assert_eq!(task.completed, expected == 100, "requested {requested}");
    }
}

#[test]
fn completion_invariant_holds_across_mutation_sequence() {
    let mut store = loaded_store();
    let member_id = MemberId::new("m2");
    let first = store.assign_task(&member_id, draft("a")).unwrap();
    let second = store.assign_task(&member_id, draft("b")).unwrap();

    let steps = [
        (&first, 150),
        (&second, 30),
        (&first, 90),
        (&second, 100),
        (&first, -5),
    ];
    for (task_id, requested) in steps {
        store.update_task_progress(&member_id, task_id, requested);
        for member in &store.state().roster.list {
            for task in &member.tasks {
                assert_eq!(task.completed, task.progress == 100);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Current-user consistency
// ---------------------------------------------------------------------------

#[test]
fn current_user_tracks_every_mutation_of_its_member() {
    let mut store = loaded_store();
    let member_id = MemberId::new("m1");

    store.update_member_status(&member_id, MemberStatus::Meeting);
    assert_eq!(
        store.state().current_user.as_ref().unwrap(),
        store.state().roster.member(&member_id).unwrap()
    );

    let task_id = store.assign_task(&member_id, draft("Report")).unwrap();
    assert_eq!(
        store.state().current_user.as_ref().unwrap(),
        store.state().roster.member(&member_id).unwrap()
    );

    store.update_task_progress(&member_id, &task_id, 70);
    assert_eq!(
        store.state().current_user.as_ref().unwrap(),
        store.state().roster.member(&member_id).unwrap()
    );

    store.update_member_status(&member_id, MemberStatus::Working);
    store.update_task_progress(&member_id, &task_id, 120);
    let user = store.state().current_user.as_ref().unwrap();
    assert_eq!(user, store.state().roster.member(&member_id).unwrap());
    assert_eq!(user.status, MemberStatus::Working);
    assert!(user.tasks[0].completed);
}

#[test]
fn mutations_of_other_members_leave_current_user_alone() {
    let mut store = loaded_store();
    store.update_member_status(&MemberId::new("m3"), MemberStatus::Break);
    store.assign_task(&MemberId::new("m3"), draft("elsewhere"));

    let user = store.state().current_user.as_ref().unwrap();
    assert_eq!(user.id, MemberId::new("m1"));
    assert_eq!(user.status, MemberStatus::Offline);
    assert!(user.tasks.is_empty());
}

// ---------------------------------------------------------------------------
// Silent no-op on unknown ids
// ---------------------------------------------------------------------------

#[test]
fn unknown_ids_leave_the_state_tree_unchanged() {
    let mut store = loaded_store();
    let real_task = store.assign_task(&MemberId::new("m1"), draft("real")).unwrap();
    let before = store.state().clone();

    let ghost = MemberId::new("ghost");
    store.update_member_status(&ghost, MemberStatus::Working);
    assert_eq!(store.state(), &before);

    assert!(store.assign_task(&ghost, draft("nope")).is_none());
    assert_eq!(store.state(), &before);

    store.update_task_progress(&ghost, &real_task, 50);
    assert_eq!(store.state(), &before);

    store.update_task_progress(&MemberId::new("m1"), &TaskId::new(), 50);
    assert_eq!(store.state(), &before);
}

// ---------------------------------------------------------------------------
// Task id uniqueness
// ---------------------------------------------------------------------------

#[test]
fn thousand_assignments_yield_distinct_ids() {
    let mut store = loaded_store();
    let members = ["m1", "m2", "m3"];
    let mut ids = HashSet::new();
    for i in 0..1000 {
        let member_id = MemberId::new(members[i % members.len()]);
        let id = store.assign_task(&member_id, draft("bulk")).unwrap();
        assert!(ids.insert(id), "duplicate task id at assignment {i}");
    }
    assert_eq!(ids.len(), 1000);
}

// ---------------------------------------------------------------------------
// Worked example
// ---------------------------------------------------------------------------

#[test]
fn offline_member_report_task_overshoot_completes() {
    let mut store = Store::new(AppState::default());
    store.begin_fetch();
    store.apply_fetch_success(vec![make_member("m1", "Alice")]);
    let member_id = MemberId::new("m1");
    assert_eq!(
        store.state().roster.member(&member_id).unwrap().status,
        MemberStatus::Offline
    );

    let task_id = store.assign_task(&member_id, draft("Report")).unwrap();
    let member = store.state().roster.member(&member_id).unwrap();
    assert_eq!(member.tasks.len(), 1);
    assert_eq!(member.tasks[0].progress, 0);
    assert!(!member.tasks[0].completed);

    store.update_task_progress(&member_id, &task_id, 120);
    let member = store.state().roster.member(&member_id).unwrap();
    assert_eq!(member.tasks[0].progress, 100);
    assert!(member.tasks[0].completed);
}

// ---------------------------------------------------------------------------
// Fetch lifecycle (store side)
// ---------------------------------------------------------------------------

#[test]
fn fetch_lifecycle_success_path() {
    let mut store = Store::new(AppState::default());
    assert_eq!(store.state().roster.phase, FetchPhase::NotStarted);

    assert!(store.begin_fetch());
    assert_eq!(store.state().roster.phase, FetchPhase::Loading);

    let members: Vec<Member> = (0..10)
        .map(|i| make_member(&format!("m{i}"), &format!("Member {i}")))
        .collect();
    store.apply_fetch_success(members);

    let state = store.state();
    assert_eq!(state.roster.phase, FetchPhase::Succeeded);
    assert_eq!(state.roster.list.len(), 10);
    assert!(state.roster.error.is_none());
    for member in &state.roster.list {
        assert_eq!(member.status, MemberStatus::Offline);
        assert!(member.tasks.is_empty());
    }
    assert_eq!(
        state.current_user.as_ref().unwrap().id,
        state.roster.list[0].id
    );
}

#[test]
fn fetch_lifecycle_failure_path() {
    let mut store = Store::new(AppState::default());
    assert!(store.begin_fetch());
    store.apply_fetch_failure("directory returned HTTP 502".to_string());

    let state = store.state();
    assert_eq!(state.roster.phase, FetchPhase::Failed);
    assert_eq!(
        state.roster.error.as_deref(),
        Some("directory returned HTTP 502")
    );
    assert!(state.roster.list.is_empty());
    assert!(state.current_user.is_none());
}

#[test]
fn mutations_remain_available_while_fetch_is_in_flight() {
    let mut store = loaded_store();
    // Simulate a session where the user keeps working while a (stale)
    // fetch is pending: other mutations never block on the fetch phase.
    store.switch_role();
    store.toggle_dark_mode();
    store.update_member_status(&MemberId::new("m2"), MemberStatus::Working);
    assert_eq!(store.state().role, Role::Member);
    assert!(store.state().dark_mode);
}
