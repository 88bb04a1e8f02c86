//! Integration tests for the persistence adapter.
//!
//! Every mutation writes the full state tree to the state file; a fresh
//! store opened over the same file reproduces the identical tree, and
//! corrupt or missing data falls back to the documented defaults.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;

use teampulse::persist::StateFile;
use teampulse::store::{Store, TaskDraft};
use teampulse_model::member::{Member, MemberId, MemberStatus};
use teampulse_model::state::{AppState, FetchPhase, Role};

fn make_member(id: &str, name: &str) -> Member {
    Member::new(MemberId::new(id), name, format!("https://pics.example/{id}"))
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    }
}

#[test]
fn every_mutation_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let file = StateFile::at(dir.path().join("state.json"));

    let mut store = Store::open(file.clone());
    store.begin_fetch();
    store.apply_fetch_success(vec![make_member("m1", "Alice"), make_member("m2", "Bob")]);
    store.update_member_status(&MemberId::new("m1"), MemberStatus::Meeting);
    let task_id = store.assign_task(&MemberId::new("m2"), draft("Report")).unwrap();
    store.update_task_progress(&MemberId::new("m2"), &task_id, 60);
    store.switch_role();
    store.toggle_dark_mode();

    let expected = store.state().clone();
    drop(store);

    let reopened = Store::open(file);
    assert_eq!(reopened.state(), &expected);
    assert_eq!(reopened.state().role, Role::Member);
    assert!(reopened.state().dark_mode);
    let member = reopened.state().roster.member(&MemberId::new("m2")).unwrap();
    assert_eq!(member.tasks[0].progress, 60);
}

#[test]
fn reopened_store_does_not_refetch_a_loaded_roster() {
    let dir = tempfile::tempdir().unwrap();
    let file = StateFile::at(dir.path().join("state.json"));

    let mut store = Store::open(file.clone());
    store.begin_fetch();
    store.apply_fetch_success(vec![make_member("m1", "Alice")]);
    drop(store);

    let mut reopened = Store::open(file);
    assert_eq!(reopened.state().roster.phase, FetchPhase::Succeeded);
    assert!(!reopened.begin_fetch());
}

#[test]
fn interrupted_fetch_is_retried_on_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let file = StateFile::at(dir.path().join("state.json"));

    // Session one dies mid-fetch: Loading lands on disk.
    let mut store = Store::open(file.clone());
    assert!(store.begin_fetch());
    drop(store);

    // Session two must not stay gated off forever.
    let mut reopened = Store::open(file);
    assert_eq!(reopened.state().roster.phase, FetchPhase::NotStarted);
    assert!(reopened.begin_fetch());
}

#[test]
fn corrupt_state_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "][ definitely not json").unwrap();

    let store = Store::open(StateFile::at(path));
    assert_eq!(store.state(), &AppState::default());
}

#[test]
fn missing_state_file_starts_from_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(StateFile::at(dir.path().join("absent.json")));

    let state = store.state();
    assert_eq!(state.role, Role::Lead);
    assert!(state.current_user.is_none());
    assert!(state.roster.list.is_empty());
    assert_eq!(state.roster.phase, FetchPhase::NotStarted);
    assert!(!state.dark_mode);
}

#[test]
fn shape_change_falls_back_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    // Valid JSON from some imaginary older layout.
    std::fs::write(&path, r#"{"version": 1, "team": []}"#).unwrap();

    let store = Store::open(StateFile::at(path));
    assert_eq!(store.state(), &AppState::default());
}

#[test]
fn unwritable_state_file_never_fails_a_mutation() {
    let dir = tempfile::tempdir().unwrap();
    // A directory at the target path makes every write fail.
    let path = dir.path().join("state.json");
    std::fs::create_dir(&path).unwrap();

    let mut store = Store::open(StateFile::at(path));
    store.begin_fetch();
    store.apply_fetch_success(vec![make_member("m1", "Alice")]);
    store.toggle_dark_mode();

    // The in-memory state stays authoritative.
    assert!(store.state().dark_mode);
    assert_eq!(store.state().roster.list.len(), 1);
}
