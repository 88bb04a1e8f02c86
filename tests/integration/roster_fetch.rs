//! Integration tests for the roster fetch against an in-process mock
//! directory server.
//!
//! The mock honors the `results` and `seed` query parameters the same way
//! the real directory does, so the tests cover the full request shape:
//! success with the requested count, HTTP failure, malformed bodies, and
//! count mismatches.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::time::Duration;

use axum::{Router, extract::Query, http::StatusCode, routing::get};

use teampulse::roster::{self, DirectoryConfig, FetchError, FetchEvent};
use teampulse::store::Store;
use teampulse_model::member::MemberStatus;
use teampulse_model::state::{AppState, FetchPhase};

// ---------------------------------------------------------------------------
// Mock directory server
// ---------------------------------------------------------------------------

/// Builds a directory payload with `count` seeded records.
fn sample_payload(seed: &str, count: usize) -> String {
    let results: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "login": { "uuid": format!("{seed}-{i:04}") },
                "name": { "title": "Mx", "first": format!("First{i}"), "last": format!("Last{i}") },
                "picture": { "large": format!("https://pics.example/{seed}/{i}.jpg") }
            })
        })
        .collect();
    serde_json::json!({ "results": results, "info": { "seed": seed } }).to_string()
}

/// Directory handler that honors `results` and `seed` like the real thing.
async fn directory(Query(params): Query<HashMap<String, String>>) -> String {
    let count = params
        .get("results")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let seed = params.get("seed").cloned().unwrap_or_default();
    sample_payload(&seed, count)
}

/// Serves the router on an ephemeral port, returning the endpoint URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/directory")
}

fn config(url: String, member_count: usize) -> DirectoryConfig {
    DirectoryConfig {
        url,
        member_count,
        seed: "teampulse".to_string(),
        request_timeout: Duration::from_secs(5),
    }
}

// ---------------------------------------------------------------------------
// fetch_members
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_requested_count_of_offline_members() {
    let url = serve(Router::new().route("/directory", get(directory))).await;
    let members = roster::fetch_members(&config(url, 10)).await.unwrap();

    assert_eq!(members.len(), 10);
    for member in &members {
        assert_eq!(member.status, MemberStatus::Offline);
        assert!(member.tasks.is_empty());
    }
    assert_eq!(members[0].name, "First0 Last0");
    assert_eq!(members[0].picture, "https://pics.example/teampulse/0.jpg");
}

#[tokio::test]
async fn repeated_fetches_with_same_seed_are_identical() {
    let url = serve(Router::new().route("/directory", get(directory))).await;
    let cfg = config(url, 5);
    let first = roster::fetch_members(&cfg).await.unwrap();
    let second = roster::fetch_members(&cfg).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn fetch_fails_on_http_error_status() {
    let router = Router::new().route(
        "/directory",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
    );
    let url = serve(router).await;

    let err = roster::fetch_members(&config(url, 10)).await.unwrap_err();
    assert!(matches!(&err, FetchError::Status(code) if *code == StatusCode::BAD_GATEWAY));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn fetch_fails_on_malformed_body() {
    let router = Router::new().route("/directory", get(|| async { "surprise! not json" }));
    let url = serve(router).await;

    let err = roster::fetch_members(&config(url, 10)).await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn fetch_fails_on_count_mismatch() {
    // Server ignores the query and always returns three records.
    let router = Router::new().route(
        "/directory",
        get(|| async { sample_payload("teampulse", 3) }),
    );
    let url = serve(router).await;

    let err = roster::fetch_members(&config(url, 5)).await.unwrap_err();
    assert!(matches!(err, FetchError::CountMismatch { want: 5, got: 3 }));
}

#[tokio::test]
async fn fetch_fails_on_unreachable_directory() {
    // Nothing listens here; bind-and-drop guarantees a free port.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = roster::fetch_members(&config(format!("http://{addr}/directory"), 10))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Request(_)));
}

// ---------------------------------------------------------------------------
// Full lifecycle through the store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lifecycle_reaches_succeeded_with_exactly_n_members() {
    let url = serve(Router::new().route("/directory", get(directory))).await;

    let mut store = Store::new(AppState::default());
    assert_eq!(store.state().roster.phase, FetchPhase::NotStarted);
    assert!(store.begin_fetch());
    assert_eq!(store.state().roster.phase, FetchPhase::Loading);

    let mut rx = roster::spawn_fetch(config(url, 10));
    match rx.recv().await.unwrap() {
        FetchEvent::Loaded(members) => store.apply_fetch_success(members),
        FetchEvent::Failed(message) => store.apply_fetch_failure(message),
    }

    let state = store.state();
    assert_eq!(state.roster.phase, FetchPhase::Succeeded);
    assert_eq!(state.roster.list.len(), 10);
    assert!(state.current_user.is_some());
}

#[tokio::test]
async fn lifecycle_reaches_failed_with_message_and_unchanged_roster() {
    let router = Router::new().route(
        "/directory",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = serve(router).await;

    let mut store = Store::new(AppState::default());
    assert!(store.begin_fetch());

    let mut rx = roster::spawn_fetch(config(url, 10));
    match rx.recv().await.unwrap() {
        FetchEvent::Loaded(members) => store.apply_fetch_success(members),
        FetchEvent::Failed(message) => store.apply_fetch_failure(message),
    }

    let state = store.state();
    assert_eq!(state.roster.phase, FetchPhase::Failed);
    let message = state.roster.error.as_deref().unwrap();
    assert!(!message.is_empty());
    assert!(state.roster.list.is_empty());
}
