//! Roster fetch against the external member directory.
//!
//! This module bridges the synchronous TUI event loop with the one
//! asynchronous operation in the application: a single `GET` to a
//! directory endpoint that returns seeded, deterministic member
//! identities. The fetch runs on a spawned tokio task and reports exactly
//! one [`FetchEvent`] over an mpsc channel, which the main loop drains on
//! each tick.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── FetchEvent ───  tokio background task
//! ```
//!
//! No retries, no cancellation: the fetch either completes or fails, and
//! the store applies the matching lifecycle transition.

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;

use teampulse_model::member::{Member, MemberId};

/// Default directory endpoint (randomuser.me-compatible).
pub const DEFAULT_DIRECTORY_URL: &str = "https://randomuser.me/api/";

/// Default number of members to request.
pub const DEFAULT_MEMBER_COUNT: usize = 10;

/// Default seed string, making repeated runs return the same identities.
pub const DEFAULT_SEED: &str = "teampulse";

/// Events sent from the fetch task to the TUI main loop.
#[derive(Debug)]
pub enum FetchEvent {
    /// The directory returned the requested members.
    Loaded(Vec<Member>),
    /// The fetch failed; the message is shown to the user.
    Failed(String),
}

/// Configuration for the directory fetch.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Directory endpoint URL.
    pub url: String,
    /// Number of members to request.
    pub member_count: usize,
    /// Seed string passed to the directory for deterministic results.
    pub seed: String,
    /// HTTP request timeout.
    pub request_timeout: Duration,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DIRECTORY_URL.to_string(),
            member_count: DEFAULT_MEMBER_COUNT,
            seed: DEFAULT_SEED.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Errors that can occur during the roster fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("directory request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The directory answered with a non-success status code.
    #[error("directory returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not match the expected shape.
    #[error("malformed directory response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The directory returned a different number of records than requested.
    #[error("directory returned {got} members, expected {want}")]
    CountMismatch {
        /// Requested member count.
        want: usize,
        /// Records actually present in the response.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Directory wire format
// ---------------------------------------------------------------------------

/// Top-level directory response body.
#[derive(Debug, Deserialize)]
struct DirectoryResponse {
    results: Vec<DirectoryUser>,
}

/// One user record in the directory response.
#[derive(Debug, Deserialize)]
struct DirectoryUser {
    login: DirectoryLogin,
    name: DirectoryName,
    picture: DirectoryPicture,
}

#[derive(Debug, Deserialize)]
struct DirectoryLogin {
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct DirectoryName {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct DirectoryPicture {
    large: String,
}

impl DirectoryUser {
    /// Maps a directory record to a fresh member: offline, no tasks.
    fn into_member(self) -> Member {
        let name = format!("{} {}", self.name.first, self.name.last);
        Member::new(MemberId::new(self.login.uuid), name, self.picture.large)
    }
}

/// Parses a directory response body into members.
///
/// # Errors
///
/// Returns [`FetchError::Malformed`] when the body does not deserialize,
/// or [`FetchError::CountMismatch`] when the record count differs from the
/// requested count.
fn parse_directory(body: &str, want: usize) -> Result<Vec<Member>, FetchError> {
    let response: DirectoryResponse = serde_json::from_str(body)?;
    if response.results.len() != want {
        return Err(FetchError::CountMismatch {
            want,
            got: response.results.len(),
        });
    }
    Ok(response
        .results
        .into_iter()
        .map(DirectoryUser::into_member)
        .collect())
}

/// Fetches the member roster from the directory.
///
/// # Errors
///
/// Returns [`FetchError`] on transport failure, non-2xx status, malformed
/// body, or record count mismatch.
pub async fn fetch_members(config: &DirectoryConfig) -> Result<Vec<Member>, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    let response = client
        .get(&config.url)
        .query(&[
            ("results", config.member_count.to_string()),
            ("seed", config.seed.clone()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    parse_directory(&body, config.member_count)
}

/// Spawns the fetch task and returns the event channel.
///
/// The task sends exactly one [`FetchEvent`] and exits. The caller drains
/// the channel from the UI loop; if the receiver is dropped first the
/// event is discarded.
#[must_use]
pub fn spawn_fetch(config: DirectoryConfig) -> mpsc::Receiver<FetchEvent> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let event = match fetch_members(&config).await {
            Ok(members) => {
                tracing::info!(count = members.len(), "roster loaded from directory");
                FetchEvent::Loaded(members)
            }
            Err(e) => {
                tracing::warn!("roster fetch failed: {e}");
                FetchEvent::Failed(e.to_string())
            }
        };
        if tx.send(event).await.is_err() {
            tracing::debug!("fetch receiver dropped before delivery");
        }
    });
    rx
}
