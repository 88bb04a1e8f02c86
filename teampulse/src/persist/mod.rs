//! Best-effort persistence of the application state.
//!
//! The full [`AppState`] tree is serialized to a single JSON file after
//! every successful mutation and read back as the initial state at
//! startup. Both directions fail soft: a write failure is logged by the
//! caller and the in-memory state stays authoritative; an absent or
//! malformed file at startup falls back to the default state.
//!
//! There is no migration or versioning; a shape change silently
//! invalidates old persisted data, which then falls back to defaults.

use std::path::{Path, PathBuf};

use teampulse_model::state::AppState;

/// Errors that can occur while reading or writing the state file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Could not determine the user's data directory.
    #[error("could not determine data directory (no HOME or XDG_DATA_HOME)")]
    NoDataDir,

    /// Failed to read the state file.
    #[error("failed to read state file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the state file.
    #[error("failed to write state file {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The state file contents did not deserialize.
    #[error("malformed state file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The single durable slot holding the serialized application state.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// Creates a state file handle at an explicit path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default state file location: `<data_dir>/teampulse/state.json`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::NoDataDir`] when the platform data directory
    /// cannot be determined.
    pub fn default_path() -> Result<PathBuf, PersistError> {
        let data_dir = dirs::data_dir().ok_or(PersistError::NoDataDir)?;
        Ok(data_dir.join("teampulse").join("state.json"))
    }

    /// The path this handle reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and deserializes the persisted state.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] on read or deserialization failure.
    pub fn try_load(&self) -> Result<Option<AppState>, PersistError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Loads the persisted state, falling back to the default state when
    /// the file is absent or malformed. Never fails.
    #[must_use]
    pub fn load_or_default(&self) -> AppState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => AppState::default(),
            Err(e) => {
                tracing::warn!("ignoring persisted state: {e}");
                AppState::default()
            }
        }
    }

    /// Serializes the state and overwrites the file.
    ///
    /// Creates the parent directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] on serialization or write failure. Callers
    /// treat this as fire-and-forget: log and continue.
    pub fn save(&self, state: &AppState) -> Result<(), PersistError> {
        let contents = serde_json::to_string(state)?;
        if let Some(parent) = self.path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            return Err(PersistError::Write {
                path: self.path.clone(),
                source: e,
            });
        }
        std::fs::write(&self.path, contents).map_err(|e| PersistError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
