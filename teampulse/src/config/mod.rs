//! Configuration system for the Team Pulse client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/teampulse/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use crate::roster::{DEFAULT_DIRECTORY_URL, DEFAULT_MEMBER_COUNT, DEFAULT_SEED, DirectoryConfig};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    directory: DirectoryFileConfig,
    ui: UiFileConfig,
    storage: StorageFileConfig,
}

/// `[directory]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DirectoryFileConfig {
    url: Option<String>,
    member_count: Option<usize>,
    seed: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    state_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- Directory --
    /// Directory endpoint URL.
    pub directory_url: String,
    /// Number of members to request from the directory.
    pub member_count: usize,
    /// Seed string for deterministic directory results.
    pub seed: String,
    /// HTTP request timeout for the directory fetch.
    pub request_timeout: Duration,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,

    // -- Storage --
    /// Explicit state file path; `None` means the platform default.
    pub state_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            member_count: DEFAULT_MEMBER_COUNT,
            seed: DEFAULT_SEED.to_string(),
            request_timeout: Duration::from_secs(10),
            poll_timeout: Duration::from_millis(50),
            state_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/teampulse/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or any present config file fails to parse.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            directory_url: cli
                .directory_url
                .clone()
                .or_else(|| file.directory.url.clone())
                .unwrap_or(defaults.directory_url),
            member_count: cli
                .member_count
                .or(file.directory.member_count)
                .unwrap_or(defaults.member_count),
            seed: cli
                .seed
                .clone()
                .or_else(|| file.directory.seed.clone())
                .unwrap_or(defaults.seed),
            request_timeout: file
                .directory
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            state_file: cli
                .state_file
                .clone()
                .or_else(|| file.storage.state_file.clone()),
        }
    }

    /// Build a [`DirectoryConfig`] for the roster fetch.
    #[must_use]
    pub fn to_directory_config(&self) -> DirectoryConfig {
        DirectoryConfig {
            url: self.directory_url.clone(),
            member_count: self.member_count,
            seed: self.seed.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal-native team status dashboard")]
pub struct CliArgs {
    /// Directory endpoint URL to fetch member identities from.
    #[arg(long, env = "TEAMPULSE_DIRECTORY_URL")]
    pub directory_url: Option<String>,

    /// Number of members to request from the directory.
    #[arg(long, env = "TEAMPULSE_MEMBER_COUNT")]
    pub member_count: Option<usize>,

    /// Seed string for deterministic directory results.
    #[arg(long)]
    pub seed: Option<String>,

    /// Path to config file (default: `~/.config/teampulse/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the persisted state file (default: `<data_dir>/teampulse/state.json`).
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TEAMPULSE_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/teampulse.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available — use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("teampulse").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
