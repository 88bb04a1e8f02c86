//! Team Pulse — terminal-native team status dashboard.
//!
//! Launches the TUI, fetches the team roster once per session from the
//! configured directory endpoint, and persists the dashboard state across
//! runs. Configuration via CLI flags, environment variables, or config
//! file (`~/.config/teampulse/config.toml`).
//!
//! ```bash
//! # Default run (10 members, seeded fetch)
//! cargo run --bin teampulse
//!
//! # A bigger team against a local directory mirror
//! cargo run --bin teampulse -- --directory-url http://127.0.0.1:8080/api/ \
//!     --member-count 25
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use teampulse::app::App;
use teampulse::config::{CliArgs, ClientConfig};
use teampulse::persist::StateFile;
use teampulse::roster;
use teampulse::store::Store;
use teampulse::ui;
use teampulse_model::state::AppState;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("teampulse starting");

    // Rebuild the store from the persisted state, or start fresh.
    let store = match resolve_state_file(&config) {
        Some(file) => Store::open(file),
        None => Store::new(AppState::default()),
    };
    let app = App::new(store);

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, app, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("teampulse exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown to
/// ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("teampulse.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Resolve the state file location: explicit path, or the platform default.
///
/// Returns `None` (run without persistence) when no data directory can be
/// determined.
fn resolve_state_file(config: &ClientConfig) -> Option<StateFile> {
    if let Some(path) = &config.state_file {
        return Some(StateFile::at(path.clone()));
    }
    match StateFile::default_path() {
        Ok(path) => Some(StateFile::at(path)),
        Err(e) => {
            tracing::warn!("running without persistence: {e}");
            None
        }
    }
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    config: &ClientConfig,
) -> io::Result<()> {
    // Dispatch the one-shot roster fetch; the store gate keeps this from
    // re-fetching when a loaded roster was restored from disk.
    let mut fetch_rx = if app.store.begin_fetch() {
        Some(roster::spawn_fetch(config.to_directory_config()))
    } else {
        None
    };

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain pending fetch events (non-blocking).
        if let Some(rx) = fetch_rx.as_mut() {
            app.drain_fetch_events(rx);
        }

        // Step 3: Per-frame housekeeping (stale current-user resolution).
        app.tick();

        // Step 4: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
