//! Terminal UI rendering.

pub mod header;
pub mod lead_view;
pub mod member_view;
pub mod status_bar;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use teampulse_model::state::{FetchPhase, Role};

use crate::app::App;
use self::theme::Theme;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = Theme::for_mode(app.store.state().dark_mode);

    // Header on top, status bar at the bottom.
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, main_chunks[0], app, &theme);

    let body = main_chunks[1];
    let state = app.store.state();
    match state.roster.phase {
        FetchPhase::Loading => {
            render_notice(frame, body, "Initializing dashboard...", theme.dimmed(), &theme);
        }
        FetchPhase::Failed => {
            let message = state.roster.error.as_deref().unwrap_or("unknown error");
            render_notice(
                frame,
                body,
                &format!("Error: {message}"),
                theme.error_text(),
                &theme,
            );
        }
        FetchPhase::NotStarted | FetchPhase::Succeeded => match state.role {
            Role::Lead => lead_view::render(frame, body, app, &theme),
            Role::Member => member_view::render(frame, body, app, &theme),
        },
    }

    status_bar::render(frame, main_chunks[2], app, &theme);
}

/// Render a full-body centered notice (loading / failure screens).
fn render_notice(frame: &mut Frame, area: Rect, text: &str, style: Style, theme: &Theme) {
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.normal()),
        );
    frame.render_widget(paragraph, area);
}
