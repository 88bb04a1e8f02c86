//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use teampulse_model::state::{FetchPhase, Role};

use super::theme::Theme;
use crate::app::{App, LeadFocus, MemberFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state = app.store.state();

    let help_text = match state.role {
        Role::Lead => match app.lead_focus {
            LeadFocus::Form => {
                "Enter: assign | ↑↓: field | ◂▸: member | Tab: members | ^R: role | ^T: theme | Esc: quit"
            }
            LeadFocus::Members => {
                "↑↓/jk: navigate | f: filter | s: sort | Enter: view as | Tab: form | ^R: role | Esc: quit"
            }
        },
        Role::Member => match app.member_focus {
            MemberFocus::StatusPicker => {
                "◂▸/hl: choose | 1-4/Enter: set status | Tab: tasks | ^R: role | ^T: theme | Esc: quit"
            }
            MemberFocus::Tasks => {
                "↑↓/jk: navigate | +/-: progress ±10 | Tab: status | ^R: role | Esc: quit"
            }
        },
    };

    let (dot_color, status_text) = match state.roster.phase {
        FetchPhase::NotStarted => (theme.offline, "Waiting for roster".to_string()),
        FetchPhase::Loading => (theme.on_break, "Loading roster...".to_string()),
        FetchPhase::Succeeded => (theme.working, format!("{} members", state.roster.list.len())),
        FetchPhase::Failed => (
            theme.error,
            state
                .roster
                .error
                .clone()
                .unwrap_or_else(|| "Fetch failed".to_string()),
        ),
    };

    let status_line = Line::from(vec![
        Span::styled("Team Pulse v0.1.0", theme.bold()),
        Span::raw(" | "),
        Span::styled("\u{25cf}", theme.normal().fg(dot_color)),
        Span::raw(format!(" {status_text}")),
        Span::raw(" | "),
        Span::styled(help_text, theme.dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme.status_bar_bg());
    frame.render_widget(paragraph, area);
}
