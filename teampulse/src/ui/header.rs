//! Header rendering: app title, role toggle, theme indicator, current user.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use teampulse_model::state::Role;

use super::theme::Theme;
use crate::app::App;

/// Render the header bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state = app.store.state();

    let role_style = |role: Role| {
        if state.role == role {
            theme.accented()
        } else {
            theme.dimmed()
        }
    };

    let mut spans = vec![
        Span::styled("Team Pulse", theme.accented()),
        Span::raw("   "),
        Span::styled("Member", role_style(Role::Member)),
        Span::styled(" / ", theme.dimmed()),
        Span::styled("Lead", role_style(Role::Lead)),
        Span::raw("   "),
        Span::styled(
            if state.dark_mode { "dark" } else { "light" },
            theme.dimmed(),
        ),
    ];

    if let Some(user) = &state.current_user {
        spans.push(Span::styled("   |   ", theme.dimmed()));
        spans.push(Span::styled(user.name.clone(), theme.bold()));
        let view_label = match state.role {
            Role::Lead => " — Team Lead View",
            Role::Member => " — My Dashboard",
        };
        spans.push(Span::styled(view_label, theme.dimmed()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.normal());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
