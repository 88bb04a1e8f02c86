//! Member view rendering: status picker and personal task list.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use teampulse_model::member::{Member, MemberStatus};
use teampulse_model::task::Task;

use super::theme::Theme;
use crate::app::{App, MemberFocus};

/// Width of the textual task progress bar, in cells.
const BAR_WIDTH: usize = 10;

/// Render the member view.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let Some(user) = app.store.state().current_user.as_ref() else {
        let paragraph = Paragraph::new("Loading your data...")
            .style(theme.dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(area);

    render_status_picker(frame, chunks[0], app, user, theme);
    render_task_list(frame, chunks[1], app, user, theme);
}

/// One segment per status; the member's current status is inverted, the
/// picker cursor is underlined.
fn render_status_picker(frame: &mut Frame, area: Rect, app: &App, user: &Member, theme: &Theme) {
    let focused = app.member_focus == MemberFocus::StatusPicker;

    let mut spans = Vec::with_capacity(MemberStatus::ALL.len() * 2);
    for (idx, status) in MemberStatus::ALL.iter().enumerate() {
        let color = theme.status_color(*status);
        let mut style = if user.status == *status {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        if focused && idx == app.selected_status {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!(" {}:{} ", idx + 1, status), style));
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .title("Update Your Status")
        .borders(Borders::ALL)
        .border_style(theme.border(focused));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Active tasks first (selectable, adjustable), then completed tasks.
fn render_task_list(frame: &mut Frame, area: Rect, app: &App, user: &Member, theme: &Theme) {
    let focused = app.member_focus == MemberFocus::Tasks;

    let active: Vec<&Task> = user.tasks.iter().filter(|t| !t.completed).collect();
    let completed: Vec<&Task> = user.tasks.iter().filter(|t| t.completed).collect();

    let mut items: Vec<ListItem> = Vec::new();

    if active.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No active tasks. Great job!",
            theme.dimmed(),
        ))));
    }
    for (idx, task) in active.iter().enumerate() {
        let line = Line::from(vec![
            Span::styled(progress_bar(task.progress), theme.normal().fg(theme.accent)),
            Span::styled(format!(" {:>3}%  ", task.progress), theme.bold()),
            Span::styled(task.title.clone(), theme.normal()),
            Span::styled(format!("  (due {})", task.due_date), theme.dimmed()),
        ]);
        let style = if focused && idx == app.selected_task {
            theme.selected()
        } else {
            theme.normal()
        };
        items.push(ListItem::new(line).style(style));
    }

    if !completed.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "— Completed —",
            theme.dimmed(),
        ))));
        for task in completed {
            items.push(ListItem::new(Line::from(vec![
                Span::styled("\u{2713} ", theme.normal().fg(theme.working)),
                Span::styled(task.title.clone(), theme.dimmed()),
                Span::styled(format!("  (due {})", task.due_date), theme.dimmed()),
            ])));
        }
    }

    let block = Block::default()
        .title("Your Tasks")
        .borders(Borders::ALL)
        .border_style(theme.border(focused));
    frame.render_widget(List::new(items).block(block), area);
}

/// Textual progress bar, e.g. `[████······]`.
fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress) * BAR_WIDTH / 100;
    format!(
        "[{}{}]",
        "\u{2588}".repeat(filled),
        "\u{00b7}".repeat(BAR_WIDTH - filled)
    )
}
