//! Lead view rendering: status summary tiles, status distribution,
//! assign-task form, and the filterable member list.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use teampulse_model::member::{Member, MemberStatus};

use super::theme::Theme;
use crate::app::{App, FormFeedback, FormField, LeadFocus};

/// Width of the textual distribution bars, in cells.
const BAR_WIDTH: usize = 20;

/// Render the lead view.
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let members = &app.store.state().roster.list;
    if members.is_empty() {
        let paragraph = Paragraph::new("Loading team data...")
            .style(theme.dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(9),
            Constraint::Min(5),
        ])
        .split(area);

    render_summary_tiles(frame, chunks[0], members, theme);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_task_form(frame, middle[0], app, theme);
    render_distribution(frame, middle[1], members, theme);

    render_member_list(frame, chunks[2], app, theme);
}

/// Members per status, in display order.
fn status_counts(members: &[Member]) -> [(MemberStatus, usize); 4] {
    MemberStatus::ALL.map(|status| {
        let count = members.iter().filter(|m| m.status == status).count();
        (status, count)
    })
}

/// One tile per status with the member count.
fn render_summary_tiles(frame: &mut Frame, area: Rect, members: &[Member], theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((status, count), chunk) in status_counts(members).into_iter().zip(chunks.iter()) {
        let block = Block::default()
            .title(status.to_string())
            .borders(Borders::ALL)
            .border_style(theme.normal());
        let paragraph = Paragraph::new(count.to_string())
            .style(
                theme
                    .bold()
                    .fg(theme.status_color(status)),
            )
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, *chunk);
    }
}

/// Horizontal bars showing the share of members in each status.
fn render_distribution(frame: &mut Frame, area: Rect, members: &[Member], theme: &Theme) {
    let total = members.len();
    let lines: Vec<Line> = status_counts(members)
        .into_iter()
        .map(|(status, count)| {
            let filled = if total == 0 { 0 } else { count * BAR_WIDTH / total };
            Line::from(vec![
                Span::styled(format!("{status:<8} "), theme.dimmed()),
                Span::styled(
                    "\u{2588}".repeat(filled),
                    theme.normal().fg(theme.status_color(status)),
                ),
                Span::styled("\u{00b7}".repeat(BAR_WIDTH - filled), theme.dimmed()),
                Span::styled(format!(" {count}"), theme.bold()),
            ])
        })
        .collect();

    let block = Block::default()
        .title("Status Distribution")
        .borders(Borders::ALL)
        .border_style(theme.normal());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The assign-task form.
fn render_task_form(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.lead_focus == LeadFocus::Form;
    let members = &app.store.state().roster.list;

    let field_style = |field: FormField| {
        if focused && app.form.field == field {
            theme.highlighted()
        } else {
            theme.normal()
        }
    };

    let member_name = members
        .get(app.form.member_index)
        .map_or("-", |m| m.name.as_str());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Member:   ", theme.dimmed()),
            Span::styled(
                format!("\u{25c2} {member_name} \u{25b8}"),
                field_style(FormField::Member),
            ),
        ]),
        Line::from(vec![
            Span::styled("Title:    ", theme.dimmed()),
            Span::styled(app.form.title.clone(), field_style(FormField::Title)),
        ]),
        Line::from(vec![
            Span::styled("Due date: ", theme.dimmed()),
            Span::styled(app.form.due_date.clone(), field_style(FormField::DueDate)),
            Span::styled("  (YYYY-MM-DD)", theme.dimmed()),
        ]),
    ];

    match &app.form.feedback {
        Some(FormFeedback::Error(message)) => {
            lines.push(Line::from(Span::styled(message.clone(), theme.error_text())));
        }
        Some(FormFeedback::Assigned(name)) => {
            lines.push(Line::from(Span::styled(
                format!("Task assigned to {name}"),
                theme.normal().fg(theme.working),
            )));
        }
        None => {}
    }

    let block = Block::default()
        .title("Assign New Task")
        .borders(Borders::ALL)
        .border_style(theme.border(focused));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The filterable, sortable member list.
fn render_member_list(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.lead_focus == LeadFocus::Members;
    let visible = app.visible_members();

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, member)| {
            let color = theme.status_color(member.status);
            let line = Line::from(vec![
                Span::styled("\u{25cf} ", theme.normal().fg(color)),
                Span::styled(member.name.clone(), theme.normal()),
                Span::styled(
                    format!(" — {} active tasks", member.active_task_count()),
                    theme.dimmed(),
                ),
                Span::raw("  "),
                Span::styled(member.status.to_string(), theme.normal().fg(color)),
            ]);
            let style = if focused && idx == app.selected_member {
                theme.selected()
            } else {
                theme.normal()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        "Team Members — filter: {} · sort: {}",
        app.filter.label(),
        app.sort.label()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme.border(focused));
    frame.render_widget(List::new(items).block(block), area);
}
