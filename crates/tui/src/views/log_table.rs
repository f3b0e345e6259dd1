use crate::app::App;
use crate::theme::{self, Theme};
use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Cell, HighlightSpacing, Paragraph, Row, Table};

/// Render the log table area. Exactly one of: loading indicator, error
/// line, empty-state line, or the table itself.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(
        " Activity Logs — {} rows, offset {} ",
        app.logs.len(),
        app.criteria.offset
    );
    let block = Theme::block_dim().title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.logs_loading {
        render_notice(frame, inner, "Loading logs…", Theme::ACCENT_YELLOW);
        return;
    }
    if let Some(ref error) = app.logs_error {
        render_notice(frame, inner, &format!("Error: {error}"), Theme::ACCENT_RED);
        return;
    }
    if app.logs.is_empty() {
        render_notice(frame, inner, "No logs found.", Theme::TEXT_SECONDARY);
        return;
    }

    let header = Row::new(
        ["", "ID", "Employee", "Timestamp", "Type", "Application", "Window", "Detail"]
            .into_iter()
            .map(Cell::from),
    )
    .style(Style::new().fg(Theme::TEXT_SECONDARY).bold())
    .height(1);

    let rows: Vec<Row> = app
        .logs
        .iter()
        .map(|log| {
            let checked = app.selected.contains(&log.id);
            let checkbox = if checked { "[x]" } else { "[ ]" };
            let checkbox_style = if checked {
                Style::new().fg(Theme::ACCENT_GREEN).bold()
            } else {
                Style::new().fg(Theme::TEXT_MUTED)
            };
            let timestamp = log
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();

            let row = Row::new(vec![
                Cell::from(checkbox).style(checkbox_style),
                Cell::from(log.id.to_string()).style(Style::new().fg(Theme::TEXT_SECONDARY)),
                Cell::from(log.employee_id.clone()).style(Style::new().fg(Theme::TEXT_PRIMARY)),
                Cell::from(timestamp).style(Style::new().fg(Theme::TEXT_CONTENT)),
                Cell::from(log.event_type.clone())
                    .style(Style::new().fg(theme::event_color(&log.event_type))),
                Cell::from(display_opt(&log.application_name))
                    .style(Style::new().fg(Theme::TEXT_CONTENT)),
                Cell::from(truncate(&display_opt(&log.window_title), 32))
                    .style(Style::new().fg(Theme::TEXT_SECONDARY)),
                Cell::from(truncate(&display_opt(&log.event_detail), 48))
                    .style(Style::new().fg(Theme::TEXT_SECONDARY)),
            ]);
            if checked {
                row.style(Style::new().bg(Theme::BG_SURFACE))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(7),
        Constraint::Length(14),
        Constraint::Length(19),
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::new().bg(Theme::BG_SURFACE).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ")
        .highlight_spacing(HighlightSpacing::Always);

    app.table_state.select(if app.logs.is_empty() {
        None
    } else {
        Some(app.cursor.min(app.logs.len() - 1))
    });
    frame.render_stateful_widget(table, inner, &mut app.table_state);
}

fn render_notice(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let paragraph = Paragraph::new(Line::from(Span::styled(text, Style::new().fg(color))))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Missing optional fields display as a dash, matching the web table's "N/A".
pub fn display_opt(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("-").to_string()
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
