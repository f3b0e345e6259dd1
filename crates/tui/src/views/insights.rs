use std::collections::HashMap;

use crate::app::App;
use crate::theme::{self, Theme};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use worklens_api::HeatmapPoint;

/// Render the insights screen: overtime bars on the left, focus heatmap on
/// the right. Each chart has its own loading and error state so one failed
/// fetch never blanks the other.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    render_overtime(frame, app, left);
    render_heatmap(frame, app, right);
}

// ── Overtime root-cause chart ────────────────────────────────────────────

fn render_overtime(frame: &mut Frame, app: &App, area: Rect) {
    let block = Theme::block_dim().title(" Overtime Root Cause Drivers ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.overtime_loading {
        render_notice(frame, inner, "Loading chart…", Theme::ACCENT_YELLOW);
        return;
    }
    if let Some(ref error) = app.overtime_error {
        render_notice(frame, inner, &format!("Error: {error}"), Theme::ACCENT_RED);
        return;
    }
    let Some(ref points) = app.overtime else {
        return;
    };
    if points.is_empty() {
        render_notice(frame, inner, "No data.", Theme::TEXT_SECONDARY);
        return;
    }

    let max_total = points
        .iter()
        .map(|p| p.execution_events + p.communication_events)
        .max()
        .unwrap_or(0);
    let label_width = points
        .iter()
        .map(|p| p.category.chars().count())
        .max()
        .unwrap_or(0)
        .min(24);
    let bar_space = (inner.width as usize)
        .saturating_sub(label_width + 12)
        .max(8);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("■ ", Style::new().fg(Theme::SERIES_EXECUTION)),
            Span::styled("Execution   ", Style::new().fg(Theme::TEXT_SECONDARY)),
            Span::styled("■ ", Style::new().fg(Theme::SERIES_COMMUNICATION)),
            Span::styled("Communication", Style::new().fg(Theme::TEXT_SECONDARY)),
        ]),
        Line::raw(""),
    ];

    for point in points {
        let (exec_width, comm_width) = stacked_widths(
            point.execution_events,
            point.communication_events,
            max_total,
            bar_space,
        );
        let label = super::log_table::truncate(&point.category, label_width);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{label:>label_width$} "),
                Style::new().fg(Theme::TEXT_CONTENT),
            ),
            Span::styled(
                "█".repeat(exec_width),
                Style::new().fg(Theme::SERIES_EXECUTION),
            ),
            Span::styled(
                "█".repeat(comm_width),
                Style::new().fg(Theme::SERIES_COMMUNICATION),
            ),
            Span::styled(
                format!(
                    " {}/{}",
                    point.execution_events, point.communication_events
                ),
                Style::new().fg(Theme::TEXT_SECONDARY),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Split `avail` cells between the two stacked series, scaled against the
/// largest category total. A non-zero series always gets at least one cell
/// so small counts stay visible.
fn stacked_widths(execution: u64, communication: u64, max_total: u64, avail: usize) -> (usize, usize) {
    if max_total == 0 {
        return (0, 0);
    }
    let scale = |value: u64| -> usize {
        if value == 0 {
            0
        } else {
            (((value as f64) / (max_total as f64) * avail as f64).round() as usize).max(1)
        }
    };
    (scale(execution), scale(communication))
}

// ── Focus heatmap ────────────────────────────────────────────────────────

const CELL_WIDTH: usize = 4;

fn render_heatmap(frame: &mut Frame, app: &App, area: Rect) {
    let block = Theme::block_dim().title(" Focus Heatmap ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.heatmap_loading {
        render_notice(frame, inner, "Loading heatmap…", Theme::ACCENT_YELLOW);
        return;
    }
    if let Some(ref error) = app.heatmap_error {
        render_notice(frame, inner, &format!("Error: {error}"), Theme::ACCENT_RED);
        return;
    }
    let Some(ref points) = app.heatmap else {
        return;
    };
    if points.is_empty() {
        render_notice(frame, inner, "No data.", Theme::TEXT_SECONDARY);
        return;
    }

    let (days, hours) = heatmap_axes(points);
    let scores = cell_index(points);

    // Header row: day labels as columns.
    let cell_width = CELL_WIDTH;
    let mut header_spans = vec![Span::raw("     ")];
    for day in &days {
        let label = super::log_table::truncate(day, cell_width - 1);
        header_spans.push(Span::styled(
            format!("{label:<cell_width$}"),
            Style::new().fg(Theme::TEXT_SECONDARY).bold(),
        ));
    }
    let mut lines = vec![Line::from(header_spans), Line::raw("")];

    // One row per time bucket; cells absent from the data render neutral.
    for hour in &hours {
        let mut spans = vec![Span::styled(
            format!("{hour:>4} "),
            Style::new().fg(Theme::TEXT_SECONDARY),
        )];
        for day in &days {
            match scores.get(&(day.as_str(), *hour)) {
                Some(score) => spans.push(Span::styled(
                    "███ ",
                    Style::new().fg(theme::heatmap_color(*score)),
                )),
                None => spans.push(Span::styled(
                    "··· ",
                    Style::new().fg(Theme::BG_CELL_EMPTY),
                )),
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("█ ", Style::new().fg(theme::heatmap_color(0.9))),
        Span::styled("focused  ", Style::new().fg(Theme::TEXT_SECONDARY)),
        Span::styled("█ ", Style::new().fg(theme::heatmap_color(0.5))),
        Span::styled("mixed  ", Style::new().fg(Theme::TEXT_SECONDARY)),
        Span::styled("█ ", Style::new().fg(theme::heatmap_color(0.1))),
        Span::styled("distracted", Style::new().fg(Theme::TEXT_SECONDARY)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Derive the heatmap axes from the data itself: distinct day values
/// (lexical order) and distinct time buckets (numeric order). Sparse data
/// is fine — absent combinations simply have no cell entry.
pub fn heatmap_axes(points: &[HeatmapPoint]) -> (Vec<String>, Vec<u32>) {
    let mut days: Vec<String> = Vec::new();
    let mut hours: Vec<u32> = Vec::new();
    for point in points {
        if !days.contains(&point.day) {
            days.push(point.day.clone());
        }
        if !hours.contains(&point.hour) {
            hours.push(point.hour);
        }
    }
    days.sort();
    hours.sort_unstable();
    (days, hours)
}

pub fn cell_index(points: &[HeatmapPoint]) -> HashMap<(&str, u32), f64> {
    points
        .iter()
        .map(|p| ((p.day.as_str(), p.hour), p.focus_score))
        .collect()
}

fn render_notice(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let paragraph = Paragraph::new(Line::from(Span::styled(text, Style::new().fg(color))))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
