use crate::app::{App, FlashLevel, ServerStatus, View};
use crate::theme::Theme;
use crate::views::{filter_bar, help, insights, log_table};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

pub fn render(frame: &mut Frame, app: &mut App) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);

    match app.view {
        View::Dashboard => render_dashboard(frame, app, body_area),
        View::Insights => insights::render(frame, app, body_area),
        View::Help => {
            render_dashboard(frame, app, body_area);
            help::render(frame, frame.area());
        }
    }

    render_footer(frame, app, footer_area);
}

fn render_dashboard(frame: &mut Frame, app: &mut App, area: Rect) {
    let summary_height = if app.summarizing || app.summary.is_some() || app.summary_error.is_some()
    {
        5
    } else {
        0
    };

    let [filter_area, summary_area, table_area, pagination_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(summary_height),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    filter_bar::render(frame, app, filter_area);
    if summary_height > 0 {
        render_summary_panel(frame, app, summary_area);
    }
    log_table::render(frame, app, table_area);
    render_pagination(frame, app, pagination_area);
}

fn render_summary_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Theme::block().title(" AI Summary ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = if app.summarizing {
        vec![Line::from(Span::styled(
            format!("Summarizing {} entries…", app.selected.len()),
            Style::new().fg(Theme::ACCENT_YELLOW).italic(),
        ))]
    } else if let Some(ref error) = app.summary_error {
        vec![Line::from(Span::styled(
            error.clone(),
            Style::new().fg(Theme::ACCENT_RED),
        ))]
    } else if let Some(ref summary) = app.summary {
        let mut lines = vec![Line::from(Span::styled(
            summary.summary.clone(),
            Style::new().fg(Theme::TEXT_PRIMARY),
        ))];
        if summary.employee_id.is_some() || summary.num_logs_summarized.is_some() {
            let mut meta = Vec::new();
            if let Some(ref employee) = summary.employee_id {
                meta.push(format!("employee: {employee}"));
            }
            if let Some(count) = summary.num_logs_summarized {
                meta.push(format!("{count} logs summarized"));
            }
            lines.push(Line::from(Span::styled(
                meta.join("  ·  "),
                Style::new().fg(Theme::TEXT_SECONDARY),
            )));
        }
        lines
    } else {
        Vec::new()
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = Style::new().fg(Theme::ACCENT_BLUE).bold();
    let disabled = Style::new().fg(Theme::TEXT_MUTED);

    let prev_style = if app.can_prev_page() { enabled } else { disabled };
    let next_style = if app.can_next_page() { enabled } else { disabled };
    let summarize_style = if app.can_summarize() {
        enabled
    } else {
        disabled
    };

    let line = Line::from(vec![
        Span::styled(" [p] Prev ", prev_style),
        Span::styled(
            format!(" offset {} ", app.criteria.offset),
            Style::new().fg(Theme::TEXT_SECONDARY),
        ),
        Span::styled(" [n] Next ", next_style),
        Span::styled("  ·  ", Style::new().fg(Theme::TEXT_MUTED)),
        Span::styled(
            format!(" [s] Summarize selected ({}) ", app.selected.len()),
            summarize_style,
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Theme::block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (badge_text, badge_bg) = match app.server_status {
        ServerStatus::Online { .. } => ("ONLINE", Theme::BADGE_ONLINE),
        ServerStatus::Offline => ("OFFLINE", Theme::BADGE_OFFLINE),
        ServerStatus::Unknown => ("…", Theme::BADGE_UNKNOWN),
    };

    let view_label = match app.view {
        View::Dashboard | View::Help => "Activity Logs",
        View::Insights => "Key Insights",
    };

    let status_span = if app.logs_loading {
        Span::styled("Loading…", Style::new().fg(Theme::ACCENT_YELLOW).italic())
    } else {
        Span::styled(
            format!("{} rows", app.logs.len()),
            Style::new().fg(Theme::TEXT_SECONDARY),
        )
    };

    let mut left_spans = vec![
        Span::styled(" worklens ", Style::new().fg(Theme::ACCENT_ORANGE).bold()),
        Span::styled(" ", Style::new()),
        Span::styled(
            format!(" {badge_text} "),
            Style::new().fg(Color::Black).bg(badge_bg).bold(),
        ),
        Span::styled("  ", Style::new()),
        Span::styled(view_label, Style::new().fg(Theme::ACCENT_BLUE)),
        Span::styled("  ", Style::new()),
        status_span,
    ];

    if let ServerStatus::Online {
        ai_model_loaded: false,
    } = app.server_status
    {
        left_spans.push(Span::styled(
            "  (summarizer not ready)",
            Style::new().fg(Theme::ACCENT_YELLOW),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(left_spans)).alignment(Alignment::Left),
        inner,
    );

    let right_line = Line::from(Span::styled(
        format!("{} ", app.config.server.url),
        Style::new().fg(Theme::TEXT_MUTED),
    ));
    frame.render_widget(
        Paragraph::new(right_line).alignment(Alignment::Right),
        inner,
    );
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    if let Some((ref msg, level)) = app.flash_message {
        let color = match level {
            FlashLevel::Success => Theme::ACCENT_GREEN,
            FlashLevel::Error => Theme::ACCENT_RED,
            FlashLevel::Info => Theme::ACCENT_BLUE,
        };
        let line = Line::from(Span::styled(format!(" {msg}"), Style::new().fg(color)));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let desc_style = Style::new().fg(Theme::TEXT_KEY_DESC);

    let help = match app.view {
        View::Dashboard | View::Help => {
            if app.editing_filters {
                Line::from(vec![
                    Span::styled(" Tab ", key_style),
                    Span::styled("field  ", desc_style),
                    Span::styled("Enter ", key_style),
                    Span::styled("apply  ", desc_style),
                    Span::styled("Esc ", key_style),
                    Span::styled("cancel", desc_style),
                ])
            } else {
                Line::from(vec![
                    Span::styled(" j/k ", key_style),
                    Span::styled("navigate  ", desc_style),
                    Span::styled("Space ", key_style),
                    Span::styled("select  ", desc_style),
                    Span::styled("s ", key_style),
                    Span::styled("summarize  ", desc_style),
                    Span::styled("f ", key_style),
                    Span::styled("filters  ", desc_style),
                    Span::styled("n/p ", key_style),
                    Span::styled("page  ", desc_style),
                    Span::styled("i ", key_style),
                    Span::styled("insights  ", desc_style),
                    Span::styled("? ", key_style),
                    Span::styled("help  ", desc_style),
                    Span::styled("q ", key_style),
                    Span::styled("quit", desc_style),
                ])
            }
        }
        View::Insights => Line::from(vec![
            Span::styled(" r ", key_style),
            Span::styled("refresh  ", desc_style),
            Span::styled("i/Esc ", key_style),
            Span::styled("back  ", desc_style),
            Span::styled("q ", key_style),
            Span::styled("quit", desc_style),
        ]),
    };

    frame.render_widget(Paragraph::new(help), area);
}
