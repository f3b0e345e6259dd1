use crate::app::{App, FilterField};
use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the one-line filter bar. Values are local edits only — nothing
/// hits the network until Enter applies them.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = if app.editing_filters {
        Theme::block_accent().title(" Filters — Tab next field · Enter apply · Esc cancel ")
    } else {
        Theme::block_dim().title(" Filters — f edit · c clear ")
    };
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = Vec::new();
    for (idx, field) in FilterField::ORDER.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::new().fg(Theme::TEXT_MUTED)));
        }
        spans.push(Span::styled(
            format!("{}: ", field.label()),
            Style::new().fg(Theme::TEXT_SECONDARY),
        ));

        let value = app.filters.value(*field);
        let focused = app.editing_filters && app.filters.focused == *field;
        let value_style = if focused {
            Style::new().fg(Theme::TEXT_PRIMARY).bg(Theme::BG_SURFACE)
        } else if value.is_empty() {
            Style::new().fg(Theme::TEXT_MUTED)
        } else {
            Style::new().fg(Theme::TEXT_PRIMARY)
        };

        let shown = if value.is_empty() && !focused {
            "·".to_string()
        } else {
            value.to_string()
        };
        spans.push(Span::styled(shown, value_style));
        if focused {
            spans.push(Span::styled("_", Style::new().fg(Theme::ACCENT_YELLOW)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
