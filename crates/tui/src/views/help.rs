use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

pub fn render(frame: &mut Frame, area: Rect) {
    // Center the help overlay
    let popup_width = 56u16.min(area.width.saturating_sub(4));
    let popup_height = 24u16.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Theme::block_accent()
        .title(" Keyboard Shortcuts ")
        .padding(Theme::PADDING_CARD);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::new().fg(Theme::ACCENT_YELLOW).bold();
    let desc_style = Style::new().fg(Theme::TEXT_CONTENT);
    let header_style = Style::new().fg(Theme::ACCENT_BLUE).bold();

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<9}"), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("── Global ──", header_style)),
        entry("?", "Toggle this help"),
        entry("i", "Toggle insights charts"),
        entry("q", "Quit"),
        Line::raw(""),
        Line::from(Span::styled("── Log Table ──", header_style)),
        entry("j/k", "Move cursor down/up"),
        entry("g/G", "Jump to first/last row"),
        entry("Space", "Select/deselect row"),
        entry("s", "Summarize selected entries"),
        entry("n / ]", "Next page (when the page is full)"),
        entry("p / [", "Previous page"),
        entry("r", "Reload current page"),
        Line::raw(""),
        Line::from(Span::styled("── Filters ──", header_style)),
        entry("f or /", "Edit filters"),
        entry("Tab", "Next filter field"),
        entry("Enter", "Apply filters (back to page one)"),
        entry("Esc", "Stop editing without applying"),
        entry("c", "Clear all filter fields"),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::new().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
