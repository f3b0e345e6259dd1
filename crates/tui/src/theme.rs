use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Padding};

pub struct Theme;

impl Theme {
    // ── Background ───────────────────────────────────────────────────
    pub const BG_SURFACE: Color = Color::Rgb(30, 35, 50);
    pub const BG_CELL_EMPTY: Color = Color::Rgb(45, 50, 65);

    // ── Border ───────────────────────────────────────────────────────
    pub const BORDER_DIM: Color = Color::DarkGray;
    pub const BORDER_NORMAL: Color = Color::Rgb(60, 65, 80);
    pub const BORDER_ACCENT: Color = Color::Rgb(100, 180, 240);

    // ── Text hierarchy ───────────────────────────────────────────────
    pub const TEXT_PRIMARY: Color = Color::White;
    pub const TEXT_SECONDARY: Color = Color::Rgb(140, 145, 160);
    pub const TEXT_MUTED: Color = Color::Rgb(80, 85, 100);
    pub const TEXT_CONTENT: Color = Color::Rgb(170, 175, 190);

    // ── Key style (for footer hints) ─────────────────────────────────
    pub const TEXT_KEY: Color = Color::Rgb(140, 145, 160);
    pub const TEXT_KEY_DESC: Color = Color::DarkGray;

    // ── Accent ───────────────────────────────────────────────────────
    pub const ACCENT_BLUE: Color = Color::Rgb(100, 180, 240);
    pub const ACCENT_GREEN: Color = Color::Rgb(80, 200, 120);
    pub const ACCENT_RED: Color = Color::Rgb(220, 80, 80);
    pub const ACCENT_YELLOW: Color = Color::Rgb(220, 180, 60);
    pub const ACCENT_ORANGE: Color = Color::Rgb(217, 119, 80);

    // ── Chart series ─────────────────────────────────────────────────
    pub const SERIES_EXECUTION: Color = Color::Rgb(52, 152, 219);
    pub const SERIES_COMMUNICATION: Color = Color::Rgb(255, 115, 0);

    // ── Badge backgrounds ────────────────────────────────────────────
    pub const BADGE_ONLINE: Color = Color::Rgb(80, 200, 120);
    pub const BADGE_OFFLINE: Color = Color::Rgb(220, 80, 80);
    pub const BADGE_UNKNOWN: Color = Color::Rgb(100, 105, 120);

    // ── Padding ──────────────────────────────────────────────────────
    pub const PADDING_CARD: Padding = Padding::new(2, 2, 1, 1);

    // ── Block helpers ────────────────────────────────────────────────

    pub fn block() -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Self::BORDER_NORMAL))
    }

    pub fn block_dim() -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Self::BORDER_DIM))
    }

    pub fn block_accent() -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Self::BORDER_ACCENT))
    }
}

// ── Heatmap scale ────────────────────────────────────────────────────

/// Focus-score cell colour: high scores green, middling yellow, low red.
pub fn heatmap_color(score: f64) -> Color {
    if score > 0.7 {
        Color::Rgb(40, 167, 69)
    } else if score > 0.4 {
        Color::Rgb(255, 193, 7)
    } else {
        Color::Rgb(220, 53, 69)
    }
}

// ── Event type colour ────────────────────────────────────────────────

const EVENT_PALETTE: [Color; 8] = [
    Color::Rgb(100, 180, 240), // blue
    Color::Rgb(80, 200, 120),  // green
    Color::Rgb(220, 180, 60),  // yellow
    Color::Rgb(180, 140, 220), // purple
    Color::Rgb(220, 130, 80),  // orange
    Color::Rgb(80, 200, 200),  // teal
    Color::Rgb(220, 100, 160), // pink
    Color::Rgb(160, 200, 80),  // lime
];

/// Stable colour per event type, with fixed choices for the common ones.
pub fn event_color(event_type: &str) -> Color {
    match event_type {
        "keyboard" => Theme::ACCENT_BLUE,
        "mouse_click" => Theme::ACCENT_GREEN,
        "app_focus" => Theme::ACCENT_YELLOW,
        "clipboard" => Theme::ACCENT_ORANGE,
        other => {
            let hash = other
                .bytes()
                .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
            EVENT_PALETTE[(hash as usize) % EVENT_PALETTE.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heatmap_color_uses_original_thresholds() {
        assert_eq!(heatmap_color(0.8), Color::Rgb(40, 167, 69));
        assert_eq!(heatmap_color(0.5), Color::Rgb(255, 193, 7));
        assert_eq!(heatmap_color(0.4), Color::Rgb(220, 53, 69));
        assert_eq!(heatmap_color(0.0), Color::Rgb(220, 53, 69));
    }

    #[test]
    fn event_color_is_stable_for_same_type() {
        assert_eq!(event_color("browser_tab"), event_color("browser_tab"));
    }

    #[test]
    fn event_color_maps_known_types() {
        assert_eq!(event_color("keyboard"), Theme::ACCENT_BLUE);
        assert_eq!(event_color("mouse_click"), Theme::ACCENT_GREEN);
        assert_eq!(event_color("app_focus"), Theme::ACCENT_YELLOW);
    }
}
