//! Gilded palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const GOLD: Color = Color::Rgb(232, 185, 35); // #e8b923
pub const ROSE_GOLD: Color = Color::Rgb(232, 144, 128); // #e89080
pub const PEARL: Color = Color::Rgb(236, 232, 222); // #ece8de
pub const EMERALD: Color = Color::Rgb(80, 200, 120); // #50c878
pub const RUBY: Color = Color::Rgb(224, 17, 95); // #e0115f
pub const SAPPHIRE: Color = Color::Rgb(106, 152, 232); // #6a98e8

pub const ASH: Color = Color::Rgb(140, 134, 120); // #8c8678
pub const BG_HIGHLIGHT: Color = Color::Rgb(48, 42, 30); // #302a1e
pub const BG_DARK: Color = Color::Rgb(26, 23, 18); // #1a1712

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(GOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(ASH)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(GOLD)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(PEARL)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(GOLD)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(PEARL)
}

pub fn price() -> Style {
    Style::default().fg(GOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(ASH)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

/// A key hint whose action is unavailable right now.
pub fn key_hint_disabled() -> Style {
    Style::default().fg(ASH).add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
}
