//! Color palette and style constants for the marquee TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 16, 20);
pub const C_ACCENT: Color = Color::Rgb(229, 9, 20);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(128, 128, 150);
pub const C_PRIMARY: Color = Color::Rgb(220, 220, 232);
pub const C_SELECTION_BG: Color = Color::Rgb(34, 30, 44);
pub const C_PANEL_BORDER: Color = Color::Rgb(44, 44, 56);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(229, 9, 20);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_FILTER_BG: Color = Color::Rgb(24, 24, 34);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_TAG: Color = Color::Rgb(80, 140, 200);
pub const C_RATING: Color = Color::Rgb(255, 210, 50);
pub const C_QUALITY: Color = Color::Rgb(100, 160, 130);
pub const C_PROGRESS: Color = Color::Rgb(229, 9, 20);
pub const C_BACKDROP: Color = Color::Rgb(60, 60, 78);
pub const C_OVERLAY_BG: Color = Color::Rgb(20, 20, 28);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);
pub const C_MODE_SEARCH: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_MENU: Color = Color::Rgb(180, 120, 220);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_title() -> Style {
    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_active_tab() -> Style {
    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_tag() -> Style {
    Style::default().fg(C_TAG)
}

pub fn style_rating() -> Style {
    Style::default().fg(C_RATING)
}
