//! Status bar: bottom line with the input mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ACCENT, C_MODE_MENU, C_MODE_NORMAL, C_MODE_SEARCH, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    /// The navigation drawer owns the keyboard.
    Menu,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "BROWSE",
            Self::Search => "SEARCH",
            Self::Menu => "MENU",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
            Self::Menu => C_MODE_MENU,
        }
    }

    fn keys(self) -> &'static str {
        match self {
            Self::Normal => {
                " ←→/↑↓ navigate  Enter play  w watchlist  f like  [ ] tabs  Tab/1-4 sections  PgUp/PgDn scroll  / search  u account  m menu  ? help  q quit"
            }
            Self::Search => " type to search  ↑↓ pick  Enter play  Esc hide  Ctrl+U clear+close",
            Self::Menu => " ↑↓ move  Enter go  Esc/m close",
        }
    }
}

/// Draw the keybindings footer bar (one row). `back_to_top` adds the
/// right-aligned back-to-top hint.
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, back_to_top: bool) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(mode.keys(), Style::default().fg(C_MUTED)),
    ];
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();

    if back_to_top {
        let hint = " ▲ top (t) ";
        let pad = (area.width as usize).saturating_sub(used + hint.chars().count());
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
