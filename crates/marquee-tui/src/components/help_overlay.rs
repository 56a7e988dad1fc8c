//! HelpOverlay component: centered popup with the key reference.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    layout::hit,
    theme::{C_MUTED, C_OVERLAY_BG, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

pub struct HelpOverlay {
    pub visible: bool,
    popup: Rect,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self {
            visible: false,
            popup: Rect::default(),
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // Everything else is swallowed while the overlay is up.
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left)
                if self.visible && !hit(self.popup, event.column, event.row) =>
            {
                vec![Action::ToggleHelp]
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }

        let popup = centered_rect(64, 36, area);
        self.popup = popup;

        let help_lines: Vec<Line> = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            section(" page"),
            help_row("tab / shift-tab", "focus next / previous section"),
            help_row("1 / 2 / 3 / 4", "featured / movies / continue / series"),
            help_row("pg up / pg dn", "scroll the page one section"),
            help_row("t", "back to top"),
            help_row("m", "navigation drawer (narrow layout)"),
            help_row("u", "user menu"),
            Line::from(""),
            section(" featured"),
            help_row("↑ ↓ ← →  h j k l", "previous / next title"),
            help_row("enter / w / f", "play / watchlist / like"),
            Line::from(""),
            section(" movies"),
            help_row("↑ / ↓  or  k / j", "move between shelves"),
            help_row("← / →  or  h / l", "move along a shelf"),
            help_row("[ / ]", "trending: today / week / month"),
            help_row("enter / w / f", "play / watchlist / like"),
            Line::from(""),
            section(" continue watching"),
            help_row("← / →", "move between titles"),
            help_row("< / >", "scroll the row"),
            help_row("enter", "resume title"),
            Line::from(""),
            section(" series"),
            help_row("← / →", "previous / next series"),
            help_row("[ / ]", "previous / next season"),
            help_row("↑ / ↓  enter", "pick and play an episode"),
            help_row("p", "play the series"),
            Line::from(""),
            section(" search"),
            help_row("/", "open search (2+ chars to search)"),
            help_row("↑ / ↓  enter", "pick and play a result"),
            help_row("esc  /  ctrl+u", "hide results / clear and close"),
            Line::from(""),
            help_row("K", "toggle keys bar"),
            help_row("?", "toggle this help overlay"),
            help_row("q / Ctrl+C", "quit"),
            Line::from(""),
            Line::from(Span::styled(
                " press ? or esc to close",
                Style::default().fg(C_MUTED),
            )),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER))
                        .style(Style::default().bg(C_OVERLAY_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<18}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(r.height)),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
