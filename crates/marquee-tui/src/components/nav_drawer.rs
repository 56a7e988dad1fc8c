//! NavDrawer component: the narrow-layout navigation drawer.
//!
//! Entries jump to a page section. The app closes the drawer on clicks
//! outside [`NavDrawer::area`].

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use marquee_core::view::Region;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    layout::{hit, visible_sections, PageSection},
    theme::{
        style_muted, style_secondary, style_selected_focused, C_ACCENT, C_OVERLAY_BG,
        C_PANEL_BORDER,
    },
};

pub const DRAWER_COLS: u16 = 28;

pub struct NavDrawer {
    cursor: usize,
    area: Rect,
    entries: Vec<(Rect, PageSection)>,
}

impl NavDrawer {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            area: Rect::default(),
            entries: Vec::new(),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    fn jump(section: PageSection) -> Vec<Action> {
        vec![Action::CloseNavDrawer, Action::FocusPane(section.component_id())]
    }
}

impl Default for NavDrawer {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for NavDrawer {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let sections = visible_sections(&state.surface);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(sections.len().saturating_sub(1))
            }
            KeyCode::Enter => {
                if let Some(&section) = sections.get(self.cursor) {
                    return Self::jump(section);
                }
            }
            KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => {
                return vec![Action::CloseNavDrawer]
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        self.entries
            .iter()
            .find(|(r, _)| hit(*r, event.column, event.row))
            .map(|&(_, section)| Self::jump(section))
            .unwrap_or_default()
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if matches!(action, Action::ToggleNavDrawer) {
            self.cursor = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        self.entries.clear();
        self.area = Rect::default();
        if !state.is_visible(Region::NavDrawer) {
            return;
        }
        let drawer = Rect {
            width: DRAWER_COLS.min(area.width),
            ..area
        };
        self.area = drawer;
        frame.render_widget(Clear, drawer);
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(C_PANEL_BORDER))
            .style(Style::default().bg(C_OVERLAY_BG));
        let inner = block.inner(drawer);
        frame.render_widget(block, drawer);

        let mut lines = vec![
            Line::from(Span::styled(
                " MARQUEE",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        let sections = visible_sections(&state.surface);
        self.cursor = self.cursor.min(sections.len().saturating_sub(1));
        for (i, section) in sections.into_iter().enumerate() {
            let y = inner.y + lines.len() as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let style = if i == self.cursor {
                style_selected_focused()
            } else {
                style_secondary()
            };
            let width = inner.width.saturating_sub(1) as usize;
            lines.push(Line::from(Span::styled(
                format!(" {:<width$}", section.title(), width = width),
                style,
            )));
            self.entries.push((Rect::new(inner.x, y, inner.width, 1), section));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" esc to close", style_muted())));
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
