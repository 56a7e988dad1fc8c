//! SearchResults component: the dropdown under the search box.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use marquee_core::view::{Region, Slot, TextField, ViewItem};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::fit,
    layout::hit,
    theme::{
        style_muted, style_secondary, style_selected_focused, style_title, C_OVERLAY_BG,
        C_PANEL_BORDER_FOCUSED,
    },
};

pub const RESULTS_COLS: u16 = 44;

pub struct SearchResults {
    cursor: usize,
    area: Rect,
    rows: Vec<(Rect, usize)>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            area: Rect::default(),
            rows: Vec::new(),
        }
    }

    /// Where the dropdown was last drawn; empty while hidden.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Anchor the dropdown under `search` and size it for `state`'s results.
    pub fn popup_rect(search: Rect, screen: Rect, state: &AppState) -> Rect {
        let items = state.surface.items(Slot::SearchResults).len() as u16;
        let width = RESULTS_COLS.min(screen.width);
        let x = (search.x + search.width).saturating_sub(width).max(screen.x);
        let y = search.y + 1;
        // Heading, two rows per hit, borders.
        let height = (items * 2 + 3).min((screen.y + screen.height).saturating_sub(y));
        Rect::new(x, y, width, height)
    }

    fn hit_count(state: &AppState) -> usize {
        state
            .surface
            .items(Slot::SearchResults)
            .iter()
            .filter(|e| matches!(e.item, ViewItem::SearchHit { .. }))
            .count()
    }
}

impl Default for SearchResults {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchResults {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !state.is_visible(Region::SearchResults) {
            return vec![];
        }
        let hits = Self::hit_count(state);
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(hits.saturating_sub(1));
                vec![]
            }
            KeyCode::Enter if self.cursor < hits => vec![Action::SearchSelect(self.cursor)],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .rows
                .iter()
                .find(|(r, _)| hit(*r, col, row))
                .map(|&(_, i)| vec![Action::SearchSelect(i)])
                .unwrap_or_default(),
            MouseEventKind::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            MouseEventKind::ScrollDown => {
                self.cursor = (self.cursor + 1).min(self.rows.len().saturating_sub(1));
                vec![]
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if matches!(
            action,
            Action::SearchChanged(_) | Action::SearchClose | Action::SearchSelect(_)
        ) {
            self.cursor = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        self.rows.clear();
        self.area = Rect::default();
        if !state.is_visible(Region::SearchResults) || area.height < 3 {
            return;
        }
        self.area = area;
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
            .style(Style::default().bg(C_OVERLAY_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width as usize;
        let mut lines = Vec::new();
        let heading = state.surface.text(TextField::SearchHeading);
        if !heading.is_empty() {
            lines.push(Line::from(Span::styled(heading.to_string(), style_muted())));
        }
        let mut hit_index = 0;
        for entry in state.surface.items(Slot::SearchResults) {
            let y = inner.y + lines.len() as u16;
            if y + 1 >= inner.y + inner.height {
                break;
            }
            match &entry.item {
                ViewItem::SearchHit { title, meta, .. } => {
                    let selected = hit_index == self.cursor;
                    let (title_style, meta_style) = if selected {
                        (style_selected_focused(), style_selected_focused())
                    } else {
                        (style_title(), style_secondary())
                    };
                    lines.push(Line::from(Span::styled(fit(title, width), title_style)));
                    lines.push(Line::from(Span::styled(fit(meta, width), meta_style)));
                    self.rows.push((Rect::new(inner.x, y, inner.width, 2), hit_index));
                    hit_index += 1;
                }
                ViewItem::Placeholder(message) => {
                    lines.push(Line::from(Span::styled(fit(message, width), style_muted())));
                }
                _ => {}
            }
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
