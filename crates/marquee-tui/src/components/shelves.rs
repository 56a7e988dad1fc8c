//! Shelves component: the upcoming, top ten and trending movie rows.
//!
//! Only the active trending shelf is drawn, under its tab strip.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use marquee_core::notice::UserAction;
use marquee_core::view::{ShelfId, Slot, ViewItem};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::fit,
    layout::{active_trending, hit, shelf_rows, SHELF_ROW_ROWS},
    theme::{
        style_active_tab, style_muted, style_secondary, style_title, C_ACCENT, C_PANEL_BORDER,
        C_QUALITY, C_SELECTION_BG,
    },
    widgets::pane_chrome::pane_chrome,
};

const CARD_COLS: u16 = 22;
const CARD_GAP: u16 = 2;

struct ShelfCard<'a> {
    title: &'a str,
    duration: &'a str,
    quality: &'a str,
}

fn cards(state: &AppState, shelf: ShelfId) -> Vec<ShelfCard<'_>> {
    state
        .surface
        .items(Slot::Shelf(shelf))
        .iter()
        .filter_map(|e| match &e.item {
            ViewItem::MovieCard {
                title,
                duration,
                quality,
                ..
            } => Some(ShelfCard {
                title,
                duration,
                quality,
            }),
            _ => None,
        })
        .collect()
}

fn row_title(shelf: ShelfId) -> &'static str {
    if shelf.is_trending() {
        "Trending"
    } else {
        shelf.title()
    }
}

pub struct Shelves {
    row: usize,
    col: usize,
    /// First drawn card per row.
    scroll: Vec<usize>,
    cards: Vec<(Rect, ShelfId, usize)>,
    tabs: Vec<(Rect, ShelfId)>,
}

impl Shelves {
    pub fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            scroll: Vec::new(),
            cards: Vec::new(),
            tabs: Vec::new(),
        }
    }

    fn selected<'a>(&self, state: &'a AppState) -> Option<&'a str> {
        let shelf = *shelf_rows(&state.surface).get(self.row)?;
        state
            .surface
            .items(Slot::Shelf(shelf))
            .get(self.col)
            .and_then(|e| match &e.item {
                ViewItem::MovieCard { title, .. } => Some(title.as_str()),
                _ => None,
            })
    }

    fn clamp(&mut self, state: &AppState) {
        let rows = shelf_rows(&state.surface);
        self.row = self.row.min(rows.len().saturating_sub(1));
        let len = rows
            .get(self.row)
            .map(|&s| state.surface.items(Slot::Shelf(s)).len())
            .unwrap_or(0);
        self.col = self.col.min(len.saturating_sub(1));
        self.scroll.resize(rows.len(), 0);
    }

    fn invoke(&self, state: &AppState, make: fn(String) -> UserAction) -> Vec<Action> {
        self.selected(state)
            .map(|title| vec![Action::Invoke(make(title.to_string()))])
            .unwrap_or_default()
    }

    fn cycle_trending(state: &AppState, forward: bool) -> Vec<Action> {
        let current = active_trending(&state.surface);
        let pos = ShelfId::TRENDING.iter().position(|&s| s == current).unwrap_or(0);
        let len = ShelfId::TRENDING.len();
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        vec![Action::TrendingSelect(ShelfId::TRENDING[next])]
    }

    fn draw_row(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        row: usize,
        shelf: ShelfId,
        focused: bool,
        state: &AppState,
    ) {
        // Title line, with the tab strip for the trending row.
        let mut spans = vec![Span::styled(format!("{}  ", row_title(shelf)), style_title())];
        let mut x = area.x + spans[0].width() as u16;
        if shelf.is_trending() {
            for tab in ShelfId::TRENDING {
                let label = format!(" {} ", tab.title());
                let w = label.chars().count() as u16;
                let style = if tab == shelf { style_active_tab() } else { style_muted() };
                self.tabs.push((Rect::new(x, area.y, w, 1), tab));
                spans.push(Span::styled(label, style));
                spans.push(Span::styled("│", Style::default().fg(C_PANEL_BORDER)));
                x += w + 1;
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), Rect { height: 1, ..area });

        let shelf_cards = cards(state, shelf);
        let per_page = ((area.width + CARD_GAP) / (CARD_COLS + CARD_GAP)).max(1) as usize;
        let scroll = self.scroll.get(row).copied().unwrap_or(0);
        let mut scroll = scroll.min(shelf_cards.len().saturating_sub(1));
        if row == self.row {
            if self.col < scroll {
                scroll = self.col;
            } else if self.col >= scroll + per_page {
                scroll = self.col + 1 - per_page;
            }
        }
        if let Some(s) = self.scroll.get_mut(row) {
            *s = scroll;
        }

        let card_h = area.height.saturating_sub(2);
        let visible = shelf_cards.iter().enumerate().skip(scroll).take(per_page);
        for (slot, (index, card)) in visible.enumerate() {
            let rect = Rect::new(
                area.x + slot as u16 * (CARD_COLS + CARD_GAP),
                area.y + 1,
                CARD_COLS.min(area.width),
                card_h,
            );
            let selected = focused && row == self.row && index == self.col;
            let width = CARD_COLS.saturating_sub(2) as usize;
            let mut lines = vec![
                Line::from(Span::styled(fit(card.title, width), style_title())),
                Line::from(Span::styled(format!("◷ {}", card.duration), style_secondary())),
                Line::from(Span::styled(
                    format!("[{}]", card.quality),
                    Style::default().fg(C_QUALITY),
                )),
            ];
            if selected {
                lines.push(Line::from(Span::styled("▶ ＋ ♥", Style::default().fg(C_ACCENT))));
            }
            let border = if selected { C_ACCENT } else { C_PANEL_BORDER };
            let background = if selected {
                Style::default().bg(C_SELECTION_BG)
            } else {
                Style::default()
            };
            let block = Block::default()
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(border));
            frame.render_widget(Paragraph::new(lines).block(block).style(background), rect);
            self.cards.push((rect, shelf, index));
        }
        if shelf_cards.len() > scroll + per_page {
            let more = format!("+{}", shelf_cards.len() - scroll - per_page);
            let w = more.len() as u16;
            frame.render_widget(
                Paragraph::new(Span::styled(more, style_muted())),
                Rect::new(area.x + area.width.saturating_sub(w), area.y, w, 1),
            );
        }
    }
}

impl Default for Shelves {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Shelves {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.clamp(state);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.row = self.row.saturating_sub(1);
                self.clamp(state);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.row += 1;
                self.clamp(state);
            }
            KeyCode::Left | KeyCode::Char('h') => self.col = self.col.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                self.col += 1;
                self.clamp(state);
            }
            KeyCode::Home | KeyCode::Char('g') => self.col = 0,
            KeyCode::Char('[') => return Self::cycle_trending(state, false),
            KeyCode::Char(']') => return Self::cycle_trending(state, true),
            KeyCode::Enter => return self.invoke(state, UserAction::PlayMovie),
            KeyCode::Char('w') => return self.invoke(state, UserAction::AddToWatchlist),
            KeyCode::Char('f') => return self.invoke(state, UserAction::Like),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        if let Some((_, tab)) = self.tabs.iter().find(|(r, _)| hit(*r, col, row)) {
            return vec![Action::TrendingSelect(*tab)];
        }
        let clicked = self
            .cards
            .iter()
            .find(|(r, _, _)| hit(*r, col, row))
            .map(|&(_, shelf, index)| (shelf, index));
        if let Some((shelf, index)) = clicked {
            if let Some(pos) = shelf_rows(&state.surface).iter().position(|&s| s == shelf) {
                self.row = pos;
                self.col = index;
                return self.invoke(state, UserAction::PlayMovie);
            }
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::TrendingSelect(_) = action {
            // The trending row now holds a different shelf.
            if let Some(last) = self.scroll.last_mut() {
                *last = 0;
            }
            self.col = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.cards.clear();
        self.tabs.clear();
        self.clamp(state);
        let block = pane_chrome("Movies", Some('2'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        for (i, shelf) in shelf_rows(&state.surface).into_iter().enumerate() {
            let y = inner.y + i as u16 * SHELF_ROW_ROWS;
            if y >= inner.y + inner.height {
                break;
            }
            let h = SHELF_ROW_ROWS.min(inner.y + inner.height - y);
            let row_area = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), h);
            self.draw_row(frame, row_area, i, shelf, focused, state);
        }
    }
}
