//! ContinueRow component: partially watched titles with progress bars.

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
use marquee_core::sections::CONTINUE_SCROLL_STEP;
use marquee_core::view::{Slot, ViewItem};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{fit, skip_cells},
    layout::{clip_cols, cols_to_units, hit, units_to_cols},
    theme::{
        style_muted, style_rating, style_secondary, style_title, C_ACCENT, C_PANEL_BORDER,
        C_SELECTION_BG,
    },
    widgets::{animator::Animator, pane_chrome::pane_chrome, progress_bar::draw_progress},
};

pub const RESUME_CARD_COLS: u16 = 26;
const RESUME_CARD_GAP: u16 = 2;
/// Columns taken by the frame and the two scroll arrows.
const CHROME_COLS: u16 = 4;

/// Content and viewport widths of the row, in layout units, for a body `width` columns wide.
pub fn row_extent(cards: usize, width: u16) -> (f32, f32) {
    let content = cols_to_units(RESUME_CARD_COLS + RESUME_CARD_GAP) * cards as f32;
    (content, cols_to_units(width.saturating_sub(CHROME_COLS)))
}

struct ResumeCard<'a> {
    title: &'a str,
    date: &'a str,
    rating: &'a str,
    progress: f64,
}

fn resume_cards(state: &AppState) -> Vec<ResumeCard<'_>> {
    state
        .surface
        .items(Slot::ContinueRow)
        .iter()
        .filter_map(|e| match &e.item {
            ViewItem::ResumeCard {
                title,
                date,
                rating,
                progress,
                ..
            } => Some(ResumeCard {
                title,
                date,
                rating,
                progress: *progress,
            }),
            _ => None,
        })
        .collect()
}

pub struct ContinueRow {
    cursor: usize,
    offset: Animator,
    viewport_cols: u16,
    cards: Vec<(Rect, usize)>,
    left_arrow: Rect,
    right_arrow: Rect,
}

impl ContinueRow {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            offset: Animator::default(),
            viewport_cols: 0,
            cards: Vec::new(),
            left_arrow: Rect::default(),
            right_arrow: Rect::default(),
        }
    }

    /// Scroll needed to bring the cursor card fully into view, if any.
    fn reveal(&self, state: &AppState) -> Option<f32> {
        let scroll = state
            .surface
            .transform(Slot::ContinueRow)
            .map(|t| -t.offset)
            .unwrap_or(0.0);
        let span = cols_to_units(RESUME_CARD_COLS + RESUME_CARD_GAP);
        let left = self.cursor as f32 * span;
        let right = left + cols_to_units(RESUME_CARD_COLS);
        let viewport = cols_to_units(self.viewport_cols);
        if left < scroll {
            Some(left - scroll)
        } else if right > scroll + viewport && viewport > 0.0 {
            Some(right - scroll - viewport)
        } else {
            None
        }
    }

    fn play(&self, state: &AppState) -> Vec<Action> {
        resume_cards(state)
            .get(self.cursor)
            .map(|c| vec![Action::Invoke(UserAction::PlayTitle(c.title.to_string()))])
            .unwrap_or_default()
    }
}

impl Default for ContinueRow {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ContinueRow {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = state.surface.items(Slot::ContinueRow).len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
                self.reveal(state).map(|d| vec![Action::ContinueScroll(d)]).unwrap_or_default()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1).min(len.saturating_sub(1));
                self.reveal(state).map(|d| vec![Action::ContinueScroll(d)]).unwrap_or_default()
            }
            KeyCode::Char('<') | KeyCode::Char(',') => {
                vec![Action::ContinueScroll(-CONTINUE_SCROLL_STEP)]
            }
            KeyCode::Char('>') | KeyCode::Char('.') => {
                vec![Action::ContinueScroll(CONTINUE_SCROLL_STEP)]
            }
            KeyCode::Enter => self.play(state),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if hit(self.left_arrow, col, row) {
                    return vec![Action::ContinueScroll(-CONTINUE_SCROLL_STEP)];
                }
                if hit(self.right_arrow, col, row) {
                    return vec![Action::ContinueScroll(CONTINUE_SCROLL_STEP)];
                }
                if let Some(&(_, index)) = self.cards.iter().find(|(r, _)| hit(*r, col, row)) {
                    self.cursor = index;
                    return self.play(state);
                }
                vec![]
            }
            MouseEventKind::ScrollLeft => vec![Action::ContinueScroll(-CONTINUE_SCROLL_STEP)],
            MouseEventKind::ScrollRight => vec![Action::ContinueScroll(CONTINUE_SCROLL_STEP)],
            _ => vec![],
        }
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        self.offset.retarget(state.surface.transform(Slot::ContinueRow));
        self.offset.step();
        vec![]
    }

    fn is_animating(&self) -> bool {
        self.offset.is_moving()
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.cards.clear();
        let block = pane_chrome("Continue Watching", Some('3'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width <= CHROME_COLS || inner.height < 3 {
            return;
        }

        let cards = resume_cards(state);
        self.cursor = self.cursor.min(cards.len().saturating_sub(1));
        self.offset.retarget(state.surface.transform(Slot::ContinueRow));

        self.left_arrow = Rect::new(inner.x, inner.y + inner.height / 2, 1, 1);
        self.right_arrow = Rect::new(inner.x + inner.width - 1, inner.y + inner.height / 2, 1, 1);
        frame.render_widget(Paragraph::new(Span::styled("‹", style_secondary())), self.left_arrow);
        frame.render_widget(Paragraph::new(Span::styled("›", style_secondary())), self.right_arrow);

        let track = Rect::new(inner.x + 2, inner.y, inner.width - CHROME_COLS, inner.height);
        self.viewport_cols = track.width;
        let offset = self.offset.offset();
        let pitch = cols_to_units(RESUME_CARD_COLS + RESUME_CARD_GAP);
        for (i, card) in cards.iter().enumerate() {
            let left = track.x as i32 + units_to_cols(offset + pitch * i as f32);
            let Some((rect, skip)) = clip_cols(track, left, RESUME_CARD_COLS as i32) else {
                continue;
            };
            let skip = skip as usize;
            let selected = focused && i == self.cursor;
            let width = RESUME_CARD_COLS as usize - 1;
            let lines = vec![
                Line::from(Span::styled(skip_cells(&fit(card.title, width), skip), style_title())),
                Line::from(Span::styled(skip_cells(&fit(card.date, width), skip), style_muted())),
                Line::from(Span::styled(
                    skip_cells(&fit(card.rating, width), skip),
                    style_rating(),
                )),
            ];
            let border = if selected { C_ACCENT } else { C_PANEL_BORDER };
            let background = if selected {
                Style::default().bg(C_SELECTION_BG)
            } else {
                Style::default()
            };
            let text_area = Rect {
                height: rect.height.saturating_sub(1),
                ..rect
            };
            frame.render_widget(
                Paragraph::new(lines)
                    .block(
                        Block::default()
                            .borders(Borders::TOP)
                            .border_style(Style::default().fg(border)),
                    )
                    .style(background),
                text_area,
            );
            // The bar is only drawn for fully visible cards.
            if skip == 0 && rect.width == RESUME_CARD_COLS {
                let bar = Rect::new(rect.x, rect.y + rect.height - 1, rect.width - 1, 1);
                draw_progress(frame, bar, card.progress);
            }
            self.cards.push((rect, i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_extent_counts_gaps_and_chrome() {
        let (content, viewport) = row_extent(3, 64);
        assert_eq!(content, 3.0 * 28.0 * 8.0);
        assert_eq!(viewport, 60.0 * 8.0);
        assert_eq!(row_extent(0, 2), (0.0, 0.0));
    }
}
