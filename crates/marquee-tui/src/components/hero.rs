//! Hero component: the featured title and its carousel rails.
//!
//! Wide terminals get the vertical rail on the right; narrow ones get the
//! horizontal rail under the details. The rails are drawn from the surface
//! entries and eased toward the controller's transform.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use marquee_core::carousel::{card_span, card_top, MOBILE_CARD_GAP, MOBILE_CARD_WIDTH};
use marquee_core::notice::UserAction;
use marquee_core::view::{Backdrop, Entry, Region, Slot, TextField, ViewItem};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{fit, skip_cells},
    layout::{
        clip_cols, clip_rows, hit, units_to_cols, units_to_rows, HORIZONTAL_RAIL_ROWS, RAIL_COLS,
    },
    theme::{
        style_default, style_muted, style_rating, style_secondary, style_tag, style_title,
        C_ACCENT, C_BACKDROP, C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_SELECTION_BG,
    },
    widgets::{
        animator::Animator,
        pane_chrome::{pane_chrome, Badge},
    },
};

pub struct Hero {
    vertical: Animator,
    horizontal: Animator,
    /// Card rects from the last draw, for click-to-select.
    cards: Vec<(Rect, usize)>,
    rail: Rect,
    buttons: Vec<(Rect, HeroButton)>,
}

#[derive(Debug, Clone, Copy)]
enum HeroButton {
    Play,
    Watchlist,
    Like,
}

impl HeroButton {
    const ALL: [HeroButton; 3] = [HeroButton::Play, HeroButton::Watchlist, HeroButton::Like];

    fn label(self) -> &'static str {
        match self {
            HeroButton::Play => " ▶ Play ",
            HeroButton::Watchlist => " ＋ Watchlist ",
            HeroButton::Like => " ♥ Like ",
        }
    }

    fn action(self, title: &str) -> Action {
        let title = title.to_string();
        Action::Invoke(match self {
            HeroButton::Play => UserAction::PlayMovie(title),
            HeroButton::Watchlist => UserAction::AddToWatchlist(title),
            HeroButton::Like => UserAction::Like(title),
        })
    }
}

impl Hero {
    pub fn new() -> Self {
        Self {
            vertical: Animator::default(),
            horizontal: Animator::default(),
            cards: Vec::new(),
            rail: Rect::default(),
            buttons: Vec::new(),
        }
    }

    fn title(state: &AppState) -> Option<&str> {
        let title = state.surface.text(TextField::HeroTitle);
        (!title.is_empty()).then_some(title)
    }

    fn draw_details(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let surface = &state.surface;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let mut lines = Vec::new();
        if let Some(bg) = surface.background(Backdrop::Hero) {
            lines.push(Line::from(Span::styled(
                format!("▣ {}", bg),
                Style::default().fg(C_BACKDROP),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            surface.text(TextField::HeroTitle).to_uppercase(),
            style_title(),
        )));
        lines.push(Line::from(vec![
            Span::styled(format!("★ {}", surface.text(TextField::HeroRating)), style_rating()),
            Span::styled("   ◷ ", style_muted()),
            Span::styled(surface.text(TextField::HeroDuration), style_secondary()),
        ]));
        let tags: Vec<Span> = surface
            .items(Slot::HeroGenres)
            .iter()
            .filter_map(|e| match &e.item {
                ViewItem::Tag(t) => Some(Span::styled(format!("[{}] ", t), style_tag())),
                _ => None,
            })
            .collect();
        if !tags.is_empty() {
            lines.push(Line::from(tags));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            surface.text(TextField::HeroDescription),
            style_default(),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Cast: ", style_muted()),
            Span::styled(surface.text(TextField::HeroCast), style_secondary()),
        ]));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[0]);

        // Buttons row.
        self.buttons.clear();
        let mut x = rows[1].x;
        for button in HeroButton::ALL {
            let label = button.label();
            let w = (label.width() as u16).min((rows[1].x + rows[1].width).saturating_sub(x));
            if w == 0 {
                break;
            }
            let rect = Rect::new(x, rows[1].y, w, 1);
            let style = match button {
                HeroButton::Play => Style::default()
                    .fg(C_PRIMARY)
                    .bg(C_ACCENT)
                    .add_modifier(Modifier::BOLD),
                _ => Style::default().fg(C_PRIMARY).bg(C_SELECTION_BG),
            };
            frame.render_widget(Paragraph::new(Span::styled(label, style)), rect);
            self.buttons.push((rect, button));
            x += w + 1;
        }
    }

    fn draw_vertical_rail(&mut self, frame: &mut Frame, area: Rect, entries: &[Entry]) {
        let active = entries.iter().position(|e| e.active).unwrap_or(0);
        let offset = self.vertical.offset();
        for (i, entry) in entries.iter().enumerate() {
            let ViewItem::RailCard { title, genre, .. } = &entry.item else {
                continue;
            };
            let top = area.y as i32 + units_to_rows(card_top(i, active) + offset);
            // One row of the span is the gap between cards.
            let height = units_to_rows(card_span(i, active)) - 1;
            let Some((rect, skip)) = clip_rows(area, top, height) else {
                continue;
            };
            let width = area.width.saturating_sub(2) as usize;
            let mut lines = vec![
                Line::from(Span::styled(
                    fit(title, width),
                    if entry.active { style_title() } else { style_secondary() },
                )),
                Line::from(Span::styled(fit(genre, width), style_muted())),
            ];
            if entry.active {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "▶ now showing",
                    Style::default().fg(C_ACCENT),
                )));
            }
            let border = if entry.active { C_ACCENT } else { C_PANEL_BORDER };
            frame.render_widget(
                Paragraph::new(lines)
                    .scroll((skip, 0))
                    .block(
                        Block::default()
                            .borders(Borders::LEFT)
                            .border_style(Style::default().fg(border)),
                    )
                    .style(if entry.active {
                        Style::default().bg(C_SELECTION_BG)
                    } else {
                        Style::default()
                    }),
                rect,
            );
            self.cards.push((rect, i));
        }
    }

    fn draw_horizontal_rail(&mut self, frame: &mut Frame, area: Rect, entries: &[Entry]) {
        let offset = self.horizontal.offset();
        let card_cols = units_to_cols(MOBILE_CARD_WIDTH);
        for (i, entry) in entries.iter().enumerate() {
            let ViewItem::RailCard { title, genre, .. } = &entry.item else {
                continue;
            };
            let left = area.x as i32
                + units_to_cols(offset + i as f32 * (MOBILE_CARD_WIDTH + MOBILE_CARD_GAP));
            let Some((rect, skip)) = clip_cols(area, left, card_cols) else {
                continue;
            };
            let skip = skip as usize;
            let width = card_cols as usize;
            let style = if entry.active {
                Style::default().fg(C_PRIMARY).bg(C_SELECTION_BG).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_MUTED)
            };
            let marker = if entry.active { "━" } else { "─" };
            let lines = vec![
                Line::from(Span::styled(
                    skip_cells(&marker.repeat(width), skip),
                    Style::default().fg(if entry.active { C_ACCENT } else { C_PANEL_BORDER }),
                )),
                Line::from(Span::styled(skip_cells(&fit(title, width), skip), style)),
                Line::from(Span::styled(skip_cells(&fit(genre, width), skip), style_muted())),
            ];
            frame.render_widget(Paragraph::new(lines), rect);
            self.cards.push((rect, i));
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Hero {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
                vec![Action::CarouselPrev]
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
                vec![Action::CarouselNext]
            }
            KeyCode::Enter => Self::title(state)
                .map(|t| vec![HeroButton::Play.action(t)])
                .unwrap_or_default(),
            KeyCode::Char('w') => Self::title(state)
                .map(|t| vec![HeroButton::Watchlist.action(t)])
                .unwrap_or_default(),
            KeyCode::Char('f') => Self::title(state)
                .map(|t| vec![HeroButton::Like.action(t)])
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::ScrollUp if hit(self.rail, col, row) => vec![Action::CarouselPrev],
            MouseEventKind::ScrollDown if hit(self.rail, col, row) => vec![Action::CarouselNext],
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((_, index)) = self.cards.iter().find(|(r, _)| hit(*r, col, row)) {
                    return vec![Action::CarouselSelect(*index)];
                }
                if let Some((_, button)) = self.buttons.iter().find(|(r, _)| hit(*r, col, row)) {
                    return Self::title(state)
                        .map(|t| vec![button.action(t)])
                        .unwrap_or_default();
                }
                vec![]
            }
            _ => vec![],
        }
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        self.vertical.retarget(state.surface.transform(Slot::VerticalRail));
        self.horizontal.retarget(state.surface.transform(Slot::HorizontalRail));
        self.vertical.step();
        self.horizontal.step();
        vec![]
    }

    fn is_animating(&self) -> bool {
        self.vertical.is_moving() || self.horizontal.is_moving()
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.cards.clear();
        self.rail = Rect::default();
        let surface = &state.surface;
        let vertical = surface.items(Slot::VerticalRail);
        let position = surface
            .active_index(Slot::VerticalRail)
            .map(|i| format!("{}/{}", i + 1, vertical.len()))
            .unwrap_or_default();
        let block = pane_chrome(
            "Featured",
            Some('1'),
            focused,
            (!position.is_empty()).then_some(Badge {
                text: &position,
                color: C_MUTED,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width < 10 || inner.height < 4 {
            return;
        }

        // Catch up with any transform set since the last tick before drawing.
        self.vertical.retarget(surface.transform(Slot::VerticalRail));
        self.horizontal.retarget(surface.transform(Slot::HorizontalRail));

        if surface.is_visible(Region::VerticalRail) {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(RAIL_COLS)])
                .split(inner);
            let details = Rect {
                width: cols[0].width.saturating_sub(2),
                ..cols[0]
            };
            self.draw_details(frame, details, state);
            self.rail = cols[1];
            self.draw_vertical_rail(frame, cols[1], vertical);
        } else if surface.is_visible(Region::HorizontalRail) {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(HORIZONTAL_RAIL_ROWS)])
                .split(inner);
            self.draw_details(frame, rows[0], state);
            let rail = Rect {
                y: rows[1].y + 1,
                height: rows[1].height.saturating_sub(1),
                ..rows[1]
            };
            self.rail = rail;
            self.draw_horizontal_rail(frame, rail, surface.items(Slot::HorizontalRail));
        } else {
            self.draw_details(frame, inner, state);
        }
    }
}
