//! SeriesPanel component: series details, season tabs and episodes.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use marquee_core::notice::UserAction;
use marquee_core::view::{Backdrop, Slot, TextField, ViewItem};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::fit,
    layout::hit,
    theme::{
        style_active_tab, style_default, style_muted, style_rating, style_secondary,
        style_selected_focused, style_tag, style_title, C_BACKDROP, C_MUTED,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

const DETAIL_ROWS: u16 = 9;

pub struct SeriesPanel {
    /// Selected episode in the current list.
    cursor: usize,
    /// First drawn episode.
    scroll: usize,
    tabs: Vec<(Rect, u32)>,
    episodes: Vec<(Rect, usize)>,
    prev: Rect,
    next: Rect,
}

impl SeriesPanel {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            scroll: 0,
            tabs: Vec::new(),
            episodes: Vec::new(),
            prev: Rect::default(),
            next: Rect::default(),
        }
    }

    fn season_count(state: &AppState) -> u32 {
        state.surface.items(Slot::SeasonTabs).len() as u32
    }

    fn episode_action(&self, state: &AppState) -> Vec<Action> {
        match state.surface.items(Slot::EpisodeList).get(self.cursor).map(|e| &e.item) {
            Some(ViewItem::Episode {
                series_index,
                season,
                number,
                ..
            }) => vec![Action::Invoke(UserAction::PlayEpisode {
                series_index: *series_index,
                season: *season,
                episode: *number,
            })],
            _ => vec![],
        }
    }

    fn draw_details(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let s = &state.surface;
        let mut lines = Vec::new();
        if let Some(bg) = s.background(Backdrop::Series) {
            lines.push(Line::from(Span::styled(
                format!("▣ {}", bg),
                Style::default().fg(C_BACKDROP),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled(format!("#{}  ", s.text(TextField::SeriesNumber)), style_muted()),
            Span::styled(s.text(TextField::SeriesRank), style_secondary()),
        ]));
        lines.push(Line::from(Span::styled(
            s.text(TextField::SeriesTitle).to_uppercase(),
            style_title(),
        )));
        lines.push(Line::from(vec![
            Span::styled(format!("★ {}", s.text(TextField::SeriesRating)), style_rating()),
            Span::styled(format!("   {}", s.text(TextField::SeriesYear)), style_secondary()),
            Span::styled(format!("   {}", s.text(TextField::SeriesSeasons)), style_secondary()),
            Span::styled(format!("   {}", s.text(TextField::SeriesEpisodes)), style_secondary()),
        ]));
        let tags: Vec<Span> = s
            .items(Slot::SeriesGenres)
            .iter()
            .filter_map(|e| match &e.item {
                ViewItem::Tag(t) => Some(Span::styled(format!("[{}] ", t), style_tag())),
                _ => None,
            })
            .collect();
        if !tags.is_empty() {
            lines.push(Line::from(tags));
        }
        lines.push(Line::from(Span::styled(s.text(TextField::SeriesDescription), style_default())));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);

        // Series arrows sit at the right of the title row.
        let y = area.y + u16::from(s.background(Backdrop::Series).is_some());
        let right = area.x + area.width;
        self.prev = Rect::new(right.saturating_sub(6), y, 3, 1);
        self.next = Rect::new(right.saturating_sub(3), y, 3, 1);
        frame.render_widget(Paragraph::new(Span::styled(" ‹ ", style_secondary())), self.prev);
        frame.render_widget(Paragraph::new(Span::styled(" › ", style_secondary())), self.next);
    }

    fn draw_tabs(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![Span::styled(
            format!("{}  ", state.surface.text(TextField::SeasonsCount)),
            style_muted(),
        )];
        let mut x = area.x + spans[0].width() as u16;
        for entry in state.surface.items(Slot::SeasonTabs) {
            let ViewItem::SeasonTab { season } = entry.item else {
                continue;
            };
            let label = format!(" Season {} ", season);
            let w = label.width() as u16;
            if x + w > area.x + area.width {
                break;
            }
            self.tabs.push((Rect::new(x, area.y, w, 1), season));
            let style = if entry.active {
                style_active_tab()
            } else {
                style_secondary()
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x += w + 1;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_episodes(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let entries = state.surface.items(Slot::EpisodeList);
        self.cursor = self.cursor.min(entries.len().saturating_sub(1));
        let visible = area.height as usize;
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if visible > 0 && self.cursor >= self.scroll + visible {
            self.scroll = self.cursor + 1 - visible;
        }

        let width = area.width as usize;
        let mut lines = Vec::new();
        for (i, entry) in entries.iter().enumerate().skip(self.scroll).take(visible) {
            let row = area.y + (i - self.scroll) as u16;
            match &entry.item {
                ViewItem::Episode {
                    number,
                    title,
                    duration,
                    ..
                } => {
                    let selected = focused && i == self.cursor;
                    let marker = if selected { "▶" } else { " " };
                    let text = format!("{} {:>2}. {}", marker, number, title);
                    let tail = format!("  {}", duration);
                    let text = fit(&text, width.saturating_sub(tail.width()));
                    let pad = width.saturating_sub(text.width() + tail.width());
                    let style = if selected { style_selected_focused() } else { style_default() };
                    lines.push(Line::from(vec![
                        Span::styled(text, style),
                        Span::styled(" ".repeat(pad), style),
                        Span::styled(tail, if selected { style } else { style_muted() }),
                    ]));
                    self.episodes.push((Rect::new(area.x, row, area.width, 1), i));
                }
                ViewItem::Placeholder(message) => {
                    lines.push(Line::from(Span::styled(message.clone(), style_muted())));
                }
                _ => {}
            }
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Default for SeriesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SeriesPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let season = state.catalog.current_season;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => vec![Action::SeriesPrev],
            KeyCode::Right | KeyCode::Char('l') => vec![Action::SeriesNext],
            KeyCode::Char('[') if season > 1 => vec![Action::SeasonSelect(season - 1)],
            KeyCode::Char(']') if season < Self::season_count(state) => {
                vec![Action::SeasonSelect(season + 1)]
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = state.surface.items(Slot::EpisodeList).len();
                self.cursor = (self.cursor + 1).min(len.saturating_sub(1));
                vec![]
            }
            KeyCode::Enter => self.episode_action(state),
            KeyCode::Char('p') if !state.catalog.series.is_empty() => {
                vec![Action::Invoke(UserAction::PlaySeries(state.catalog.current_series_index))]
            }
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        if hit(self.prev, col, row) {
            return vec![Action::SeriesPrev];
        }
        if hit(self.next, col, row) {
            return vec![Action::SeriesNext];
        }
        if let Some(&(_, season)) = self.tabs.iter().find(|(r, _)| hit(*r, col, row)) {
            return vec![Action::SeasonSelect(season)];
        }
        if let Some(&(_, index)) = self.episodes.iter().find(|(r, _)| hit(*r, col, row)) {
            self.cursor = index;
            return self.episode_action(state);
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if matches!(action, Action::SeriesNext | Action::SeriesPrev | Action::SeasonSelect(_)) {
            self.cursor = 0;
            self.scroll = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.tabs.clear();
        self.episodes.clear();
        let position = if state.catalog.series.is_empty() {
            String::new()
        } else {
            format!("{}/{}", state.catalog.current_series_index + 1, state.catalog.series.len())
        };
        let block = pane_chrome(
            "Series",
            Some('4'),
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
        let inner = Rect {
            x: inner.x + 1,
            width: inner.width - 2,
            ..inner
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(DETAIL_ROWS.min(inner.height.saturating_sub(3))),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);
        self.draw_details(frame, rows[0], state);
        self.draw_tabs(frame, rows[1], state);
        self.draw_episodes(frame, rows[3], focused, state);
    }
}
