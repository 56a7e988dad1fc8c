//! Header component: brand, nav links, search box, account menu trigger
//! and the hamburger for narrow terminals.
//!
//! Two rows normally, one row once the page has scrolled (compact header).
//! Not focusable; keyboard input reaches it only in search mode.

use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
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
    layout::{hit, is_narrow},
    theme::{style_muted, style_secondary, C_ACCENT, C_OVERLAY_BG, C_PANEL_BORDER, C_PRIMARY},
    widgets::filter_input::{InputAction, SearchInput},
};

const NAV_LINKS: [&str; 4] = ["Home", "Movies", "Series", "My List"];
pub const USER_MENU_ENTRIES: [&str; 4] = ["Profile", "Watchlist", "Settings", "Sign out"];
const SEARCH_BOX_COLS: u16 = 36;

#[derive(Default)]
struct HeaderAreas {
    hamburger: Rect,
    search_icon: Rect,
    search_box: Rect,
    search_close: Rect,
    user_icon: Rect,
    user_menu: Rect,
}

pub struct Header {
    search: SearchInput,
    areas: HeaderAreas,
}

impl Header {
    pub fn new() -> Self {
        Self {
            search: SearchInput::default(),
            areas: HeaderAreas::default(),
        }
    }

    pub fn query(&self) -> &str {
        self.search.text()
    }

    /// Keystrokes go to the search box.
    pub fn is_typing(&self) -> bool {
        self.search.is_active()
    }

    /// Search box plus its close control; clicks here never dismiss results.
    pub fn search_area(&self) -> Rect {
        self.areas.search_box.union(self.areas.search_close)
    }

    /// Trigger and open dropdown; clicks elsewhere close the menu.
    pub fn user_menu_areas(&self) -> (Rect, Rect) {
        (self.areas.user_icon, self.areas.user_menu)
    }

    /// Dropdown under the account icon. Drawn after the page body so it
    /// sits on top.
    pub fn draw_user_menu(&mut self, frame: &mut Frame, screen: Rect, state: &AppState) {
        if !state.is_visible(Region::UserMenu) || self.areas.user_icon.width == 0 {
            self.areas.user_menu = Rect::default();
            return;
        }
        let width = 16u16.min(screen.width);
        let height = (USER_MENU_ENTRIES.len() as u16 + 2).min(screen.height);
        let right = self.areas.user_icon.x + self.areas.user_icon.width;
        let popup = Rect {
            x: right.saturating_sub(width),
            y: self.areas.user_icon.y + 1,
            width,
            height,
        };
        let lines: Vec<Line> = USER_MENU_ENTRIES
            .iter()
            .map(|entry| Line::from(Span::styled(format!(" {}", entry), style_secondary())))
            .collect();
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER))
                    .style(Style::default().bg(C_OVERLAY_BG)),
            ),
            popup,
        );
        self.areas.user_menu = popup;
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match self.search.handle_key(key) {
            InputAction::Changed(q) => vec![Action::SearchChanged(q)],
            InputAction::Cancelled => vec![Action::SearchDismiss],
            InputAction::Cleared => vec![Action::SearchClose],
            InputAction::Confirmed | InputAction::None => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        let a = &self.areas;
        if hit(a.search_close, col, row) {
            return vec![Action::SearchClose];
        }
        if hit(a.search_box, col, row) || hit(a.search_icon, col, row) {
            return vec![Action::SearchOpen];
        }
        if hit(a.user_icon, col, row) {
            return vec![Action::ToggleUserMenu];
        }
        if hit(a.user_menu, col, row) {
            // Account pages are out of scope; choosing an entry just closes the menu.
            return vec![Action::CloseUserMenu];
        }
        // Only set while the terminal is narrow enough to show it.
        if hit(a.hamburger, col, row) {
            return vec![Action::ToggleNavDrawer];
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::SearchOpen => self.search.activate(),
            Action::SearchDismiss => self.search.deactivate(),
            Action::SearchClose | Action::SearchSelect(_) => {
                self.search.clear();
                self.search.deactivate();
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        self.areas = HeaderAreas::default();
        if area.height == 0 || area.width < 20 {
            return;
        }
        frame.render_widget(Clear, area);
        let narrow = is_narrow(area.width, state.breakpoint);
        let row = Rect { height: 1, ..area };

        // Right side first: account icon, then the search box or its icon.
        let user_icon = Rect::new(area.x + area.width - 4, area.y, 3, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(" ◉ ", Style::default().fg(C_PRIMARY))),
            user_icon,
        );
        self.areas.user_icon = user_icon;

        let search_right = user_icon.x.saturating_sub(1);
        if state.is_visible(Region::SearchBox) {
            let width = SEARCH_BOX_COLS.min(area.width / 2);
            let box_area = Rect::new(search_right.saturating_sub(width + 2), area.y, width, 1);
            self.search.draw(frame, box_area);
            let close = Rect::new(box_area.x + box_area.width, area.y, 2, 1);
            frame.render_widget(Paragraph::new(Span::styled(" ✕", style_secondary())), close);
            self.areas.search_box = box_area;
            self.areas.search_close = close;
        } else {
            let icon = Rect::new(search_right.saturating_sub(3), area.y, 3, 1);
            frame.render_widget(Paragraph::new(Span::styled(" ⌕ ", style_secondary())), icon);
            self.areas.search_icon = icon;
        }

        // Left side: hamburger (narrow only), brand, nav links (wide only).
        let mut spans = Vec::new();
        if narrow {
            spans.push(Span::styled(" ☰ ", Style::default().fg(C_PRIMARY)));
            self.areas.hamburger = Rect::new(area.x, area.y, 3, 1);
        }
        spans.push(Span::styled(
            " MARQUEE ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ));
        if !narrow {
            for link in NAV_LINKS {
                spans.push(Span::styled(format!("  {}", link), style_secondary()));
            }
        }
        let left_width = self
            .areas
            .search_box
            .x
            .max(self.areas.search_icon.x)
            .saturating_sub(area.x);
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect {
                width: left_width,
                ..row
            },
        );

        if area.height >= 2 && !state.is_visible(Region::HeaderCompact) {
            let tagline = if state.loading {
                "Loading catalog…".to_string()
            } else {
                format!(
                    "{} featured · {} movies · {} series · {} in progress",
                    state.catalog.carousel.len(),
                    state.catalog.movies.len(),
                    state.catalog.series.len(),
                    state.catalog.continue_watching.len()
                )
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}", tagline), style_muted())),
                Rect::new(area.x, area.y + 1, area.width, 1),
            );
        }
    }
}
