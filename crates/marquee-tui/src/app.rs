//! App: the component-based event loop.
//!
//! Architecture:
//! - `App` owns every component, every core controller and `AppState`.
//! - A `tokio::mpsc` channel carries `AppMessage`s in from the terminal
//!   reader and the catalog loader task.
//! - The loop draws a frame only when something changed, then awaits the next message or tick.
//! - Components return `Vec<Action>`; the App applies each one to the controllers,
//!   which write into the retained surface the components draw from.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use marquee_core::carousel::CarouselController;
use marquee_core::catalog::RawCatalog;
use marquee_core::chrome::{NavDrawer as DrawerController, ScrollChrome, UserMenu};
use marquee_core::config::Config;
use marquee_core::loader::{CatalogClient, CatalogLoader, LoadOutcome};
use marquee_core::notice::{UserAction, INIT_FAILURE};
use marquee_core::search::SearchOverlay;
use marquee_core::sections::{ContinueRow as ResumeRowController, MovieShelves};
use marquee_core::series::SeriesBrowser;
use marquee_core::view::{Region, Slot};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        continue_row::{row_extent, ContinueRow},
        header::Header,
        help_overlay::HelpOverlay,
        hero::Hero,
        nav_drawer::NavDrawer,
        search_results::SearchResults,
        series_panel::SeriesPanel,
        shelves::Shelves,
    },
    focus::FocusRing,
    layout::{
        hit, is_narrow, scroll_position, viewport, visible_sections, PageSection,
        HEADER_COMPACT_ROWS, HEADER_ROWS,
    },
    theme::{style_muted, C_BG},
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    /// The loader task finished; the catalog may be the empty degraded one.
    CatalogLoaded(LoadOutcome),
}

const ANIM_FPS: u64 = 25;

/// Last-drawn rects of each section, for mouse hit-testing.
#[derive(Default, Clone)]
struct PaneAreas {
    header: Rect,
    hero: Rect,
    shelves: Rect,
    continue_row: Rect,
    series: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    state: AppState,

    // ── Controllers ───────────────────────────────────────────────────────────
    carousel: CarouselController,
    series: SeriesBrowser,
    search: SearchOverlay,
    movie_shelves: MovieShelves,
    resume_row: ResumeRowController,
    user_menu: UserMenu,
    drawer: DrawerController,
    scroll_chrome: ScrollChrome,

    // ── Components ────────────────────────────────────────────────────────────
    header: Header,
    hero: Hero,
    shelves: Shelves,
    continue_row: ContinueRow,
    series_panel: SeriesPanel,
    search_results: SearchResults,
    nav_drawer: NavDrawer,
    help_overlay: HelpOverlay,

    // ── UI state ──────────────────────────────────────────────────────────────
    focus: FocusRing,
    toast: ToastManager,
    pane_areas: PaneAreas,
    /// Index into the visible sections of the first one drawn.
    page_top: usize,
    show_keys_bar: bool,
    should_quit: bool,
    /// Terminal size in cells.
    screen: (u16, u16),
    loader: Option<CatalogLoader<CatalogClient>>,
}

impl App {
    /// `init_failed` raises the generic failure notice once the UI is up.
    pub fn new(
        config: &Config,
        loader: Option<CatalogLoader<CatalogClient>>,
        init_failed: bool,
    ) -> Self {
        let breakpoint = config.layout.breakpoint;
        let screen = (80, 24);
        let mut toast = ToastManager::new();
        if init_failed {
            toast.error(INIT_FAILURE);
        }
        Self {
            state: AppState::new(breakpoint),
            carousel: CarouselController::new(viewport(screen.0, screen.1), breakpoint),
            series: SeriesBrowser::new(),
            search: SearchOverlay::new(),
            movie_shelves: MovieShelves::new(),
            resume_row: ResumeRowController::new(),
            user_menu: UserMenu::new(),
            drawer: DrawerController::new(),
            scroll_chrome: ScrollChrome::new(
                config.layout.back_to_top_threshold,
                config.layout.header_shrink_threshold,
            ),
            header: Header::new(),
            hero: Hero::new(),
            shelves: Shelves::new(),
            continue_row: ContinueRow::new(),
            series_panel: SeriesPanel::new(),
            search_results: SearchResults::new(),
            nav_drawer: NavDrawer::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::default(),
            toast,
            pane_areas: PaneAreas::default(),
            page_top: 0,
            show_keys_bar: true,
            should_quit: false,
            screen,
            loader,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        let size = terminal.size()?;
        debug!("run(): terminal created, size={:?}", size);
        self.dispatch(Action::Resize(size.width, size.height));

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: catalog load ─────────────────────────────────────
        match self.loader.take() {
            Some(loader) => {
                self.toast.spinner("Loading catalog…");
                let load_tx = tx.clone();
                tokio::spawn(async move {
                    let outcome = loader.load_or_degrade().await;
                    let _ = load_tx.send(AppMessage::CatalogLoaded(outcome)).await;
                });
            }
            None => {
                // No client to load with; render the empty catalog straight away.
                self.on_catalog_loaded(LoadOutcome {
                    catalog: RawCatalog::empty(),
                    degraded: None,
                });
            }
        }

        // ── Periodic timers ───────────────────────────────────────────────────
        // Rail and row easing.
        let mut anim_tick = tokio::time::interval(Duration::from_millis(1000 / ANIM_FPS));
        anim_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Toast expiry + spinner animation.
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 64;
                    let mut redraw = self.handle_message(msg);
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else {
                            break;
                        };
                        drained += 1;
                        redraw |= self.handle_message(next);
                    }
                    needs_redraw = redraw;
                }

                _ = anim_tick.tick() => {
                    let was_animating = self.is_animating();
                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.hero.tick(s));
                        all.extend(self.continue_row.tick(s));
                        all
                    };
                    for action in tick_actions {
                        self.dispatch(action);
                    }
                    needs_redraw = was_animating || self.is_animating();
                }

                _ = toast_tick.tick() => {
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    needs_redraw = had_toasts;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("marquee exiting");

        Ok(())
    }

    fn is_animating(&self) -> bool {
        self.hero.is_animating() || self.continue_row.is_animating()
    }

    /// Returns true when the frame needs redrawing.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    let actions = self.handle_key(key);
                    for a in actions {
                        self.dispatch(a);
                    }
                    true
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    let changed = !actions.is_empty();
                    for a in actions {
                        self.dispatch(a);
                    }
                    changed
                }
                Event::Resize(w, h) => {
                    self.dispatch(Action::Resize(w, h));
                    true
                }
                _ => false,
            },
            AppMessage::CatalogLoaded(outcome) => {
                self.on_catalog_loaded(outcome);
                true
            }
        }
    }

    /// Populate state once and run every controller's initial render.
    fn on_catalog_loaded(&mut self, outcome: LoadOutcome) {
        if self.state.catalog.is_initialized {
            warn!("catalog already initialized, ignoring a second load");
            return;
        }
        if let Some(e) = &outcome.degraded {
            // No banner: every section hides itself.
            debug!("rendering the empty catalog after: {}", e);
        }
        let s = &mut self.state;
        s.catalog.populate(&outcome.catalog);
        self.carousel.initial_render(&s.catalog, &mut s.surface);
        self.movie_shelves.initial_render(&s.catalog, &mut s.surface);
        self.resume_row.initial_render(&s.catalog, &mut s.surface);
        self.series.initial_render(&mut s.catalog, &mut s.surface);
        s.catalog.is_initialized = true;
        s.loading = false;

        self.toast.dismiss_spinner();
        self.focus.set_items(
            visible_sections(&self.state.surface)
                .into_iter()
                .map(PageSection::component_id)
                .collect(),
        );
        self.page_top = 0;
        self.sync_scroll();
        info!("initial render complete");
    }

    // ── Keyboard handling ─────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            return vec![Action::ToggleHelp];
        }

        let s = &self.state;
        match s.input_mode {
            InputMode::Menu => return self.nav_drawer.handle_key(key, s),
            InputMode::Search => {
                return match key.code {
                    KeyCode::Up | KeyCode::Down | KeyCode::Enter => {
                        self.search_results.handle_key(key, s)
                    }
                    KeyCode::Tab => vec![Action::SearchDismiss, Action::FocusNext],
                    KeyCode::BackTab => vec![Action::SearchDismiss, Action::FocusPrev],
                    _ => self.header.handle_key(key, s),
                };
            }
            InputMode::Normal => {}
        }

        // Global keys (Normal mode)
        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            KeyCode::Char('/') => return vec![Action::SearchOpen],
            KeyCode::Char('u') => return vec![Action::ToggleUserMenu],
            KeyCode::Char('m') if is_narrow(self.screen.0, s.breakpoint) => {
                return vec![Action::ToggleNavDrawer]
            }
            KeyCode::Esc => {
                if s.is_visible(Region::UserMenu) {
                    return vec![Action::CloseUserMenu];
                }
                if s.is_visible(Region::SearchResults) {
                    return vec![Action::SearchDismiss];
                }
                return vec![];
            }
            KeyCode::PageUp => return vec![Action::ScrollPage(-1)],
            KeyCode::PageDown => return vec![Action::ScrollPage(1)],
            KeyCode::Char('t') => return vec![Action::ScrollToTop],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char(c @ '1'..='4') => {
                let n = c as usize - '1' as usize;
                let section = PageSection::ALL[n];
                if section.is_visible(&s.surface) {
                    return vec![Action::FocusPane(section.component_id())];
                }
                return vec![];
            }
            _ => {}
        }

        // Dispatch to the focused section
        match self.focus.current() {
            Some(ComponentId::Hero) => self.hero.handle_key(key, s),
            Some(ComponentId::Shelves) => self.shelves.handle_key(key, s),
            Some(ComponentId::ContinueRow) => self.continue_row.handle_key(key, s),
            Some(ComponentId::SeriesPanel) => self.series_panel.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let wheel = match event.kind {
            MouseEventKind::ScrollUp => Some(-1),
            MouseEventKind::ScrollDown => Some(1),
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => Some(0),
            MouseEventKind::Down(MouseButton::Left) => None,
            _ => return vec![],
        };
        let (col, row) = (event.column, event.row);
        let areas = self.pane_areas.clone();
        let s = &self.state;

        // Overlays first, front to back.
        if self.help_overlay.visible {
            return self.help_overlay.handle_mouse(event, Rect::default(), s);
        }
        if s.is_visible(Region::NavDrawer) {
            let drawer = self.nav_drawer.area();
            if hit(drawer, col, row) {
                return self.nav_drawer.handle_mouse(event, drawer, s);
            }
            // Anywhere else is the overlay.
            return match wheel {
                None => vec![Action::CloseNavDrawer],
                Some(_) => vec![],
            };
        }

        let mut dismiss = Vec::new();
        if wheel.is_none() {
            let (trigger, menu) = self.header.user_menu_areas();
            if s.is_visible(Region::UserMenu) && !hit(trigger, col, row) && !hit(menu, col, row) {
                dismiss.push(Action::CloseUserMenu);
            }
            let results = self.search_results.area();
            if s.is_visible(Region::SearchResults)
                && !hit(self.header.search_area(), col, row)
                && !hit(results, col, row)
            {
                dismiss.push(Action::SearchDismiss);
            }
        }

        let results = self.search_results.area();
        if hit(results, col, row) {
            let mut actions = self.search_results.handle_mouse(event, results, s);
            dismiss.append(&mut actions);
            return dismiss;
        }
        let (_, menu) = self.header.user_menu_areas();
        if hit(areas.header, col, row) || hit(menu, col, row) {
            let mut actions = self.header.handle_mouse(event, areas.header, s);
            dismiss.append(&mut actions);
            return dismiss;
        }

        // Sections: clicks focus the section, wheels the component
        // doesn't use scroll the page.
        macro_rules! click_pane {
            ($id:expr, $component:expr, $area:expr) => {{
                let mut actions = $component.handle_mouse(event, $area, s);
                match wheel {
                    Some(delta) => {
                        if actions.is_empty() && delta != 0 {
                            actions.push(Action::ScrollPage(delta));
                        }
                    }
                    None => {
                        if !self.focus.is_focused($id) {
                            actions.insert(0, Action::FocusPane($id));
                        }
                    }
                }
                dismiss.append(&mut actions);
                return dismiss;
            }};
        }

        if hit(areas.hero, col, row) {
            click_pane!(ComponentId::Hero, self.hero, areas.hero);
        }
        if hit(areas.shelves, col, row) {
            click_pane!(ComponentId::Shelves, self.shelves, areas.shelves);
        }
        if hit(areas.continue_row, col, row) {
            click_pane!(ComponentId::ContinueRow, self.continue_row, areas.continue_row);
        }
        if hit(areas.series, col, row) {
            click_pane!(ComponentId::SeriesPanel, self.series_panel, areas.series);
        }

        if let Some(delta) = wheel.filter(|&d| d != 0) {
            dismiss.push(Action::ScrollPage(delta));
        }
        dismiss
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Every component sees the action first (cursor resets, input state).
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.header.on_action(&action, s));
            out.extend(self.hero.on_action(&action, s));
            out.extend(self.shelves.on_action(&action, s));
            out.extend(self.continue_row.on_action(&action, s));
            out.extend(self.series_panel.on_action(&action, s));
            out.extend(self.search_results.on_action(&action, s));
            out.extend(self.nav_drawer.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Secondary actions are applied, not re-broadcast.
        for a in secondary {
            self.apply_action(a);
        }
        self.sync_input_mode();
    }

    fn apply_action(&mut self, action: Action) {
        if action != Action::Noop {
            debug!("apply_action: {:?}", action);
        }
        let s = &mut self.state;
        match action {
            // ── Carousel ──────────────────────────────────────────────────────
            Action::CarouselNext => self.carousel.next(&s.catalog, &mut s.surface),
            Action::CarouselPrev => self.carousel.previous(&s.catalog, &mut s.surface),
            Action::CarouselSelect(i) => self.carousel.select_index(i, &s.catalog, &mut s.surface),

            // ── Shelves ───────────────────────────────────────────────────────
            Action::TrendingSelect(shelf) => {
                self.movie_shelves.select_trending(shelf, &mut s.surface)
            }
            Action::ContinueScroll(delta) => {
                let cards = s.surface.items(Slot::ContinueRow).len();
                let (content, viewport) = row_extent(cards, self.screen.0.saturating_sub(2));
                self.resume_row.scroll_by(delta, content, viewport, &mut s.surface);
            }

            // ── Series ────────────────────────────────────────────────────────
            Action::SeriesNext => self.series.next(&mut s.catalog, &mut s.surface),
            Action::SeriesPrev => self.series.previous(&mut s.catalog, &mut s.surface),
            Action::SeasonSelect(season) => {
                self.series.select_season(season, &mut s.catalog, &mut s.surface)
            }

            Action::Invoke(user_action) => self.invoke(user_action),

            // ── Search ────────────────────────────────────────────────────────
            Action::SearchOpen => {
                self.search.activate(&mut s.surface);
                // Reopening with a kept query brings its results back.
                let query = self.header.query();
                if !query.is_empty() {
                    self.search.on_query_change(query, &s.catalog, &mut s.surface);
                }
            }
            Action::SearchChanged(query) => {
                self.search.on_query_change(&query, &s.catalog, &mut s.surface)
            }
            Action::SearchSelect(i) => {
                if let Some(user_action) = self.search.select(i, &mut s.surface) {
                    self.invoke(user_action);
                }
            }
            Action::SearchDismiss => self.search.dismiss(&mut s.surface),
            Action::SearchClose => self.search.close(&mut s.surface),

            // ── Chrome ────────────────────────────────────────────────────────
            Action::ToggleUserMenu => self.user_menu.toggle(&mut s.surface),
            Action::CloseUserMenu => self.user_menu.close(&mut s.surface),
            Action::ToggleNavDrawer => self.drawer.toggle(&mut s.surface),
            Action::CloseNavDrawer => self.drawer.close(&mut s.surface),
            Action::ScrollPage(delta) => self.scroll_page(delta),
            Action::ScrollToTop => {
                self.page_top = 0;
                self.scroll_chrome.scroll_to_top(&mut s.surface);
                if let Some(&first) = visible_sections(&s.surface).first() {
                    self.focus.set(first.component_id());
                }
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
                self.reveal_focused();
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.reveal_focused();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
                self.reveal_focused();
            }

            // ── Toggles ───────────────────────────────────────────────────────
            // HelpOverlay flips its own visibility in on_action.
            Action::ToggleHelp => {}
            Action::ToggleKeys => self.show_keys_bar = !self.show_keys_bar,

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Resize(w, h) => {
                self.screen = (w, h);
                self.carousel.resize(viewport(w, h), &mut s.surface);
                if !is_narrow(w, s.breakpoint) && self.drawer.is_open() {
                    self.drawer.close(&mut s.surface);
                }
                self.reveal_focused();
            }
            Action::Noop => {}
        }
    }

    fn invoke(&mut self, user_action: UserAction) {
        match user_action.notice(&self.state.catalog) {
            Some(notice) => {
                info!("{}", notice);
                match user_action {
                    UserAction::AddToWatchlist(_) | UserAction::Like(_) => {
                        self.toast.success(notice)
                    }
                    _ => self.toast.info(notice),
                }
            }
            None => warn!("{:?}: target not found", user_action),
        }
    }

    fn scroll_page(&mut self, delta: i32) {
        if self.state.is_visible(Region::ScrollLock) {
            debug!("page scroll locked while the drawer is open");
            return;
        }
        let sections = visible_sections(&self.state.surface);
        if sections.is_empty() {
            return;
        }
        let top = (self.page_top as i32 + delta).clamp(0, sections.len() as i32 - 1) as usize;
        self.page_top = top;
        self.focus.set(sections[top].component_id());
        self.sync_scroll();
    }

    /// Scroll just enough for the focused section to be fully drawn.
    fn reveal_focused(&mut self) {
        let Some(section) = self.focus.current().and_then(PageSection::from_component) else {
            return;
        };
        let sections = visible_sections(&self.state.surface);
        let Some(idx) = sections.iter().position(|&s| s == section) else {
            return;
        };
        if idx < self.page_top {
            self.page_top = idx;
        } else {
            let body = self.body_rows();
            while self.page_top < idx {
                let bottom: u16 = sections[self.page_top..=idx]
                    .iter()
                    .map(|s| s.height(&self.state.surface))
                    .sum();
                if bottom <= body {
                    break;
                }
                self.page_top += 1;
            }
        }
        self.sync_scroll();
    }

    /// Feed the page position to the back-to-top and header-shrink chrome.
    fn sync_scroll(&mut self) {
        let sections = visible_sections(&self.state.surface);
        self.page_top = self.page_top.min(sections.len().saturating_sub(1));
        let position = scroll_position(&sections, self.page_top, &self.state.surface);
        self.scroll_chrome.on_scroll(position, &mut self.state.surface);
    }

    fn header_rows(&self) -> u16 {
        if self.state.is_visible(Region::HeaderCompact) {
            HEADER_COMPACT_ROWS
        } else {
            HEADER_ROWS
        }
    }

    fn body_rows(&self) -> u16 {
        let status = u16::from(self.show_keys_bar);
        self.screen.1.saturating_sub(self.header_rows() + status)
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.drawer.is_open() {
            InputMode::Menu
        } else if self.header.is_typing() {
            InputMode::Search
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        // ── Outer layout: header | body | (statusbar) ────────────────────────
        let status_h = u16::from(self.show_keys_bar);
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.header_rows()),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);
        let (header_area, body_area, status_area) = (outer[0], outer[1], outer[2]);

        self.draw_body(frame, body_area);
        self.header.draw(frame, header_area, false, &self.state);
        self.pane_areas.header = header_area;

        if self.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                status_area,
                self.state.input_mode,
                self.state.is_visible(Region::BackToTop),
            );
        }

        // ── Overlays ─────────────────────────────────────────────────────────
        let results = SearchResults::popup_rect(self.header.search_area(), area, &self.state);
        self.search_results.draw(frame, results, false, &self.state);
        self.header.draw_user_menu(frame, area, &self.state);
        self.nav_drawer.draw(frame, body_area, false, &self.state);
        self.help_overlay.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }

    fn draw_body(&mut self, frame: &mut Frame, area: Rect) {
        self.pane_areas = PaneAreas {
            header: self.pane_areas.header,
            ..PaneAreas::default()
        };

        // An empty catalog leaves the body blank: every section hides itself.
        if self.state.loading {
            let y = area.y + area.height / 2;
            frame.render_widget(
                Paragraph::new(Span::styled("Loading catalog…", style_muted()))
                    .alignment(Alignment::Center),
                Rect::new(area.x, y, area.width, 1.min(area.height)),
            );
            return;
        }

        let bottom = area.y + area.height;
        let mut y = area.y;
        for section in visible_sections(&self.state.surface).into_iter().skip(self.page_top) {
            if y >= bottom {
                break;
            }
            let h = section.height(&self.state.surface).min(bottom - y);
            let rect = Rect::new(area.x, y, area.width, h);
            let focused = self.focus.is_focused(section.component_id());
            let s = &self.state;
            match section {
                PageSection::Hero => {
                    self.hero.draw(frame, rect, focused, s);
                    self.pane_areas.hero = rect;
                }
                PageSection::Shelves => {
                    self.shelves.draw(frame, rect, focused, s);
                    self.pane_areas.shelves = rect;
                }
                PageSection::ContinueWatching => {
                    self.continue_row.draw(frame, rect, focused, s);
                    self.pane_areas.continue_row = rect;
                }
                PageSection::Series => {
                    self.series_panel.draw(frame, rect, focused, s);
                    self.pane_areas.series = rect;
                }
            }
            y += h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::toast::Severity;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_message(AppMessage::Event(Event::Key(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        ))));
    }

    fn loaded_app() -> App {
        let mut app = App::new(&Config::default(), None, false);
        app.on_catalog_loaded(LoadOutcome {
            catalog: RawCatalog::from_values(
                json!([{"title": "Dune"}, {"title": "Arrival"}, {"title": "Heat"}]),
                json!([{"title": "Up", "category": "upcoming"}]),
                json!([{"title": "Dark", "seasons": 1}]),
                json!([]),
            ),
            degraded: None,
        });
        app
    }

    #[test]
    fn load_focuses_the_first_section() {
        let app = loaded_app();
        assert!(app.state.catalog.is_initialized);
        assert!(!app.state.loading);
        assert_eq!(app.focus.current(), Some(ComponentId::Hero));
        assert!(!app.state.is_visible(Region::ContinueWatching));
    }

    #[test]
    fn arrow_keys_drive_the_focused_carousel() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.state.surface.active_index(Slot::VerticalRail), Some(1));
        assert_eq!(app.state.surface.active_index(Slot::HorizontalRail), Some(1));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.state.surface.active_index(Slot::VerticalRail), Some(2));
    }

    #[test]
    fn h_and_l_step_the_carousel_and_f_likes() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.state.surface.active_index(Slot::VerticalRail), Some(1));
        assert!(app.toast.is_empty());
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.state.surface.active_index(Slot::VerticalRail), Some(0));

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.toast.latest(), Some(("Liked \"Dune\"", Severity::Success)));
    }

    #[test]
    fn typing_a_query_and_picking_a_result_plays_it() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state.input_mode, InputMode::Search);
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.state.is_visible(Region::SearchResults));
        press(&mut app, KeyCode::Char('u'));
        assert!(app.state.is_visible(Region::SearchResults));

        press(&mut app, KeyCode::Enter);
        assert!(app.toast.messages().any(|m| m == "Playing: Dune"));
        assert!(!app.state.is_visible(Region::SearchBox));
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }

    #[test]
    fn open_drawer_locks_page_scrolling() {
        let mut app = loaded_app();
        app.dispatch(Action::Resize(60, 40));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.state.input_mode, InputMode::Menu);

        app.dispatch(Action::ScrollPage(1));
        assert_eq!(app.page_top, 0);

        press(&mut app, KeyCode::Esc);
        app.dispatch(Action::ScrollPage(1));
        assert_eq!(app.page_top, 1);
        assert!(app.state.is_visible(Region::HeaderCompact));
        assert!(app.state.is_visible(Region::BackToTop));

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.page_top, 0);
        assert!(!app.state.is_visible(Region::BackToTop));
    }

    #[test]
    fn playback_notices_are_info_and_confirmations_success() {
        let mut app = loaded_app();
        app.dispatch(Action::Invoke(UserAction::PlayMovie("Up".into())));
        assert_eq!(app.toast.latest(), Some(("Now playing: Up", Severity::Info)));

        app.dispatch(Action::Invoke(UserAction::Like("Up".into())));
        assert_eq!(app.toast.latest(), Some(("Liked \"Up\"", Severity::Success)));
    }

    #[test]
    fn failed_load_renders_nothing_and_raises_no_banner() {
        let mut app = App::new(&Config::default(), None, false);
        app.on_catalog_loaded(LoadOutcome {
            catalog: RawCatalog::empty(),
            degraded: None,
        });
        assert!(app.focus.current().is_none());
        assert!(app.toast.is_empty());

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buf = terminal.backend().buffer();
        let body = HEADER_ROWS..23;
        for y in body {
            let row: String = (0..80u16).map(|x| buf[(x, y)].symbol()).collect();
            assert!(row.trim().is_empty(), "row {} drew {:?}", y, row.trim());
        }
    }

    #[test]
    fn every_section_draws_once_the_catalog_loads() {
        let mut app = App::new(&Config::default(), None, false);
        app.on_catalog_loaded(LoadOutcome {
            catalog: RawCatalog::from_values(
                json!([{"title": "Dune"}, {"title": "Arrival"}]),
                json!([{"title": "Up", "category": "upcoming", "quality": "4K"}]),
                json!([{
                    "title": "Dark",
                    "seasons": 2,
                    "seasonsData": {"1": [{"title": "Pilot", "episode": 1}]}
                }]),
                json!([{"title": "Tenet"}]),
            ),
            degraded: None,
        });

        let mut terminal = Terminal::new(TestBackend::new(120, 200)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buf = terminal.backend().buffer();
        let screen: String = (0..200u16)
            .map(|y| (0..120u16).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        for expected in ["Dune", "[4K]", "Tenet", "DARK", "Pilot"] {
            assert!(screen.contains(expected), "{} missing from the page", expected);
        }
    }

    #[test]
    fn setup_failure_shows_the_generic_notice() {
        let app = App::new(&Config::default(), None, true);
        assert!(app.toast.messages().any(|m| m == INIT_FAILURE));
    }
}
