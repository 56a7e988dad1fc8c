//! Action enum: every user intent and internal event the App dispatches.

use marquee_core::notice::UserAction;
use marquee_core::view::ShelfId;

/// A page section that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Hero,
    Shelves,
    ContinueRow,
    SeriesPanel,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Carousel ─────────────────────────────────────────────────────────────
    CarouselNext,
    CarouselPrev,
    CarouselSelect(usize),

    // ── Shelves ──────────────────────────────────────────────────────────────
    TrendingSelect(ShelfId),
    /// Scroll the continue-watching row by this many layout units.
    ContinueScroll(f32),

    // ── Series ───────────────────────────────────────────────────────────────
    SeriesNext,
    SeriesPrev,
    SeasonSelect(u32),

    // ── Stubbed user actions (play, watchlist, like) ─────────────────────────
    Invoke(UserAction),

    // ── Search ───────────────────────────────────────────────────────────────
    SearchOpen,
    SearchChanged(String),
    SearchSelect(usize),
    /// Hide results, keep the query.
    SearchDismiss,
    /// Clear the query and deactivate the box.
    SearchClose,

    // ── Chrome ───────────────────────────────────────────────────────────────
    ToggleUserMenu,
    CloseUserMenu,
    ToggleNavDrawer,
    CloseNavDrawer,
    ScrollPage(i32),
    ScrollToTop,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
    Noop,
}
