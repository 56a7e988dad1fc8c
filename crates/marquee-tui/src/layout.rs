//! Mapping between layout units and terminal cells, and the page model.
//!
//! The page is a vertical stack of sections. Scrolling is section-granular:
//! `page_top` is the index of the first visible section, and the scroll
//! position reported to the chrome is the unit height of everything above it.

use ratatui::layout::Rect;

use marquee_core::carousel::Viewport;
use marquee_core::view::{Region, ShelfId, Slot, Surface};

use crate::action::ComponentId;

pub const UNITS_PER_ROW: f32 = 40.0;
pub const UNITS_PER_COL: f32 = 8.0;

pub const HERO_ROWS: u16 = 22;
/// Width of the vertical rail column inside the hero.
pub const RAIL_COLS: u16 = 30;
pub const HORIZONTAL_RAIL_ROWS: u16 = 4;
pub const SHELF_ROW_ROWS: u16 = 6;
pub const CONTINUE_ROWS: u16 = 8;
pub const SERIES_ROWS: u16 = 22;
pub const HEADER_ROWS: u16 = 2;
pub const HEADER_COMPACT_ROWS: u16 = 1;

pub fn rows_to_units(rows: u16) -> f32 {
    rows as f32 * UNITS_PER_ROW
}

pub fn cols_to_units(cols: u16) -> f32 {
    cols as f32 * UNITS_PER_COL
}

pub fn units_to_rows(units: f32) -> i32 {
    (units / UNITS_PER_ROW).round() as i32
}

pub fn units_to_cols(units: f32) -> i32 {
    (units / UNITS_PER_COL).round() as i32
}

/// Carousel viewport for a terminal of `cols` x `rows`.
pub fn viewport(cols: u16, _rows: u16) -> Viewport {
    // Inner hero height minus its borders.
    let rail_rows = HERO_ROWS.saturating_sub(2);
    Viewport {
        width: cols_to_units(cols),
        rail_height: rows_to_units(rail_rows),
        rail_width: cols_to_units(cols.saturating_sub(2)),
    }
}

pub fn is_narrow(cols: u16, breakpoint: f32) -> bool {
    cols_to_units(cols) <= breakpoint
}

/// Whether (col, row) falls inside `r`. Zero-sized rects never match.
pub fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0
        && r.height > 0
        && col >= r.x
        && col < r.x + r.width
        && row >= r.y
        && row < r.y + r.height
}

/// The part of a `height`-row band starting at `top` (possibly off-screen)
/// that lies within `area`, plus how many of its rows were cut off above.
pub fn clip_rows(area: Rect, top: i32, height: i32) -> Option<(Rect, u16)> {
    let area_top = area.y as i32;
    let area_bottom = area_top + area.height as i32;
    let y0 = top.max(area_top);
    let y1 = (top + height).min(area_bottom);
    if y1 <= y0 {
        return None;
    }
    Some((
        Rect::new(area.x, y0 as u16, area.width, (y1 - y0) as u16),
        (y0 - top) as u16,
    ))
}

/// Horizontal counterpart of [`clip_rows`].
pub fn clip_cols(area: Rect, left: i32, width: i32) -> Option<(Rect, u16)> {
    let area_left = area.x as i32;
    let area_right = area_left + area.width as i32;
    let x0 = left.max(area_left);
    let x1 = (left + width).min(area_right);
    if x1 <= x0 {
        return None;
    }
    Some((
        Rect::new(x0 as u16, area.y, (x1 - x0) as u16, area.height),
        (x0 - left) as u16,
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSection {
    Hero,
    Shelves,
    ContinueWatching,
    Series,
}

impl PageSection {
    pub const ALL: [PageSection; 4] = [
        PageSection::Hero,
        PageSection::Shelves,
        PageSection::ContinueWatching,
        PageSection::Series,
    ];

    pub fn component_id(self) -> ComponentId {
        match self {
            PageSection::Hero => ComponentId::Hero,
            PageSection::Shelves => ComponentId::Shelves,
            PageSection::ContinueWatching => ComponentId::ContinueRow,
            PageSection::Series => ComponentId::SeriesPanel,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageSection::Hero => "Featured",
            PageSection::Shelves => "Movies",
            PageSection::ContinueWatching => "Continue Watching",
            PageSection::Series => "Series",
        }
    }

    pub fn from_component(id: ComponentId) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.component_id() == id)
    }

    pub fn is_visible(self, surface: &Surface) -> bool {
        match self {
            PageSection::Hero => surface.is_visible(Region::Hero),
            PageSection::Shelves => !shelf_rows(surface).is_empty(),
            PageSection::ContinueWatching => surface.is_visible(Region::ContinueWatching),
            PageSection::Series => surface.is_visible(Region::SeriesSection),
        }
    }

    pub fn height(self, surface: &Surface) -> u16 {
        match self {
            PageSection::Hero => HERO_ROWS,
            PageSection::Shelves => 2 + shelf_rows(surface).len() as u16 * SHELF_ROW_ROWS,
            PageSection::ContinueWatching => CONTINUE_ROWS,
            PageSection::Series => SERIES_ROWS,
        }
    }
}

/// The trending shelf whose tab is active.
pub fn active_trending(surface: &Surface) -> ShelfId {
    surface
        .active_index(Slot::TrendingTabs)
        .and_then(|i| ShelfId::TRENDING.get(i).copied())
        .unwrap_or(ShelfId::TrendingToday)
}

/// Shelf rows drawn in the movies section: upcoming, top ten, then the
/// active trending shelf under its tabs. Hidden shelves are skipped.
pub fn shelf_rows(surface: &Surface) -> Vec<ShelfId> {
    [ShelfId::Upcoming, ShelfId::TopTen, active_trending(surface)]
        .into_iter()
        .filter(|&shelf| surface.is_visible(Region::Shelf(shelf)))
        .collect()
}

pub fn visible_sections(surface: &Surface) -> Vec<PageSection> {
    PageSection::ALL
        .into_iter()
        .filter(|s| s.is_visible(surface))
        .collect()
}

/// Scroll position, in layout units, when `page_top` is the first section shown.
pub fn scroll_position(sections: &[PageSection], page_top: usize, surface: &Surface) -> f32 {
    sections
        .iter()
        .take(page_top)
        .map(|s| rows_to_units(s.height(surface)))
        .sum()
}
