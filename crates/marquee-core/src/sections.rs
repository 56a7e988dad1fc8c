//! Movie shelves, trending tabs and the continue-watching row.

use tracing::debug;

use crate::catalog::{Movie, MovieCategory};
use crate::state::ApplicationState;
use crate::view::{Region, RenderTarget, ShelfId, Slot, Transition, ViewItem};

pub const CONTINUE_SCROLL_STEP: f32 = 300.0;

pub fn shelf_category(shelf: ShelfId) -> MovieCategory {
    match shelf {
        ShelfId::Upcoming => MovieCategory::Upcoming,
        ShelfId::TopTen => MovieCategory::TopTen,
        ShelfId::TrendingToday | ShelfId::TrendingWeek | ShelfId::TrendingMonth => {
            MovieCategory::Trending
        }
    }
}

pub fn shelf_movies(state: &ApplicationState, shelf: ShelfId) -> Vec<&Movie> {
    let category = shelf_category(shelf);
    state
        .movies
        .iter()
        .filter(|m| m.category == Some(category))
        .collect()
}

pub struct MovieShelves {
    trending: ShelfId,
}

impl Default for MovieShelves {
    fn default() -> Self {
        Self {
            trending: ShelfId::TrendingToday,
        }
    }
}

impl MovieShelves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_trending(&self) -> ShelfId {
        self.trending
    }

    /// Fill every shelf; shelves with no movies are hidden.
    pub fn initial_render(&mut self, state: &ApplicationState, target: &mut impl RenderTarget) {
        for shelf in ShelfId::ALL {
            target.clear(Slot::Shelf(shelf));
            let movies = shelf_movies(state, shelf);
            if movies.is_empty() {
                target.set_visible(Region::Shelf(shelf), false);
                continue;
            }
            target.set_visible(Region::Shelf(shelf), true);
            for movie in movies {
                target.append_item(
                    Slot::Shelf(shelf),
                    ViewItem::MovieCard {
                        title: movie.title.clone(),
                        duration: movie.duration.clone(),
                        quality: movie.quality.clone(),
                        image: movie.image.clone(),
                    },
                );
            }
        }

        target.clear(Slot::TrendingTabs);
        for shelf in ShelfId::TRENDING {
            target.append_item(Slot::TrendingTabs, ViewItem::Tag(shelf.title().to_string()));
        }
        self.select_trending(self.trending, target);
    }

    pub fn select_trending(&mut self, shelf: ShelfId, target: &mut impl RenderTarget) {
        if !shelf.is_trending() {
            return;
        }
        self.trending = shelf;
        for (i, tab) in ShelfId::TRENDING.iter().enumerate() {
            target.toggle_active(Slot::TrendingTabs, i, *tab == shelf);
        }
    }
}

/// Horizontal row of partially watched titles.
#[derive(Debug, Default)]
pub struct ContinueRow {
    enabled: bool,
    scroll: f32,
}

impl ContinueRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn initial_render(&mut self, state: &ApplicationState, target: &mut impl RenderTarget) {
        target.clear(Slot::ContinueRow);
        self.scroll = 0.0;
        if state.continue_watching.is_empty() {
            debug!("continue watching: no data, hiding section");
            self.enabled = false;
            target.set_visible(Region::ContinueWatching, false);
            return;
        }
        self.enabled = true;
        target.set_visible(Region::ContinueWatching, true);
        for entry in &state.continue_watching {
            target.append_item(
                Slot::ContinueRow,
                ViewItem::ResumeCard {
                    title: entry.title.clone(),
                    date: entry.date.clone(),
                    rating: entry.rating_label(),
                    progress: entry.progress,
                    image: entry.image.clone(),
                },
            );
        }
        target.set_transform(Slot::ContinueRow, 0.0, Transition::None);
    }

    /// Scroll by `delta` units, clamped to the overflow of the row.
    pub fn scroll_by(
        &mut self,
        delta: f32,
        content_width: f32,
        viewport_width: f32,
        target: &mut impl RenderTarget,
    ) {
        if !self.enabled {
            return;
        }
        let max = (content_width - viewport_width).max(0.0);
        self.scroll = (self.scroll + delta).clamp(0.0, max);
        target.set_transform(Slot::ContinueRow, -self.scroll, Transition::Eased);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use crate::view::Surface;
    use serde_json::{json, Value};

    fn state(movies: Value, continue_watching: Value) -> ApplicationState {
        let mut state = ApplicationState::new();
        state.populate(&RawCatalog::from_values(
            json!([]),
            movies,
            json!([]),
            continue_watching,
        ));
        state
    }

    #[test]
    fn uncategorized_movies_render_nowhere() {
        let state = state(
            json!([
                {"title": "Soon", "category": "upcoming"},
                {"title": "Hot", "category": "trending"},
                {"title": "Lost", "category": "documentary"},
                {"title": "Nothing"},
            ]),
            json!([]),
        );
        let mut surface = Surface::new();
        MovieShelves::new().initial_render(&state, &mut surface);

        let rendered: Vec<_> = ShelfId::ALL
            .iter()
            .flat_map(|s| surface.items(Slot::Shelf(*s)).iter())
            .filter_map(|e| match &e.item {
                ViewItem::MovieCard { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect();
        assert!(!rendered.contains(&"Lost".to_string()));
        assert!(!rendered.contains(&"Nothing".to_string()));
        assert_eq!(surface.items(Slot::Shelf(ShelfId::Upcoming)).len(), 1);
        // The three trending shelves all carry the trending bucket.
        for shelf in ShelfId::TRENDING {
            assert_eq!(surface.items(Slot::Shelf(shelf)).len(), 1);
        }
        assert!(!surface.is_visible(Region::Shelf(ShelfId::TopTen)));
    }

    #[test]
    fn trending_tabs_switch_active_content() {
        let state = state(json!([{"title": "Hot", "category": "trending"}]), json!([]));
        let mut surface = Surface::new();
        let mut shelves = MovieShelves::new();
        shelves.initial_render(&state, &mut surface);
        assert_eq!(surface.active_indices(Slot::TrendingTabs), vec![0]);

        shelves.select_trending(ShelfId::TrendingMonth, &mut surface);
        assert_eq!(shelves.active_trending(), ShelfId::TrendingMonth);
        assert_eq!(surface.active_indices(Slot::TrendingTabs), vec![2]);

        shelves.select_trending(ShelfId::Upcoming, &mut surface);
        assert_eq!(shelves.active_trending(), ShelfId::TrendingMonth);
    }

    #[test]
    fn empty_continue_row_is_hidden() {
        let state = state(json!([]), json!({"not": "a list"}));
        let mut surface = Surface::new();
        let mut row = ContinueRow::new();
        row.initial_render(&state, &mut surface);
        assert!(!surface.is_visible(Region::ContinueWatching));
        row.scroll_by(300.0, 2000.0, 500.0, &mut surface);
        assert_eq!(row.scroll(), 0.0);
    }

    #[test]
    fn continue_row_scroll_is_clamped() {
        let state = state(
            json!([]),
            json!([{"title": "Halfway", "progress": 50, "rating": "8.1"}]),
        );
        let mut surface = Surface::new();
        let mut row = ContinueRow::new();
        row.initial_render(&state, &mut surface);
        match &surface.items(Slot::ContinueRow)[0].item {
            ViewItem::ResumeCard { rating, progress, date, .. } => {
                assert_eq!(rating, "★ 8.1");
                assert_eq!(*progress, 50.0);
                assert_eq!(date, "N/A");
            }
            other => panic!("unexpected {:?}", other),
        }

        row.scroll_by(CONTINUE_SCROLL_STEP, 1000.0, 500.0, &mut surface);
        row.scroll_by(CONTINUE_SCROLL_STEP, 1000.0, 500.0, &mut surface);
        assert_eq!(row.scroll(), 500.0);
        assert_eq!(surface.transform(Slot::ContinueRow).map(|t| t.offset), Some(-500.0));
        row.scroll_by(-CONTINUE_SCROLL_STEP * 3.0, 1000.0, 500.0, &mut surface);
        assert_eq!(row.scroll(), 0.0);
    }
}
