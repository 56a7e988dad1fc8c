//! Search-as-you-type over carousel, movies and series.

use tracing::debug;

use crate::catalog::SearchEntry;
use crate::notice::UserAction;
use crate::state::ApplicationState;
use crate::view::{Region, RenderTarget, Slot, TextField, ViewItem};

pub const MIN_QUERY_CHARS: usize = 2;
pub const MAX_RESULTS: usize = 10;

/// Trimmed, lowercased form of a raw query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Every entry whose title contains `query`, in index order.
pub fn find_matches<'a>(index: &'a [SearchEntry], query: &str) -> Vec<&'a SearchEntry> {
    index
        .iter()
        .filter(|entry| entry.title_lower.contains(query))
        .collect()
}

pub fn empty_results_message(query: &str) -> String {
    format!("No results found for \"{}\"", query)
}

#[derive(Debug, Default)]
pub struct SearchOverlay {
    query: String,
    box_active: bool,
    results_visible: bool,
    /// Titles of the rendered hits, by position.
    hits: Vec<String>,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_active(&self) -> bool {
        self.box_active
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    pub fn hits(&self) -> &[String] {
        &self.hits
    }

    pub fn activate(&mut self, target: &mut impl RenderTarget) {
        if !self.box_active {
            self.box_active = true;
            target.set_visible(Region::SearchBox, true);
        }
    }

    pub fn on_query_change(
        &mut self,
        raw: &str,
        state: &ApplicationState,
        target: &mut impl RenderTarget,
    ) {
        self.query = raw.to_string();
        let query = normalize_query(raw);

        if query.chars().count() < MIN_QUERY_CHARS {
            self.hide_results(target);
            self.clear_results(target);
            return;
        }

        let matches = find_matches(state.search_index(), &query);
        debug!("search: {:?} -> {} matches", query, matches.len());
        self.clear_results(target);

        if matches.is_empty() {
            target.append_item(
                Slot::SearchResults,
                ViewItem::Placeholder(empty_results_message(&query)),
            );
        } else {
            target.set_text(
                TextField::SearchHeading,
                &format!("Search Results ({})", matches.len()),
            );
            for entry in matches.iter().take(MAX_RESULTS) {
                self.hits.push(entry.title.clone());
                target.append_item(
                    Slot::SearchResults,
                    ViewItem::SearchHit {
                        title: entry.title.clone(),
                        meta: entry.meta_line(),
                        image: entry.image.clone(),
                    },
                );
            }
        }
        self.results_visible = true;
        target.set_visible(Region::SearchResults, true);
    }

    /// Choose a rendered hit: plays it, then closes the box and clears the query.
    pub fn select(&mut self, index: usize, target: &mut impl RenderTarget) -> Option<UserAction> {
        let title = self.hits.get(index)?.clone();
        self.query.clear();
        self.box_active = false;
        target.set_visible(Region::SearchBox, false);
        self.hide_results(target);
        Some(UserAction::PlayTitle(title))
    }

    /// The close control: clears the query and results and deactivates the box.
    pub fn close(&mut self, target: &mut impl RenderTarget) {
        self.query.clear();
        self.box_active = false;
        target.set_visible(Region::SearchBox, false);
        self.hide_results(target);
        self.clear_results(target);
    }

    /// Outside click or cancel key: hide results, keep the query.
    pub fn dismiss(&mut self, target: &mut impl RenderTarget) {
        self.hide_results(target);
    }

    fn hide_results(&mut self, target: &mut impl RenderTarget) {
        self.results_visible = false;
        target.set_visible(Region::SearchResults, false);
    }

    fn clear_results(&mut self, target: &mut impl RenderTarget) {
        self.hits.clear();
        target.clear(Slot::SearchResults);
        target.set_text(TextField::SearchHeading, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use crate::view::Surface;
    use serde_json::json;

    fn state() -> ApplicationState {
        let mut state = ApplicationState::new();
        let movies: Vec<_> = (0..12)
            .map(|i| json!({"title": format!("Star Movie {}", i), "category": "trending"}))
            .collect();
        state.populate(&RawCatalog::from_values(
            json!([{"title": "Star Carousel"}, {"title": "Other"}]),
            json!(movies),
            json!([{"title": "Star Series", "seasons": 2}]),
            json!([]),
        ));
        state
    }

    fn hit_titles(surface: &Surface) -> Vec<String> {
        surface
            .items(Slot::SearchResults)
            .iter()
            .filter_map(|e| match &e.item {
                ViewItem::SearchHit { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn short_queries_hide_results() {
        let state = state();
        let mut surface = Surface::new();
        let mut search = SearchOverlay::new();
        search.on_query_change("star", &state, &mut surface);
        assert!(surface.is_visible(Region::SearchResults));

        for q in ["", " ", "s", "  s  "] {
            search.on_query_change(q, &state, &mut surface);
            assert!(!surface.is_visible(Region::SearchResults));
            assert!(surface.items(Slot::SearchResults).is_empty());
            assert!(search.hits().is_empty());
        }
    }

    #[test]
    fn no_match_shows_explicit_empty_state() {
        let state = state();
        let mut surface = Surface::new();
        let mut search = SearchOverlay::new();
        search.on_query_change("  ZZ ", &state, &mut surface);
        assert!(surface.is_visible(Region::SearchResults));
        assert_eq!(
            surface.items(Slot::SearchResults)[0].item,
            ViewItem::Placeholder("No results found for \"zz\"".to_string())
        );
        assert!(search.hits().is_empty());
    }

    #[test]
    fn matches_follow_concat_order_and_truncate() {
        let state = state();
        let mut surface = Surface::new();
        let mut search = SearchOverlay::new();
        search.on_query_change("STAR", &state, &mut surface);

        let titles = hit_titles(&surface);
        assert_eq!(titles.len(), MAX_RESULTS);
        assert_eq!(titles[0], "Star Carousel");
        assert_eq!(titles[1], "Star Movie 0");
        assert_eq!(titles[9], "Star Movie 8");
        assert_eq!(surface.text(TextField::SearchHeading), "Search Results (14)");

        search.on_query_change("series", &state, &mut surface);
        assert_eq!(hit_titles(&surface), vec!["Star Series"]);
        match &surface.items(Slot::SearchResults)[0].item {
            ViewItem::SearchHit { meta, .. } => assert_eq!(meta, "Movie • 2 Seasons"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn selecting_plays_and_closes() {
        let state = state();
        let mut surface = Surface::new();
        let mut search = SearchOverlay::new();
        search.activate(&mut surface);
        search.on_query_change("other", &state, &mut surface);

        let action = search.select(0, &mut surface);
        assert_eq!(action, Some(UserAction::PlayTitle("Other".into())));
        assert!(!search.is_active());
        assert_eq!(search.query(), "");
        assert!(!surface.is_visible(Region::SearchResults));
        assert!(!surface.is_visible(Region::SearchBox));
        assert_eq!(search.select(5, &mut surface), None);
    }

    #[test]
    fn dismiss_keeps_query_close_clears_it() {
        let state = state();
        let mut surface = Surface::new();
        let mut search = SearchOverlay::new();
        search.activate(&mut surface);
        search.on_query_change("star", &state, &mut surface);

        search.dismiss(&mut surface);
        assert_eq!(search.query(), "star");
        assert!(search.is_active());
        assert!(!search.results_visible());
        assert!(!surface.items(Slot::SearchResults).is_empty());

        search.close(&mut surface);
        assert_eq!(search.query(), "");
        assert!(!search.is_active());
        assert!(surface.items(Slot::SearchResults).is_empty());
    }
}
