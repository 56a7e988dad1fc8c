//! The single owned application state.
//!
//! Only the event loop writes to it: once through [`ApplicationState::populate`]
//! after loading, then through the navigation cursors.

use tracing::info;

use crate::catalog::{self, Feature, Movie, RawCatalog, ResumeEntry, SearchEntry, Series};

#[derive(Debug, Clone)]
pub struct ApplicationState {
    pub carousel: Vec<Feature>,
    pub movies: Vec<Movie>,
    pub series: Vec<Series>,
    pub continue_watching: Vec<ResumeEntry>,
    search_index: Vec<SearchEntry>,
    /// Always `< series.len()` while series is non-empty.
    pub current_series_index: usize,
    /// 1-based; reset to 1 whenever the series index changes.
    pub current_season: u32,
    pub is_initialized: bool,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationState {
    pub fn new() -> Self {
        Self {
            carousel: Vec::new(),
            movies: Vec::new(),
            series: Vec::new(),
            continue_watching: Vec::new(),
            search_index: Vec::new(),
            current_series_index: 0,
            current_season: 1,
            is_initialized: false,
        }
    }

    /// Replace every collection from a freshly loaded catalog.
    pub fn populate(&mut self, raw: &RawCatalog) {
        self.carousel = raw.carousel.iter().map(Feature::from_item).collect();
        self.movies = raw.movies.iter().map(Movie::from_item).collect();
        self.series = raw
            .series
            .iter()
            .enumerate()
            .map(|(i, item)| Series::from_item(i, item))
            .collect();
        self.continue_watching = raw
            .continue_watching
            .iter()
            .map(ResumeEntry::from_item)
            .collect();
        self.search_index = catalog::search_index(raw);
        self.current_series_index = 0;
        self.current_season = 1;
        info!(
            "Data loaded: Carousel({}), Movies({}), Series({}), Continue({})",
            self.carousel.len(),
            self.movies.len(),
            self.series.len(),
            self.continue_watching.len()
        );
    }

    /// The degraded path: every collection empty.
    pub fn clear(&mut self) {
        self.populate(&RawCatalog::empty());
    }

    pub fn search_index(&self) -> &[SearchEntry] {
        &self.search_index
    }

    pub fn current_series(&self) -> Option<&Series> {
        self.series.get(self.current_series_index)
    }

    /// Move the series cursor (wrapping) and reset the season to 1.
    pub fn select_series(&mut self, index: usize) -> Option<&Series> {
        if self.series.is_empty() {
            return None;
        }
        self.current_series_index = index % self.series.len();
        self.current_season = 1;
        self.series.get(self.current_series_index)
    }

    pub fn select_season(&mut self, season: u32) {
        self.current_season = season;
    }
}

pub fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index + 1) % len
}

pub fn wrap_prev(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if index == 0 {
        len - 1
    } else {
        (index - 1).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_with_series(n: usize) -> RawCatalog {
        let series: Vec<_> = (0..n)
            .map(|i| json!({"title": format!("Show {}", i), "seasons": 3}))
            .collect();
        RawCatalog::from_values(json!([]), json!([]), json!(series), json!([]))
    }

    #[test]
    fn starts_empty_and_uninitialized() {
        let state = ApplicationState::new();
        assert!(state.carousel.is_empty());
        assert_eq!(state.current_series_index, 0);
        assert_eq!(state.current_season, 1);
        assert!(!state.is_initialized);
        assert!(state.current_series().is_none());
    }

    #[test]
    fn wrap_helpers_are_inverses() {
        for len in 1..8 {
            for i in 0..len {
                assert_eq!(wrap_prev(wrap_next(i, len), len), i);
                assert_eq!(wrap_next(wrap_prev(i, len), len), i);
            }
        }
        assert_eq!(wrap_next(0, 0), 0);
        assert_eq!(wrap_prev(0, 0), 0);
    }

    #[test]
    fn selecting_a_series_wraps_and_resets_season() {
        let mut state = ApplicationState::new();
        state.populate(&raw_with_series(3));
        state.select_season(3);

        let title = state.select_series(4).map(|s| s.title.clone());
        assert_eq!(title.as_deref(), Some("Show 1"));
        assert_eq!(state.current_series_index, 1);
        assert_eq!(state.current_season, 1);
    }

    #[test]
    fn clear_empties_everything() {
        let mut state = ApplicationState::new();
        state.populate(&raw_with_series(2));
        state.clear();
        assert!(state.series.is_empty());
        assert!(state.search_index().is_empty());
        assert!(state.select_series(1).is_none());
    }
}
