//! Series browser: metadata panel, season tabs and the episode list.
//!
//! The two cursors live in [`ApplicationState`]; the browser only decides
//! what to re-render when they move.

use tracing::debug;

use crate::state::{wrap_next, wrap_prev, ApplicationState};
use crate::view::{Backdrop, Region, RenderTarget, Slot, TextField, ViewItem};

pub fn empty_season_message(season: u32) -> String {
    format!("No episodes available for Season {}", season)
}

#[derive(Debug, Default)]
pub struct SeriesBrowser {
    enabled: bool,
}

impl SeriesBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn initial_render(&mut self, state: &mut ApplicationState, target: &mut impl RenderTarget) {
        if state.series.is_empty() {
            debug!("series: no data, hiding section");
            self.enabled = false;
            target.set_visible(Region::SeriesSection, false);
            return;
        }
        self.enabled = true;
        target.set_visible(Region::SeriesSection, true);
        self.show_series(state.current_series_index, state, target);
    }

    /// Show series `index` (wrapping), starting again at season 1.
    pub fn show_series(
        &mut self,
        index: usize,
        state: &mut ApplicationState,
        target: &mut impl RenderTarget,
    ) {
        if !self.enabled || state.select_series(index).is_none() {
            return;
        }
        debug!(
            "series: showing #{} season {}",
            state.current_series_index, state.current_season
        );
        self.render_panel(state, target);
        self.render_tabs(state, target);
        self.render_episodes(state, target);
    }

    pub fn next(&mut self, state: &mut ApplicationState, target: &mut impl RenderTarget) {
        let index = wrap_next(state.current_series_index, state.series.len());
        self.show_series(index, state, target);
    }

    pub fn previous(&mut self, state: &mut ApplicationState, target: &mut impl RenderTarget) {
        let index = wrap_prev(state.current_series_index, state.series.len());
        self.show_series(index, state, target);
    }

    /// Switch season. Only the tab highlight and the episode list change.
    pub fn select_season(
        &mut self,
        season: u32,
        state: &mut ApplicationState,
        target: &mut impl RenderTarget,
    ) {
        if !self.enabled {
            return;
        }
        state.select_season(season);
        let tabs = tab_count(state);
        for i in 0..tabs {
            target.toggle_active(Slot::SeasonTabs, i, i as u32 + 1 == season);
        }
        self.render_episodes(state, target);
    }

    fn render_panel(&self, state: &ApplicationState, target: &mut impl RenderTarget) {
        let Some(series) = state.current_series() else {
            return;
        };
        target.set_text(TextField::SeriesNumber, &series.id.to_string());
        target.set_text(TextField::SeriesRank, &series.rank);
        target.set_text(TextField::SeriesTitle, &series.title);
        target.set_text(TextField::SeriesRating, &series.rating);
        target.set_text(TextField::SeriesYear, &series.year);
        target.set_text(TextField::SeriesSeasons, &series.seasons_label());
        target.set_text(TextField::SeriesEpisodes, &series.episodes_label());
        target.set_text(TextField::SeriesDescription, &series.description);
        target.set_text(TextField::SeasonsCount, &series.seasons_label());
        target.set_background(Backdrop::Series, series.image.as_deref());

        target.clear(Slot::SeriesGenres);
        for genre in &series.genres {
            target.append_item(Slot::SeriesGenres, ViewItem::Tag(genre.clone()));
        }
    }

    fn render_tabs(&self, state: &ApplicationState, target: &mut impl RenderTarget) {
        let Some(series) = state.current_series() else {
            return;
        };
        target.clear(Slot::SeasonTabs);
        for season in 1..=series.tab_count() {
            target.append_item(Slot::SeasonTabs, ViewItem::SeasonTab { season });
            target.toggle_active(
                Slot::SeasonTabs,
                season as usize - 1,
                season == state.current_season,
            );
        }
    }

    fn render_episodes(&self, state: &ApplicationState, target: &mut impl RenderTarget) {
        let Some(series) = state.current_series() else {
            return;
        };
        let season = state.current_season;
        target.clear(Slot::EpisodeList);

        let episodes = series.episodes_for(season);
        if episodes.is_empty() {
            target.append_item(
                Slot::EpisodeList,
                ViewItem::Placeholder(empty_season_message(season)),
            );
            return;
        }
        for ep in episodes {
            target.append_item(
                Slot::EpisodeList,
                ViewItem::Episode {
                    series_index: state.current_series_index,
                    season,
                    number: ep.number,
                    title: ep.title.clone(),
                    duration: ep.duration.clone(),
                    image: ep.image.clone(),
                },
            );
        }
    }
}

fn tab_count(state: &ApplicationState) -> usize {
    state.current_series().map_or(0, |s| s.tab_count() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use crate::view::Surface;
    use serde_json::{json, Value};

    fn state_from(series: Value) -> ApplicationState {
        let mut state = ApplicationState::new();
        state.populate(&RawCatalog::from_values(
            json!([]),
            json!([]),
            series,
            json!([]),
        ));
        state
    }

    fn episode_count(surface: &Surface) -> usize {
        surface
            .items(Slot::EpisodeList)
            .iter()
            .filter(|e| matches!(e.item, ViewItem::Episode { .. }))
            .count()
    }

    #[test]
    fn empty_series_hides_section() {
        let mut state = state_from(json!([]));
        let mut surface = Surface::new();
        let mut browser = SeriesBrowser::new();
        browser.initial_render(&mut state, &mut surface);
        browser.next(&mut state, &mut surface);
        assert!(!surface.is_visible(Region::SeriesSection));
        assert!(!browser.is_enabled());
        assert_eq!(state.current_series_index, 0);
    }

    #[test]
    fn empty_season_shows_placeholder() {
        let mut state = state_from(json!([{
            "title": "Dark",
            "seasons": 2,
            "seasonsData": {
                "1": [{"episode": 1, "title": "Secrets"}, {"episode": 2, "title": "Lies"}],
                "2": []
            }
        }]));
        let mut surface = Surface::new();
        let mut browser = SeriesBrowser::new();
        browser.initial_render(&mut state, &mut surface);

        assert_eq!(surface.items(Slot::SeasonTabs).len(), 2);
        assert_eq!(episode_count(&surface), 2);

        browser.select_season(2, &mut state, &mut surface);
        assert_eq!(surface.active_indices(Slot::SeasonTabs), vec![1]);
        assert_eq!(
            surface.items(Slot::EpisodeList)[0].item,
            ViewItem::Placeholder("No episodes available for Season 2".to_string())
        );

        browser.select_season(1, &mut state, &mut surface);
        assert_eq!(episode_count(&surface), 2);
    }

    #[test]
    fn changing_series_resets_season_before_rendering() {
        let mut state = state_from(json!([
            {
                "title": "One",
                "seasons": 3,
                "seasonsData": {"1": [{"episode": 1}], "3": [{"episode": 9}]}
            },
            {
                "title": "Two",
                "seasons": 2,
                "seasonsData": {"1": [{"episode": 4}, {"episode": 5}]}
            },
        ]));
        let mut surface = Surface::new();
        let mut browser = SeriesBrowser::new();
        browser.initial_render(&mut state, &mut surface);

        for target in [1usize, 0, 1] {
            browser.select_season(3, &mut state, &mut surface);
            browser.show_series(target, &mut state, &mut surface);
            assert_eq!(state.current_season, 1);
            assert_eq!(surface.active_indices(Slot::SeasonTabs), vec![0]);
            match &surface.items(Slot::EpisodeList)[0].item {
                ViewItem::Episode { season, .. } => assert_eq!(*season, 1),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut state = state_from(json!([{"title": "A"}, {"title": "B"}, {"title": "C"}]));
        let mut surface = Surface::new();
        let mut browser = SeriesBrowser::new();
        browser.initial_render(&mut state, &mut surface);

        browser.previous(&mut state, &mut surface);
        assert_eq!(state.current_series_index, 2);
        assert_eq!(surface.text(TextField::SeriesTitle), "C");
        browser.next(&mut state, &mut surface);
        assert_eq!(state.current_series_index, 0);
        for len_start in 0..3 {
            browser.show_series(len_start, &mut state, &mut surface);
            browser.next(&mut state, &mut surface);
            browser.previous(&mut state, &mut surface);
            assert_eq!(state.current_series_index, len_start);
        }
    }

    #[test]
    fn panel_uses_positional_fallbacks() {
        let mut state = state_from(json!([
            {"title": "A"},
            {"seasons": 4, "episodes": 40, "image": "b.jpg"}
        ]));
        let mut surface = Surface::new();
        let mut browser = SeriesBrowser::new();
        browser.initial_render(&mut state, &mut surface);
        assert_eq!(surface.background(Backdrop::Series), None);

        browser.next(&mut state, &mut surface);
        assert_eq!(surface.text(TextField::SeriesNumber), "2");
        assert_eq!(surface.text(TextField::SeriesRank), "2");
        assert_eq!(surface.text(TextField::SeriesTitle), "Untitled Series");
        assert_eq!(surface.text(TextField::SeriesSeasons), "4 Seasons");
        assert_eq!(surface.text(TextField::SeriesEpisodes), "40 Episodes");
        assert_eq!(surface.background(Backdrop::Series), Some("b.jpg"));
        assert_eq!(surface.items(Slot::SeriesGenres).len(), 1);
        assert_eq!(surface.items(Slot::SeasonTabs).len(), 4);
    }

    #[test]
    fn huge_season_counts_are_capped_in_the_tab_strip() {
        let mut state = state_from(json!([{"title": "Forever", "seasons": 4_000_000_000u32}]));
        let mut surface = Surface::new();
        let mut browser = SeriesBrowser::new();
        browser.initial_render(&mut state, &mut surface);

        assert_eq!(surface.text(TextField::SeriesSeasons), "4000000000 Seasons");
        assert_eq!(
            surface.items(Slot::SeasonTabs).len(),
            crate::catalog::MAX_SEASON_TABS as usize
        );
        assert_eq!(surface.active_indices(Slot::SeasonTabs), vec![0]);
    }
}
