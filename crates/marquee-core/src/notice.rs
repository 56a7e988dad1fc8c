//! Stubbed user actions. Nothing is played or stored; each action only
//! produces a confirmation notice.

use crate::defaults;
use crate::state::ApplicationState;

pub const INIT_FAILURE: &str = "Failed to initialize application.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    PlayMovie(String),
    /// Play the series at this position in the collection.
    PlaySeries(usize),
    /// Keyed by the series' position, like `PlaySeries`.
    PlayEpisode {
        series_index: usize,
        season: u32,
        episode: u32,
    },
    /// Play a search hit by title.
    PlayTitle(String),
    AddToWatchlist(String),
    Like(String),
}

impl UserAction {
    /// The confirmation text, or `None` when the target no longer exists.
    pub fn notice(&self, state: &ApplicationState) -> Option<String> {
        match self {
            UserAction::PlayMovie(title) => Some(format!("Now playing: {}", title)),
            UserAction::PlaySeries(index) => state
                .series
                .get(*index)
                .map(|s| format!("Starting: {}", s.title)),
            UserAction::PlayEpisode {
                series_index,
                season,
                episode,
            } => {
                let series = state.series.get(*series_index)?;
                let title = series
                    .episodes_for(*season)
                    .iter()
                    .find(|ep| ep.number == *episode)
                    .map(|ep| ep.title.clone())
                    .unwrap_or_else(|| defaults::episode_title(*episode));
                Some(format!(
                    "Playing: {} · Season {}, Episode {}: {}",
                    series.title, season, episode, title
                ))
            }
            UserAction::PlayTitle(title) => Some(format!("Playing: {}", title)),
            UserAction::AddToWatchlist(title) => {
                Some(format!("Added \"{}\" to watchlist", title))
            }
            UserAction::Like(title) => Some(format!("Liked \"{}\"", title)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use serde_json::json;

    fn state() -> ApplicationState {
        let mut state = ApplicationState::new();
        state.populate(&RawCatalog::from_values(
            json!([]),
            json!([]),
            json!([{
                "id": 3,
                "title": "Severance",
                "seasonsData": {"1": [{"episode": 1, "title": "Good News About Hell"}]}
            }]),
            json!([]),
        ));
        state
    }

    #[test]
    fn stub_notices() {
        let state = state();
        let cases = [
            (UserAction::PlayMovie("Heat".into()), "Now playing: Heat"),
            (UserAction::PlaySeries(0), "Starting: Severance"),
            (UserAction::PlayTitle("Heat".into()), "Playing: Heat"),
            (
                UserAction::AddToWatchlist("Heat".into()),
                "Added \"Heat\" to watchlist",
            ),
            (UserAction::Like("Heat".into()), "Liked \"Heat\""),
        ];
        for (action, expected) in cases {
            assert_eq!(action.notice(&state).as_deref(), Some(expected));
        }
    }

    #[test]
    fn episode_notice_looks_up_title() {
        let state = state();
        let known = UserAction::PlayEpisode {
            series_index: 0,
            season: 1,
            episode: 1,
        };
        assert_eq!(
            known.notice(&state).as_deref(),
            Some("Playing: Severance · Season 1, Episode 1: Good News About Hell")
        );

        let unknown = UserAction::PlayEpisode {
            series_index: 0,
            season: 2,
            episode: 4,
        };
        assert_eq!(
            unknown.notice(&state).as_deref(),
            Some("Playing: Severance · Season 2, Episode 4: Episode 4")
        );
    }

    #[test]
    fn missing_targets_produce_no_notice() {
        let state = state();
        assert_eq!(UserAction::PlaySeries(5).notice(&state), None);
        let gone = UserAction::PlayEpisode {
            series_index: 42,
            season: 1,
            episode: 1,
        };
        assert_eq!(gone.notice(&state), None);
    }

    #[test]
    fn episode_notice_names_the_series_it_came_from() {
        let mut state = ApplicationState::new();
        state.populate(&RawCatalog::from_values(
            json!([]),
            json!([]),
            json!([
                {"id": 2, "title": "Andor", "seasonsData": {"1": [{"episode": 1}]}},
                {"title": "Borgen", "seasonsData": {"1": [{"episode": 1, "title": "Decency"}]}}
            ]),
            json!([]),
        ));
        let action = UserAction::PlayEpisode {
            series_index: 1,
            season: 1,
            episode: 1,
        };
        assert_eq!(
            action.notice(&state).as_deref(),
            Some("Playing: Borgen · Season 1, Episode 1: Decency")
        );
    }
}
