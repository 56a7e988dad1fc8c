//! Display records, normalized once from the raw collections.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::defaults::{self, Context, Field};
use crate::model::{decode_collection, CatalogItem, ContinueWatchingItem, Episode};

/// The four collections exactly as decoded, before any display defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCatalog {
    pub carousel: Vec<CatalogItem>,
    pub movies: Vec<CatalogItem>,
    pub series: Vec<CatalogItem>,
    pub continue_watching: Vec<ContinueWatchingItem>,
}

impl RawCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode the four payloads; non-array payloads become empty collections.
    pub fn from_values(
        carousel: Value,
        movies: Value,
        series: Value,
        continue_watching: Value,
    ) -> Self {
        Self {
            carousel: decode_collection("carousel", carousel),
            movies: decode_collection("movies", movies),
            series: decode_collection("webseries", series),
            continue_watching: decode_collection("continue-watching", continue_watching),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.carousel.is_empty()
            && self.movies.is_empty()
            && self.series.is_empty()
            && self.continue_watching.is_empty()
    }
}

/// A carousel entry: drives both the hero panel and the rail cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub title: String,
    pub rating: String,
    pub duration: String,
    pub description: String,
    pub cast: String,
    /// Hero tags. A missing list shows the fallback genre, an empty list shows none.
    pub genres: Vec<String>,
    pub card_title: String,
    pub card_genre: String,
    pub poster: Option<String>,
    pub hero_bg: Option<String>,
}

impl Feature {
    pub fn from_item(item: &CatalogItem) -> Self {
        let genres = match &item.genres {
            Some(list) => list.clone(),
            None => vec![defaults::fallback(Context::Hero, Field::Genre).to_string()],
        };
        let first_genre = item.genres.as_ref().and_then(|g| g.first());
        Self {
            title: defaults::or_default(item.title.as_deref(), Context::Hero, Field::Title),
            rating: defaults::or_default(item.rating.as_deref(), Context::Hero, Field::Rating),
            duration: defaults::or_default(
                item.duration.as_deref(),
                Context::Hero,
                Field::Duration,
            ),
            description: defaults::or_default(
                item.description.as_deref(),
                Context::Hero,
                Field::Description,
            ),
            cast: defaults::or_default(item.cast.as_deref(), Context::Hero, Field::Cast),
            genres,
            card_title: defaults::or_default(
                item.title.as_deref(),
                Context::RailCard,
                Field::Title,
            ),
            card_genre: defaults::or_default(
                first_genre.map(String::as_str),
                Context::RailCard,
                Field::Genre,
            ),
            poster: item.poster.clone(),
            hero_bg: item.hero_bg.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieCategory {
    Upcoming,
    TopTen,
    Trending,
}

impl MovieCategory {
    /// Only the three known tags bucket a movie; anything else renders nowhere.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "upcoming" => Some(Self::Upcoming),
            "top-ten" => Some(Self::TopTen),
            "trending" => Some(Self::Trending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub image: Option<String>,
    pub duration: String,
    pub quality: String,
    pub category: Option<MovieCategory>,
}

impl Movie {
    pub fn from_item(item: &CatalogItem) -> Self {
        Self {
            title: defaults::or_default(item.title.as_deref(), Context::MovieCard, Field::Title),
            image: item.image.clone(),
            duration: defaults::or_default(
                item.duration.as_deref(),
                Context::MovieCard,
                Field::Duration,
            ),
            quality: defaults::or_default(
                item.quality.as_deref(),
                Context::MovieCard,
                Field::Quality,
            ),
            category: item.category.as_deref().and_then(MovieCategory::from_tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeEntry {
    pub number: u32,
    pub title: String,
    pub image: Option<String>,
    pub duration: String,
}

impl EpisodeEntry {
    pub fn from_episode(ep: &Episode) -> Self {
        let number = ep.episode.unwrap_or(defaults::DEFAULT_EPISODE_NUMBER);
        Self {
            number,
            title: ep
                .title
                .clone()
                .unwrap_or_else(|| defaults::episode_title(number)),
            image: ep.image.clone(),
            duration: defaults::or_default(
                ep.duration.as_deref(),
                Context::EpisodeRow,
                Field::Duration,
            ),
        }
    }
}

pub const MAX_SEASON_TABS: u32 = 99;

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Payload id, or the 1-based position when the payload has none.
    pub id: u32,
    pub rank: String,
    pub title: String,
    pub rating: String,
    pub year: String,
    pub seasons: u32,
    pub episodes: u32,
    pub description: String,
    pub image: Option<String>,
    pub genres: Vec<String>,
    pub seasons_data: BTreeMap<u32, Vec<EpisodeEntry>>,
}

impl Series {
    pub fn from_item(index: usize, item: &CatalogItem) -> Self {
        let position = index as u32 + 1;
        let genres = match &item.genres {
            Some(list) => list.clone(),
            None => vec![defaults::fallback(Context::SeriesPanel, Field::Genre).to_string()],
        };
        Self {
            id: item.id.unwrap_or(position),
            rank: item.rank.clone().unwrap_or_else(|| position.to_string()),
            title: defaults::or_default(
                item.title.as_deref(),
                Context::SeriesPanel,
                Field::Title,
            ),
            rating: defaults::or_default(
                item.rating.as_deref(),
                Context::SeriesPanel,
                Field::Rating,
            ),
            year: defaults::or_default(item.year.as_deref(), Context::SeriesPanel, Field::Year),
            seasons: item.seasons.unwrap_or(defaults::DEFAULT_SEASONS),
            episodes: item.episodes.unwrap_or(defaults::DEFAULT_EPISODE_COUNT),
            description: defaults::or_default(
                item.description.as_deref(),
                Context::SeriesPanel,
                Field::Description,
            ),
            image: item.image.clone(),
            genres,
            seasons_data: item
                .seasons_data
                .iter()
                .map(|(season, eps)| {
                    (*season, eps.iter().map(EpisodeEntry::from_episode).collect())
                })
                .collect(),
        }
    }

    /// Season tabs offered, at most [`MAX_SEASON_TABS`].
    pub fn tab_count(&self) -> u32 {
        self.seasons.min(MAX_SEASON_TABS)
    }

    pub fn seasons_label(&self) -> String {
        format!("{} Seasons", self.seasons)
    }

    pub fn episodes_label(&self) -> String {
        format!("{} Episodes", self.episodes)
    }

    /// Episodes of `season`; empty when the season has no data.
    pub fn episodes_for(&self, season: u32) -> &[EpisodeEntry] {
        self.seasons_data
            .get(&season)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeEntry {
    pub title: String,
    pub image: Option<String>,
    pub date: String,
    pub rating: String,
    /// Percent watched, clamped to 0..=100.
    pub progress: f64,
}

impl ResumeEntry {
    pub fn from_item(item: &ContinueWatchingItem) -> Self {
        Self {
            title: defaults::or_default(item.title.as_deref(), Context::ResumeCard, Field::Title),
            image: item.image.clone(),
            date: defaults::or_default(item.date.as_deref(), Context::ResumeCard, Field::Date),
            rating: defaults::or_default(
                item.rating.as_deref(),
                Context::ResumeCard,
                Field::Rating,
            ),
            progress: item.progress.unwrap_or(0.0).clamp(0.0, 100.0),
        }
    }

    pub fn rating_label(&self) -> String {
        format!("★ {}", self.rating)
    }
}

/// Which collection a search entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Carousel,
    Movies,
    Series,
}

/// A searchable item. Only items with a real title are indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntry {
    pub title: String,
    pub title_lower: String,
    pub genre: String,
    pub summary: String,
    pub image: Option<String>,
    pub source: SearchSource,
}

impl SearchEntry {
    fn from_item(item: &CatalogItem, source: SearchSource) -> Option<Self> {
        let title = item.title.clone()?;
        let genre = item
            .genre
            .as_deref()
            .or_else(|| item.genres.as_ref().and_then(|g| g.first()).map(String::as_str));
        let summary = match (&item.duration, item.seasons) {
            (Some(duration), _) => duration.clone(),
            (None, Some(seasons)) => format!("{} Seasons", seasons),
            (None, None) => defaults::fallback(Context::SearchHit, Field::Duration).to_string(),
        };
        Some(Self {
            title_lower: title.to_lowercase(),
            title,
            genre: defaults::or_default(genre, Context::SearchHit, Field::Genre),
            summary,
            image: item.poster.clone().or_else(|| item.image.clone()),
            source,
        })
    }

    pub fn meta_line(&self) -> String {
        format!("{} • {}", self.genre, self.summary)
    }
}

/// Carousel, then movies, then series, in payload order.
pub fn search_index(raw: &RawCatalog) -> Vec<SearchEntry> {
    let sources = [
        (&raw.carousel, SearchSource::Carousel),
        (&raw.movies, SearchSource::Movies),
        (&raw.series, SearchSource::Series),
    ];
    sources
        .into_iter()
        .flat_map(|(items, source)| {
            items
                .iter()
                .filter_map(move |item| SearchEntry::from_item(item, source))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> CatalogItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn feature_defaults() {
        let f = Feature::from_item(&CatalogItem::default());
        assert_eq!(f.title, "Untitled");
        assert_eq!(f.rating, "⭐ N/A");
        assert_eq!(f.duration, "N/A");
        assert_eq!(f.description, "No description available");
        assert_eq!(f.cast, "Cast information not available");
        assert_eq!(f.genres, vec!["Movie"]);
        assert_eq!(f.card_genre, "Movie");
        assert_eq!(f.hero_bg, None);
    }

    #[test]
    fn empty_genre_list_shows_no_hero_tags() {
        let f = Feature::from_item(&item(json!({"title": "Arrival", "genres": []})));
        assert!(f.genres.is_empty());
        assert_eq!(f.card_genre, "Movie");
    }

    #[test]
    fn unknown_category_is_unbucketed() {
        let m = Movie::from_item(&item(json!({"title": "Heat", "category": "classics"})));
        assert_eq!(m.category, None);
        assert_eq!(m.quality, "HD");
        assert_eq!(m.duration, "N/A");

        let m = Movie::from_item(&item(json!({"category": "top-ten"})));
        assert_eq!(m.category, Some(MovieCategory::TopTen));
        assert_eq!(m.title, "Untitled");
    }

    #[test]
    fn series_positional_defaults() {
        let s = Series::from_item(4, &CatalogItem::default());
        assert_eq!(s.id, 5);
        assert_eq!(s.rank, "5");
        assert_eq!(s.title, "Untitled Series");
        assert_eq!(s.rating, "N/A/10");
        assert_eq!(s.year, "N/A");
        assert_eq!(s.seasons, 1);
        assert_eq!(s.seasons_label(), "1 Seasons");
        assert_eq!(s.episodes_label(), "0 Episodes");
        assert_eq!(s.genres, vec!["Drama"]);
        assert!(s.episodes_for(1).is_empty());
    }

    #[test]
    fn episode_defaults() {
        let s = Series::from_item(
            0,
            &item(json!({
                "seasonsData": {"1": [{"title": "Pilot", "episode": 1}, {"episode": 2}, {}]}
            })),
        );
        let eps = s.episodes_for(1);
        assert_eq!(eps[0].title, "Pilot");
        assert_eq!(eps[1].title, "Episode 2");
        assert_eq!(eps[1].duration, "45m");
        assert_eq!(eps[2].number, 1);
    }

    #[test]
    fn resume_progress_is_clamped() {
        let r = ResumeEntry::from_item(&ContinueWatchingItem {
            progress: Some(140.0),
            ..Default::default()
        });
        assert_eq!(r.progress, 100.0);
        assert_eq!(r.rating_label(), "★ N/A");
        assert_eq!(r.date, "N/A");
    }

    #[test]
    fn search_index_keeps_concat_order_and_titled_items() {
        let raw = RawCatalog::from_values(
            json!([{"title": "Alpha", "genres": ["Sci-Fi"]}, {"poster": "p.jpg"}]),
            json!([{"title": "Beta", "genre": "Noir", "duration": "1h 50m"}]),
            json!([{"title": "Gamma", "seasons": 3}, {"title": "Delta"}]),
            json!([]),
        );
        let index = search_index(&raw);
        let titles: Vec<_> = index.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma", "Delta"]);
        assert_eq!(index[0].meta_line(), "Sci-Fi • N/A");
        assert_eq!(index[1].meta_line(), "Noir • 1h 50m");
        assert_eq!(index[2].meta_line(), "Movie • 3 Seasons");
        assert_eq!(index[3].source, SearchSource::Series);
    }
}
