//! Display fallbacks for missing catalog fields.
//!
//! Each rendering context has its own wording, so the table is keyed by
//! (context, field). Normalization in [`crate::catalog`] applies these once.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Hero,
    RailCard,
    MovieCard,
    SeriesPanel,
    EpisodeRow,
    ResumeCard,
    SearchHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Rating,
    Duration,
    Description,
    Cast,
    Genre,
    Quality,
    Year,
    Date,
}

const POLICY: &[(Context, Field, &str)] = &[
    (Context::Hero, Field::Title, "Untitled"),
    (Context::Hero, Field::Rating, "⭐ N/A"),
    (Context::Hero, Field::Duration, "N/A"),
    (Context::Hero, Field::Description, "No description available"),
    (Context::Hero, Field::Cast, "Cast information not available"),
    (Context::Hero, Field::Genre, "Movie"),
    (Context::RailCard, Field::Title, "Untitled"),
    (Context::RailCard, Field::Genre, "Movie"),
    (Context::MovieCard, Field::Title, "Untitled"),
    (Context::MovieCard, Field::Duration, "N/A"),
    (Context::MovieCard, Field::Quality, "HD"),
    (Context::SeriesPanel, Field::Title, "Untitled Series"),
    (Context::SeriesPanel, Field::Rating, "N/A/10"),
    (Context::SeriesPanel, Field::Year, "N/A"),
    (Context::SeriesPanel, Field::Description, "No description available"),
    (Context::SeriesPanel, Field::Genre, "Drama"),
    (Context::EpisodeRow, Field::Duration, "45m"),
    (Context::ResumeCard, Field::Title, "Untitled"),
    (Context::ResumeCard, Field::Date, "N/A"),
    (Context::ResumeCard, Field::Rating, "N/A"),
    (Context::SearchHit, Field::Genre, "Movie"),
    (Context::SearchHit, Field::Duration, "N/A"),
];

pub const DEFAULT_SEASONS: u32 = 1;
pub const DEFAULT_EPISODE_COUNT: u32 = 0;
pub const DEFAULT_EPISODE_NUMBER: u32 = 1;

/// The fallback text for `field` in `ctx`, or "" when the context has none.
pub fn fallback(ctx: Context, field: Field) -> &'static str {
    POLICY
        .iter()
        .find(|(c, f, _)| *c == ctx && *f == field)
        .map(|(_, _, text)| *text)
        .unwrap_or("")
}

pub fn or_default(value: Option<&str>, ctx: Context, field: Field) -> String {
    value.unwrap_or_else(|| fallback(ctx, field)).to_string()
}

pub fn episode_title(number: u32) -> String {
    format!("Episode {}", number)
}
