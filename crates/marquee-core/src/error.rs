use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// The four collections the catalog is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Carousel,
    Movies,
    Series,
    ContinueWatching,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 4] = [
        CatalogKind::Carousel,
        CatalogKind::Movies,
        CatalogKind::Series,
        CatalogKind::ContinueWatching,
    ];

    /// A failed required collection degrades the whole catalog.
    pub fn is_required(self) -> bool {
        !matches!(self, CatalogKind::ContinueWatching)
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Carousel => "carousel",
            CatalogKind::Movies => "movies",
            CatalogKind::Series => "webseries",
            CatalogKind::ContinueWatching => "continue-watching",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A required collection could not be fetched.
#[derive(Debug, Error)]
#[error("{kind} API error: {source}")]
pub struct LoadError {
    pub kind: CatalogKind,
    #[source]
    pub source: FetchError,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
