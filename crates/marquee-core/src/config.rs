use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::ConfigError;
use super::loader::{Endpoints, Source};
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Where each collection comes from.
///
/// Every location is either an absolute `http(s)://` URL, a path to a local
/// JSON file, or a path relative to `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_carousel")]
    pub carousel: String,
    #[serde(default = "default_movies")]
    pub movies: String,
    #[serde(default = "default_series")]
    pub series: String,
    #[serde(default = "default_continue_watching")]
    pub continue_watching: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Per-request timeout; each collection is timed independently.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Layout thresholds, in layout units (one terminal row is 40, one column 8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Viewports wider than this show the vertical rail.
    #[serde(default = "default_breakpoint")]
    pub breakpoint: f32,
    #[serde(default = "default_back_to_top_threshold")]
    pub back_to_top_threshold: f32,
    #[serde(default = "default_header_shrink_threshold")]
    pub header_shrink_threshold: f32,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            carousel: default_carousel(),
            movies: default_movies(),
            series: default_series(),
            continue_watching: default_continue_watching(),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: default_breakpoint(),
            back_to_top_threshold: default_back_to_top_threshold(),
            header_shrink_threshold: default_header_shrink_threshold(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_carousel() -> String {
    "/api/carousel".to_string()
}

fn default_movies() -> String {
    "/api/movies".to_string()
}

fn default_series() -> String {
    "/api/webseries".to_string()
}

fn default_continue_watching() -> String {
    "/api/continue-watching".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_breakpoint() -> f32 {
    991.0
}

fn default_back_to_top_threshold() -> f32 {
    300.0
}

fn default_header_shrink_threshold() -> f32 {
    50.0
}

impl Config {
    /// Load from the default location, writing a fresh default file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    pub fn endpoints(&self) -> Endpoints {
        let e = &self.endpoints;
        Endpoints {
            carousel: Source::resolve(&e.base_url, &e.carousel),
            movies: Source::resolve(&e.base_url, &e.movies),
            series: Source::resolve(&e.base_url, &e.series),
            continue_watching: Source::resolve(&e.base_url, &e.continue_watching),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.loader.timeout_ms)
    }
}
