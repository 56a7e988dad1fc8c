//! Catalog loader: four concurrent fetches, each with its own timeout.
//!
//! A failure on carousel, movies or series fails the whole attempt and the
//! caller degrades to an empty catalog. Continue-watching is optional and
//! any failure there only empties that one collection.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::RawCatalog;
use crate::error::{CatalogKind, FetchError, LoadError};
use crate::model::json_kind;

/// Where a collection is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// Absolute URLs are used as-is, `file:` locations and existing paths are
    /// read from disk, anything else is joined onto `base_url`.
    pub fn resolve(base_url: &str, location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Source::Url(location.to_string());
        }
        if let Some(path) = location.strip_prefix("file://") {
            return Source::File(PathBuf::from(path));
        }
        let path = PathBuf::from(location);
        if path.is_file() {
            return Source::File(path);
        }
        Source::Url(format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            location.trim_start_matches('/')
        ))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub carousel: Source,
    pub movies: Source,
    pub series: Source,
    pub continue_watching: Source,
}

impl Endpoints {
    pub fn get(&self, kind: CatalogKind) -> &Source {
        match kind {
            CatalogKind::Carousel => &self.carousel,
            CatalogKind::Movies => &self.movies,
            CatalogKind::Series => &self.series,
            CatalogKind::ContinueWatching => &self.continue_watching,
        }
    }
}

/// Fetches one JSON document.
pub trait Fetch {
    fn fetch_json(&self, source: &Source) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// The real fetcher: HTTP via reqwest, local files via tokio::fs.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

impl Fetch for CatalogClient {
    async fn fetch_json(&self, source: &Source) -> Result<Value, FetchError> {
        match source {
            Source::Url(url) => {
                let response = self.http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status.as_u16()));
                }
                let body = response.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            Source::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FetchError::Io {
                        path: path.clone(),
                        source,
                    })?;
                Ok(serde_json::from_str(&text)?)
            }
        }
    }
}

/// Result of a load attempt after the degrade policy is applied.
#[derive(Debug)]
pub struct LoadOutcome {
    pub catalog: RawCatalog,
    /// Set when a required collection failed and everything was emptied.
    pub degraded: Option<LoadError>,
}

/// One line of an endpoint check.
#[derive(Debug)]
pub struct EndpointReport {
    pub kind: CatalogKind,
    pub source: Source,
    pub outcome: EndpointOutcome,
}

#[derive(Debug)]
pub enum EndpointOutcome {
    Items(usize),
    NotAList(&'static str),
    Failed(FetchError),
}

impl fmt::Display for EndpointReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            EndpointOutcome::Items(n) => {
                write!(f, "✓ {}: Found {} items ({})", self.kind, n, self.source)
            }
            EndpointOutcome::NotAList(kind) => {
                write!(f, "⚠ {}: Not a list, got {} ({})", self.kind, kind, self.source)
            }
            EndpointOutcome::Failed(e) => write!(f, "✗ {}: {} ({})", self.kind, e, self.source),
        }
    }
}

pub struct CatalogLoader<F> {
    fetcher: F,
    endpoints: Endpoints,
    timeout: Duration,
}

impl<F: Fetch> CatalogLoader<F> {
    pub fn new(fetcher: F, endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            fetcher,
            endpoints,
            timeout,
        }
    }

    async fn fetch_one(&self, kind: CatalogKind) -> Result<Value, FetchError> {
        let source = self.endpoints.get(kind);
        match tokio::time::timeout(self.timeout, self.fetcher.fetch_json(source)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }

    /// Fetch all four collections concurrently. Every outcome is observed
    /// before any required failure is reported.
    pub async fn load(&self) -> Result<RawCatalog, LoadError> {
        info!("Loading catalog ({}ms timeout per request)", self.timeout.as_millis());
        let (carousel, movies, series, continue_watching) = tokio::join!(
            self.fetch_one(CatalogKind::Carousel),
            self.fetch_one(CatalogKind::Movies),
            self.fetch_one(CatalogKind::Series),
            self.fetch_one(CatalogKind::ContinueWatching),
        );

        // Checked in declaration order, so the first failing required
        // collection is the one reported.
        let settle = |kind: CatalogKind, result: Result<Value, FetchError>| match result {
            Ok(value) => Ok(value),
            Err(source) if kind.is_required() => Err(LoadError { kind, source }),
            Err(e) => {
                warn!("{} unavailable: {}", kind, e);
                Ok(Value::Array(Vec::new()))
            }
        };

        Ok(RawCatalog::from_values(
            settle(CatalogKind::Carousel, carousel)?,
            settle(CatalogKind::Movies, movies)?,
            settle(CatalogKind::Series, series)?,
            settle(CatalogKind::ContinueWatching, continue_watching)?,
        ))
    }

    /// [`load`](Self::load), falling back to an all-empty catalog.
    pub async fn load_or_degrade(&self) -> LoadOutcome {
        match self.load().await {
            Ok(catalog) => LoadOutcome {
                catalog,
                degraded: None,
            },
            Err(e) => {
                warn!("Error loading data: {}", e);
                LoadOutcome {
                    catalog: RawCatalog::empty(),
                    degraded: Some(e),
                }
            }
        }
    }

    /// Fetch every endpoint and describe what came back, without applying
    /// the degrade policy.
    pub async fn check_endpoints(&self) -> Vec<EndpointReport> {
        let (a, b, c, d) = tokio::join!(
            self.fetch_one(CatalogKind::Carousel),
            self.fetch_one(CatalogKind::Movies),
            self.fetch_one(CatalogKind::Series),
            self.fetch_one(CatalogKind::ContinueWatching),
        );
        CatalogKind::ALL
            .into_iter()
            .zip([a, b, c, d])
            .map(|(kind, result)| EndpointReport {
                kind,
                source: self.endpoints.get(kind).clone(),
                outcome: match result {
                    Ok(Value::Array(items)) => EndpointOutcome::Items(items.len()),
                    Ok(other) => EndpointOutcome::NotAList(json_kind(&other)),
                    Err(e) => EndpointOutcome::Failed(e),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Clone)]
    enum Reply {
        Json(Value),
        Status(u16),
        Hang,
    }

    #[derive(Clone, Default)]
    struct FakeFetcher {
        replies: HashMap<Source, Reply>,
    }

    impl FakeFetcher {
        fn with(mut self, kind: CatalogKind, reply: Reply) -> Self {
            self.replies.insert(endpoints().get(kind).clone(), reply);
            self
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch_json(&self, source: &Source) -> Result<Value, FetchError> {
            match self.replies.get(source).cloned() {
                Some(Reply::Json(v)) => Ok(v),
                Some(Reply::Status(code)) => Err(FetchError::Status(code)),
                Some(Reply::Hang) => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(json!([]))
                }
                None => Err(FetchError::Status(404)),
            }
        }
    }

    fn endpoints() -> Endpoints {
        let base = "http://catalog.test";
        Endpoints {
            carousel: Source::resolve(base, "/api/carousel"),
            movies: Source::resolve(base, "/api/movies"),
            series: Source::resolve(base, "/api/webseries"),
            continue_watching: Source::resolve(base, "/api/continue-watching"),
        }
    }

    fn loader(fetcher: FakeFetcher) -> CatalogLoader<FakeFetcher> {
        CatalogLoader::new(fetcher, endpoints(), Duration::from_millis(100))
    }

    fn healthy() -> FakeFetcher {
        FakeFetcher::default()
            .with(
                CatalogKind::Carousel,
                Reply::Json(json!([{"title": "A"}, {"title": "B"}, {"title": "C"}])),
            )
            .with(CatalogKind::Movies, Reply::Json(json!([])))
            .with(CatalogKind::Series, Reply::Json(json!([])))
            .with(CatalogKind::ContinueWatching, Reply::Json(json!([{"title": "R"}])))
    }

    #[test]
    fn sources_resolve_against_base_url() {
        assert_eq!(
            Source::resolve("http://127.0.0.1:5000/", "/api/movies"),
            Source::Url("http://127.0.0.1:5000/api/movies".into())
        );
        assert_eq!(
            Source::resolve("http://ignored", "https://cdn.test/movies.json"),
            Source::Url("https://cdn.test/movies.json".into())
        );
        assert_eq!(
            Source::resolve("http://ignored", "file:///srv/data/movies.json"),
            Source::File(PathBuf::from("/srv/data/movies.json"))
        );
    }

    #[tokio::test]
    async fn loads_all_four_collections() {
        let raw = loader(healthy()).load().await.unwrap();
        assert_eq!(raw.carousel.len(), 3);
        assert_eq!(raw.continue_watching.len(), 1);
    }

    #[tokio::test]
    async fn non_array_required_payload_becomes_empty() {
        let fetcher = healthy().with(CatalogKind::Movies, Reply::Json(json!({"movies": [1, 2]})));
        let raw = loader(fetcher).load().await.unwrap();
        assert!(raw.movies.is_empty());
        assert_eq!(raw.carousel.len(), 3);
    }

    #[tokio::test]
    async fn optional_timeout_only_empties_continue_watching() {
        let fetcher = healthy().with(CatalogKind::ContinueWatching, Reply::Hang);
        let outcome = loader(fetcher).load_or_degrade().await;
        assert!(outcome.degraded.is_none());
        assert_eq!(outcome.catalog.carousel.len(), 3);
        assert!(outcome.catalog.continue_watching.is_empty());
    }

    #[tokio::test]
    async fn optional_error_status_is_tolerated() {
        let fetcher = healthy().with(CatalogKind::ContinueWatching, Reply::Status(500));
        let outcome = loader(fetcher).load_or_degrade().await;
        assert!(outcome.degraded.is_none());
        assert!(outcome.catalog.continue_watching.is_empty());
    }

    #[tokio::test]
    async fn required_failure_degrades_everything() {
        let fetcher = healthy().with(CatalogKind::Series, Reply::Status(502));
        let outcome = loader(fetcher).load_or_degrade().await;
        let err = outcome.degraded.expect("series failure should degrade");
        assert_eq!(err.kind, CatalogKind::Series);
        assert!(matches!(err.source, FetchError::Status(502)));
        assert!(outcome.catalog.is_empty());
    }

    #[tokio::test]
    async fn only_required_collections_fail_the_load() {
        for kind in CatalogKind::ALL {
            let fetcher = healthy().with(kind, Reply::Status(500));
            let result = loader(fetcher).load().await;
            match result {
                Err(e) => {
                    assert!(kind.is_required(), "{} should be optional", kind);
                    assert_eq!(e.kind, kind);
                }
                Ok(raw) => {
                    assert!(!kind.is_required(), "{} should be required", kind);
                    assert!(raw.continue_watching.is_empty());
                }
            }
        }
    }

    #[tokio::test]
    async fn first_failing_required_collection_is_reported() {
        let fetcher = healthy()
            .with(CatalogKind::Movies, Reply::Hang)
            .with(CatalogKind::Series, Reply::Status(500));
        let err = loader(fetcher).load().await.unwrap_err();
        assert_eq!(err.kind, CatalogKind::Movies);
        assert!(matches!(err.source, FetchError::Timeout(_)));
    }

    #[tokio::test]
    async fn check_describes_each_endpoint() {
        let fetcher = healthy()
            .with(CatalogKind::Movies, Reply::Json(json!({"oops": true})))
            .with(CatalogKind::Series, Reply::Status(503));
        let reports = loader(fetcher).check_endpoints().await;
        let lines: Vec<String> = reports.iter().map(|r| r.to_string()).collect();
        assert!(lines[0].starts_with("✓ carousel: Found 3 items"));
        assert!(lines[1].starts_with("⚠ movies: Not a list, got object"));
        assert!(lines[2].starts_with("✗ webseries: HTTP 503"));
        assert!(lines[3].starts_with("✓ continue-watching: Found 1 items"));
    }

    #[tokio::test]
    async fn reads_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carousel.json");
        std::fs::write(&path, r#"[{"title": "From Disk"}]"#).unwrap();

        let client = CatalogClient::new().unwrap();
        let source = Source::resolve("http://unused", path.to_str().unwrap());
        assert_eq!(source, Source::File(path.clone()));
        let value = client.fetch_json(&source).await.unwrap();
        assert_eq!(value[0]["title"], "From Disk");

        let missing = Source::File(dir.path().join("missing.json"));
        assert!(matches!(
            client.fetch_json(&missing).await,
            Err(FetchError::Io { .. })
        ));
    }
}
