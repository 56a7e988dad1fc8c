//! End-to-end loading against a local HTTP server.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use marquee_core::carousel::{CarouselController, Viewport, DEFAULT_BREAKPOINT};
use marquee_core::config::Config;
use marquee_core::error::{CatalogKind, FetchError};
use marquee_core::loader::{CatalogClient, CatalogLoader};
use marquee_core::sections::{ContinueRow, MovieShelves};
use marquee_core::series::SeriesBrowser;
use marquee_core::view::{Backdrop, Region, ShelfId, Slot, Surface, TextField};
use marquee_core::ApplicationState;

async fn carousel() -> Json<Value> {
    Json(json!([
        {"title": "Dune", "rating": "8.1", "genres": ["Sci-Fi"], "hero_bg": "dune.jpg"},
        {"title": "Heat", "rating": 8.3},
        {"title": "Alien"}
    ]))
}

async fn movies() -> Json<Value> {
    Json(json!([
        {"title": "Nope", "category": "upcoming", "quality": "HD"},
        {"title": "Jaws", "category": "top-ten"},
        null
    ]))
}

async fn series() -> Json<Value> {
    Json(json!([{
        "title": "Dark",
        "seasons": 2,
        "seasonsData": {"1": [{"episode": 1, "title": "Secrets"}]}
    }]))
}

async fn continue_watching() -> Json<Value> {
    Json(json!([{"title": "Heat", "progress": 40}]))
}

async fn slow_continue_watching() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    continue_watching().await
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn not_a_list() -> Json<Value> {
    Json(json!({"data": []}))
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn healthy_routes() -> Router {
    Router::new()
        .route("/api/carousel", get(carousel))
        .route("/api/movies", get(movies))
        .route("/api/webseries", get(series))
}

fn loader_for(addr: SocketAddr, timeout_ms: u64) -> CatalogLoader<CatalogClient> {
    let mut config = Config::default();
    config.endpoints.base_url = format!("http://{}", addr);
    config.loader.timeout_ms = timeout_ms;
    CatalogLoader::new(
        CatalogClient::new().unwrap(),
        config.endpoints(),
        config.timeout(),
    )
}

#[tokio::test]
async fn loads_full_catalog_over_http() {
    let app = healthy_routes().route("/api/continue-watching", get(continue_watching));
    let addr = serve(app).await;

    let outcome = loader_for(addr, 2_000).load_or_degrade().await;
    assert!(outcome.degraded.is_none());

    let mut state = ApplicationState::new();
    state.populate(&outcome.catalog);
    assert_eq!(state.carousel.len(), 3);
    assert_eq!(state.movies.len(), 2);
    assert_eq!(state.series.len(), 1);
    assert_eq!(state.continue_watching.len(), 1);
    assert_eq!(state.series[0].episodes_for(1).len(), 1);
}

#[tokio::test]
async fn slow_optional_endpoint_leaves_the_rest_of_the_page_intact() {
    let app = healthy_routes().route("/api/continue-watching", get(slow_continue_watching));
    let addr = serve(app).await;

    let outcome = loader_for(addr, 300).load_or_degrade().await;
    assert!(outcome.degraded.is_none());

    let mut state = ApplicationState::new();
    state.populate(&outcome.catalog);
    let mut surface = Surface::new();
    let mut carousel = CarouselController::new(Viewport::default(), DEFAULT_BREAKPOINT);
    carousel.initial_render(&state, &mut surface);
    MovieShelves::new().initial_render(&state, &mut surface);
    ContinueRow::new().initial_render(&state, &mut surface);
    SeriesBrowser::new().initial_render(&mut state, &mut surface);

    assert!(surface.is_visible(Region::Hero));
    assert_eq!(surface.items(Slot::VerticalRail).len(), 3);
    assert_eq!(surface.active_index(Slot::VerticalRail), Some(0));
    assert_eq!(surface.text(TextField::HeroTitle), "Dune");
    assert!(!surface.is_visible(Region::ContinueWatching));
    assert!(surface.items(Slot::ContinueRow).is_empty());
    assert!(surface.is_visible(Region::SeriesSection));
}

#[tokio::test]
async fn carousel_only_catalog_with_a_stalled_resume_feed() {
    let app = Router::new()
        .route("/api/carousel", get(carousel))
        .route("/api/movies", get(empty_list))
        .route("/api/webseries", get(empty_list))
        .route("/api/continue-watching", get(slow_continue_watching));
    let addr = serve(app).await;

    let outcome = loader_for(addr, 300).load_or_degrade().await;
    assert!(outcome.degraded.is_none(), "an optional timeout must not degrade");

    let mut state = ApplicationState::new();
    state.populate(&outcome.catalog);
    assert_eq!(state.carousel.len(), 3);
    assert!(state.movies.is_empty());
    assert!(state.series.is_empty());
    assert!(state.continue_watching.is_empty());

    let mut surface = Surface::new();
    let mut carousel = CarouselController::new(Viewport::default(), DEFAULT_BREAKPOINT);
    carousel.initial_render(&state, &mut surface);
    MovieShelves::new().initial_render(&state, &mut surface);
    ContinueRow::new().initial_render(&state, &mut surface);
    SeriesBrowser::new().initial_render(&mut state, &mut surface);

    assert!(surface.is_visible(Region::Hero));
    assert_eq!(surface.text(TextField::HeroTitle), "Dune");
    assert_eq!(surface.background(Backdrop::Hero), Some("dune.jpg"));
    assert_eq!(surface.active_index(Slot::VerticalRail), Some(0));
    assert_eq!(surface.active_index(Slot::HorizontalRail), Some(0));

    assert!(!surface.is_visible(Region::ContinueWatching));
    assert!(!surface.is_visible(Region::SeriesSection));
    assert!(surface.items(Slot::EpisodeList).is_empty());
    for shelf in ShelfId::ALL {
        assert!(!surface.is_visible(Region::Shelf(shelf)), "{:?} shown", shelf);
    }
}

#[tokio::test]
async fn failing_required_endpoint_degrades_to_empty_catalog() {
    let app = Router::new()
        .route("/api/carousel", get(carousel))
        .route("/api/movies", get(broken))
        .route("/api/webseries", get(series))
        .route("/api/continue-watching", get(continue_watching));
    let addr = serve(app).await;

    let outcome = loader_for(addr, 2_000).load_or_degrade().await;
    let err = outcome.degraded.expect("movies failure should degrade");
    assert_eq!(err.kind, CatalogKind::Movies);
    assert!(matches!(err.source, FetchError::Status(500)));
    assert!(outcome.catalog.is_empty());
    assert_eq!(err.to_string(), "movies API error: HTTP 500");
}

#[tokio::test]
async fn object_payload_is_an_empty_collection_not_an_error() {
    let app = healthy_routes().route("/api/continue-watching", get(not_a_list));
    let addr = serve(app).await;

    let loader = loader_for(addr, 2_000);
    let outcome = loader.load_or_degrade().await;
    assert!(outcome.degraded.is_none());
    assert!(outcome.catalog.continue_watching.is_empty());

    let lines: Vec<String> = loader.check_endpoints().await.iter().map(|r| r.to_string()).collect();
    assert!(lines[0].starts_with("✓ carousel: Found 3 items"));
    assert!(lines[3].starts_with("⚠ continue-watching: Not a list"));
}

#[tokio::test]
async fn missing_route_is_reported_by_status() {
    let addr = serve(healthy_routes()).await;
    let reports = loader_for(addr, 2_000).check_endpoints().await;
    assert!(reports[3].to_string().starts_with("✗ continue-watching: HTTP 404"));
}
