mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod layout;
mod theme;
mod widgets;

use std::path::PathBuf;

use clap::Parser;

use marquee_core::config::Config;
use marquee_core::loader::{CatalogClient, CatalogLoader};
use marquee_core::notice::INIT_FAILURE;
use marquee_core::platform;

/// Browse a media catalog in the terminal.
#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
struct Args {
    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Query every endpoint, print what each one returned, and exit.
    #[arg(long)]
    check: bool,

    /// Override `endpoints.base_url` from the config.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_path = platform::log_path();
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("marquee log: {}", log_path.display());

    tracing::info!("marquee starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut init_failed = false;
    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config unusable, falling back to defaults: {}", e);
        init_failed = true;
        Config::default()
    });
    if let Some(url) = args.base_url {
        config.endpoints.base_url = url;
    }

    // ── Catalog loader ───────────────────────────────────────────────────────
    let loader = match CatalogClient::new() {
        Ok(client) => Some(CatalogLoader::new(
            client,
            config.endpoints(),
            config.timeout(),
        )),
        Err(e) => {
            tracing::error!("HTTP client setup failed: {}", e);
            init_failed = true;
            None
        }
    };

    if args.check {
        let Some(loader) = loader else {
            anyhow::bail!(INIT_FAILURE);
        };
        for report in loader.check_endpoints().await {
            println!("{}", report);
        }
        return Ok(());
    }

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(&config, loader, init_failed);
    app.run().await?;

    Ok(())
}
