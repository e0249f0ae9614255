//! bookclub-dash - Book club rotation dashboard
//!
//! Serves the dashboard page and its JSON API. Record store connection
//! parameters are mandatory; the process refuses to start without them.

use anyhow::{Context, Result};
use bookclub_common::config::{load_config, CONFIG_ENV_VAR};
use bookclub_dash::build_info::BuildInfo;
use bookclub_dash::covers::{CoverLookup, GoogleBooksClient, GOOGLE_BOOKS_BASE_URL};
use bookclub_dash::picks::PickBook;
use bookclub_dash::store::RestStore;
use bookclub_dash::{build_router, AppState};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for bookclub-dash
#[derive(Parser, Debug)]
#[command(name = "bookclub-dash")]
#[command(about = "Book club rotation dashboard")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "BOOKCLUB_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "BOOKCLUB_PORT")]
    port: u16,

    /// Record store base endpoint
    #[arg(long, env = "BOOKCLUB_STORE_URL")]
    store_url: String,

    /// Record store access key
    #[arg(long, env = "BOOKCLUB_STORE_KEY", hide_env_values = true)]
    store_key: String,

    /// Book metadata API base URL
    #[arg(long, default_value = GOOGLE_BOOKS_BASE_URL, env = "BOOKCLUB_COVER_API_URL")]
    cover_api_url: String,

    /// TOML config file (member rotation, log level)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config first: it carries the log level
    let loaded = load_config(args.config.as_deref(), CONFIG_ENV_VAR)
        .context("Failed to load configuration file")?;

    let level = loaded.config.log_level();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "bookclub_dash={level},bookclub_common={level},tower_http=info"
                )
                .into()
            }),
        )
        .init();

    info!("Starting Book Club Dashboard (bookclub-dash) {}", BuildInfo::CURRENT);

    match (&loaded.path, loaded.found) {
        (Some(path), true) => info!("Config file: {}", path.display()),
        (Some(path), false) => warn!("Config file not found at {}, using defaults", path.display()),
        (None, _) => warn!("No config directory available, using defaults"),
    }

    let rotation = loaded.config.rotation().context("Invalid member rotation")?;
    info!("Member rotation: {}", rotation.members().join(", "));

    let store = RestStore::new(&args.store_url, &args.store_key)
        .context("Invalid record store configuration")?;
    info!("Record store: {}", store.base_url());

    let cover_source = GoogleBooksClient::new(&args.cover_api_url)
        .context("Failed to build cover lookup client")?;

    let picks = PickBook::new(Arc::new(store), rotation);
    let initial = picks.load_all().await;
    match picks.error().await {
        Some(e) => warn!("Initial load failed, starting with an empty list: {}", e),
        None => info!("Loaded {} book picks", initial.len()),
    }

    let state = AppState::new(picks, CoverLookup::new(Arc::new(cover_source)));
    let app = build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("bookclub-dash listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("bookclub-dash stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
