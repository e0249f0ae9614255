//! bookclub-dash library - Book club rotation dashboard
//!
//! Serves a single-page dashboard over a hosted record store of book picks,
//! with cover images from an external book metadata service.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod build_info;
pub mod covers;
pub mod error;
pub mod picks;
pub mod store;
pub mod views;

use covers::CoverLookup;
use picks::PickBook;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// In-memory pick list backed by the record store
    pub picks: Arc<PickBook>,
    /// Cover resolver with its process-lifetime memo table
    pub covers: Arc<CoverLookup>,
}

impl AppState {
    /// Create new application state
    pub fn new(picks: PickBook, covers: CoverLookup) -> Self {
        Self {
            picks: Arc::new(picks),
            covers: Arc::new(covers),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/picks", get(api::list_picks).post(api::submit_pick))
        .route("/api/cover", get(api::get_cover))
        .route("/api/buildinfo", get(api::get_build_info));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/:name", get(api::serve_asset))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
