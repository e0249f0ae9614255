//! Cover lookup endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverQuery {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct CoverResponse {
    /// Image URL, or null when no cover is available
    pub cover: Option<String>,
}

/// GET /api/cover?title=..&author=..
///
/// Never fails: lookup errors resolve to `{"cover": null}`.
pub async fn get_cover(
    State(state): State<AppState>,
    Query(query): Query<CoverQuery>,
) -> Json<CoverResponse> {
    let cover = state.covers.lookup(&query.title, &query.author).await;
    Json(CoverResponse { cover })
}
