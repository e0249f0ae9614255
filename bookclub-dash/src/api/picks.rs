//! Pick listing and submission

use axum::{extract::State, Json};
use bookclub_common::{BookPick, Month};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// Body of POST /api/picks
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub month: Month,
    pub year: i32,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub link: Option<String>,
    /// Defaults to the stored or predicted member for the slot
    #[serde(default)]
    pub member: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}

/// GET /api/picks
///
/// The in-memory list as last loaded, newest first.
pub async fn list_picks(State(state): State<AppState>) -> Json<Vec<BookPick>> {
    Json(state.picks.snapshot().await)
}

/// POST /api/picks
///
/// Empty titles or authors are rejected here, before the data layer sees
/// them. A store failure maps to 502 so the page keeps the user's input.
pub async fn submit_pick(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let title = request.title.trim();
    let author = request.author.trim();
    if title.is_empty() || author.is_empty() {
        return Err(ApiError::BadRequest(
            "Both title and author are required".to_string(),
        ));
    }

    let member = match request.member.as_deref().map(str::trim) {
        Some(member) if !member.is_empty() => member.to_string(),
        _ => state.picks.predict_member(request.month, request.year).await,
    };

    let saved = state
        .picks
        .submit(
            request.month,
            request.year,
            &member,
            title,
            author,
            request.link.as_deref().map(str::trim),
        )
        .await;

    if !saved {
        return Err(ApiError::Upstream(format!(
            "Could not save the pick for {} {}",
            request.month, request.year
        )));
    }

    Ok(Json(SubmitResponse { success: true }))
}
