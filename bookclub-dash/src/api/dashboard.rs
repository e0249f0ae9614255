//! Dashboard data endpoint

use axum::{extract::State, Json};

use crate::views::{build_dashboard, Dashboard};
use crate::AppState;

/// GET /api/dashboard
///
/// Re-fetches every row from the store, then derives all views. When the
/// fetch fails the views are built from the last good list and `error` is set.
pub async fn get_dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    state.picks.load_all().await;

    let picks = state.picks.snapshot().await;
    let error = state.picks.error().await;
    let today = state.picks.current_slot();

    Json(build_dashboard(&picks, state.picks.rotation(), today, error))
}
