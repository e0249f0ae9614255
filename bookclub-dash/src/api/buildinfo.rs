//! GET /api/buildinfo, shown in the page footer

use axum::Json;

use crate::build_info::BuildInfo;

pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::CURRENT)
}
