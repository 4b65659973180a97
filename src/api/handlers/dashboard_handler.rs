//! Dashboard handler.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::DashboardSummary;
use crate::types::ApiResponse;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/summary", get(summary))
}

/// Headline counts across the procurement workflow
#[utoipa::path(
    get,
    path = "/dashboard/summary",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Summary counts", body = DashboardSummary))
)]
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    Ok(Json(ApiResponse::success(
        state.services.dashboard().summary().await?,
    )))
}
