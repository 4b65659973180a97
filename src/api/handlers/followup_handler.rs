//! Followup handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateFollowup, Followup, FollowupFilter, UpdateFollowup};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

pub fn followup_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_followups).post(create_followup))
        .route(
            "/:id",
            get(get_followup).patch(update_followup).delete(delete_followup),
        )
}

/// Record a followup; the caller becomes its author
#[utoipa::path(
    post,
    path = "/followups",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    request_body = CreateFollowup,
    responses(
        (status = 201, description = "Followup created", body = Followup),
        (status = 400, description = "Validation error or unknown purchase order")
    )
)]
pub async fn create_followup(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateFollowup>,
) -> AppResult<Created<Followup>> {
    let followup = state
        .services
        .followups()
        .create_followup(current_user.id, input)
        .await?;
    Ok(Created(followup))
}

#[utoipa::path(
    get,
    path = "/followups",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    params(PaginationParams, FollowupFilter),
    responses((status = 200, description = "Page of followups", body = [Followup]))
)]
pub async fn list_followups(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
    ApiQuery(filter): ApiQuery<FollowupFilter>,
) -> AppResult<Json<Paginated<Followup>>> {
    Ok(Json(
        state.services.followups().list_followups(params, filter).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/followups/{id}",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Followup ID")),
    responses(
        (status = 200, description = "Followup", body = Followup),
        (status = 404, description = "Followup not found")
    )
)]
pub async fn get_followup(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Followup>>> {
    let followup = state.services.followups().get_followup(id).await?;
    Ok(Json(ApiResponse::success(followup)))
}

#[utoipa::path(
    patch,
    path = "/followups/{id}",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Followup ID")),
    request_body = UpdateFollowup,
    responses(
        (status = 200, description = "Followup updated", body = Followup),
        (status = 404, description = "Followup not found")
    )
)]
pub async fn update_followup(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateFollowup>,
) -> AppResult<Json<ApiResponse<Followup>>> {
    let followup = state.services.followups().update_followup(id, input).await?;
    Ok(Json(ApiResponse::success(followup)))
}

#[utoipa::path(
    delete,
    path = "/followups/{id}",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Followup ID")),
    responses(
        (status = 204, description = "Followup deleted"),
        (status = 404, description = "Followup not found")
    )
)]
pub async fn delete_followup(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    state.services.followups().delete_followup(id).await?;
    Ok(NoContent)
}
