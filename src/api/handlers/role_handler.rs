//! Role handlers. Mutations are admin only.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateRole, Role, UpdateRole};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

pub fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route(
            "/:id",
            get(get_role)
                .patch(update_role)
                .delete(delete_role),
        )
}

#[utoipa::path(
    post,
    path = "/roles",
    tag = "Organization",
    security(("bearer_auth" = [])),
    request_body = CreateRole,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_role(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateRole>,
) -> AppResult<Created<Role>> {
    require_admin(&current_user)?;
    let role = state.services.roles().create_role(input).await?;
    Ok(Created(role))
}

#[utoipa::path(
    get,
    path = "/roles",
    tag = "Organization",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Page of roles", body = [Role]))
)]
pub async fn list_roles(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Paginated<Role>>> {
    Ok(Json(state.services.roles().list_roles(params).await?))
}

#[utoipa::path(
    get,
    path = "/roles/{id}",
    tag = "Organization",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = Role),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Role>>> {
    let role = state.services.roles().get_role(id).await?;
    Ok(Json(ApiResponse::success(role)))
}

#[utoipa::path(
    patch,
    path = "/roles/{id}",
    tag = "Organization",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role ID")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = Role),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn update_role(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateRole>,
) -> AppResult<Json<ApiResponse<Role>>> {
    require_admin(&current_user)?;
    let role = state.services.roles().update_role(id, input).await?;
    Ok(Json(ApiResponse::success(role)))
}

#[utoipa::path(
    delete,
    path = "/roles/{id}",
    tag = "Organization",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn delete_role(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.services.roles().delete_role(id).await?;
    Ok(NoContent)
}
