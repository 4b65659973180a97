//! Department handlers. Mutations are admin only.

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
use crate::domain::{CreateDepartment, Department, UpdateDepartment};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/:id",
            get(get_department)
                .patch(update_department)
                .delete(delete_department),
        )
}

#[utoipa::path(
    post,
    path = "/departments",
    tag = "Organization",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateDepartment>,
) -> AppResult<Created<Department>> {
    require_admin(&current_user)?;
    let department = state.services.departments().create_department(input).await?;
    Ok(Created(department))
}

#[utoipa::path(
    get,
    path = "/departments",
    tag = "Organization",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Page of departments", body = [Department]))
)]
pub async fn list_departments(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Paginated<Department>>> {
    Ok(Json(state.services.departments().list_departments(params).await?))
}

#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "Organization",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let department = state.services.departments().get_department(id).await?;
    Ok(Json(ApiResponse::success(department)))
}

#[utoipa::path(
    patch,
    path = "/departments/{id}",
    tag = "Organization",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn update_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateDepartment>,
) -> AppResult<Json<ApiResponse<Department>>> {
    require_admin(&current_user)?;
    let department = state.services.departments().update_department(id, input).await?;
    Ok(Json(ApiResponse::success(department)))
}

#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "Organization",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.services.departments().delete_department(id).await?;
    Ok(NoContent)
}
