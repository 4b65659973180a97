//! Supplier handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreateSupplier, Supplier, UpdateSupplier};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/:id",
            get(get_supplier).patch(update_supplier).delete(delete_supplier),
        )
}

#[utoipa::path(
    post,
    path = "/suppliers",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateSupplier,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 409, description = "Tax id already registered")
    )
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSupplier>,
) -> AppResult<Created<Supplier>> {
    Ok(Created(state.services.suppliers().create_supplier(input).await?))
}

#[utoipa::path(
    get,
    path = "/suppliers",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Page of suppliers", body = [Supplier]))
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Paginated<Supplier>>> {
    Ok(Json(state.services.suppliers().list_suppliers(params).await?))
}

#[utoipa::path(
    get,
    path = "/suppliers/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier", body = Supplier),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    let supplier = state.services.suppliers().get_supplier(id).await?;
    Ok(Json(ApiResponse::success(supplier)))
}

#[utoipa::path(
    patch,
    path = "/suppliers/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Supplier ID")),
    request_body = UpdateSupplier,
    responses(
        (status = 200, description = "Supplier updated", body = Supplier),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateSupplier>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    let supplier = state.services.suppliers().update_supplier(id, input).await?;
    Ok(Json(ApiResponse::success(supplier)))
}

#[utoipa::path(
    delete,
    path = "/suppliers/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Supplier ID")),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 400, description = "Supplier still referenced by offers or orders"),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    state.services.suppliers().delete_supplier(id).await?;
    Ok(NoContent)
}
