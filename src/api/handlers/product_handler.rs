//! Product handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 409, description = "SKU already in use")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> AppResult<Created<Product>> {
    Ok(Created(state.services.products().create_product(input).await?))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Page of products", body = [Product]))
)]
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Paginated<Product>>> {
    Ok(Json(state.services.products().list_products(params).await?))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state.services.products().get_product(id).await?;
    Ok(Json(ApiResponse::success(product)))
}

#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state.services.products().update_product(id, input).await?;
    Ok(Json(ApiResponse::success(product)))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Product still referenced by quote items"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    state.services.products().delete_product(id).await?;
    Ok(NoContent)
}
