//! Purchase order handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreatePurchaseOrder, PurchaseOrder, UpdatePurchaseOrder};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

pub fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchase_orders).post(create_purchase_order))
        .route(
            "/:id",
            get(get_purchase_order).patch(update_purchase_order).delete(delete_purchase_order),
        )
}

#[utoipa::path(
    post,
    path = "/purchase-orders",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    request_body = CreatePurchaseOrder,
    responses(
        (status = 201, description = "Purchase order created", body = PurchaseOrder),
        (status = 409, description = "Order number already in use")
    )
)]
pub async fn create_purchase_order(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreatePurchaseOrder>,
) -> AppResult<Created<PurchaseOrder>> {
    Ok(Created(state.services.purchase_orders().create_purchase_order(input).await?))
}

#[utoipa::path(
    get,
    path = "/purchase-orders",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Page of purchase orders", body = [PurchaseOrder]))
)]
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Paginated<PurchaseOrder>>> {
    Ok(Json(state.services.purchase_orders().list_purchase_orders(params).await?))
}

#[utoipa::path(
    get,
    path = "/purchase-orders/{id}",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Purchase order", body = PurchaseOrder),
        (status = 404, description = "Purchase order not found")
    )
)]
pub async fn get_purchase_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    let purchase_order = state.services.purchase_orders().get_purchase_order(id).await?;
    Ok(Json(ApiResponse::success(purchase_order)))
}

#[utoipa::path(
    patch,
    path = "/purchase-orders/{id}",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    request_body = UpdatePurchaseOrder,
    responses(
        (status = 200, description = "Purchase order updated", body = PurchaseOrder),
        (status = 404, description = "Purchase order not found")
    )
)]
pub async fn update_purchase_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdatePurchaseOrder>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    let purchase_order = state.services.purchase_orders().update_purchase_order(id, input).await?;
    Ok(Json(ApiResponse::success(purchase_order)))
}

#[utoipa::path(
    delete,
    path = "/purchase-orders/{id}",
    tag = "Purchase orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 204, description = "Purchase order and its followups deleted"),
        (status = 404, description = "Purchase order not found")
    )
)]
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    state.services.purchase_orders().delete_purchase_order(id).await?;
    Ok(NoContent)
}
