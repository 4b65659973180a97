//! Quote (purchase request) handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{AddQuoteItems, CreateQuote, Quote, QuoteDetail, QuoteItem, UpdateQuote};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

pub fn quote_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quotes).post(create_quote))
        .route("/:id", get(get_quote).patch(update_quote).delete(delete_quote))
        .route("/:id/items", post(add_quote_items))
}

/// Create a quote with its requested items; the caller is the requester
#[utoipa::path(
    post,
    path = "/quotes",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    request_body = CreateQuote,
    responses(
        (status = 201, description = "Quote created", body = QuoteDetail),
        (status = 400, description = "Validation error or unknown product/department")
    )
)]
pub async fn create_quote(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateQuote>,
) -> AppResult<Created<QuoteDetail>> {
    let quote = state
        .services
        .quotes()
        .create_quote(current_user.id, input)
        .await?;
    Ok(Created(quote))
}

#[utoipa::path(
    get,
    path = "/quotes",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Page of quotes", body = [Quote]))
)]
pub async fn list_quotes(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Paginated<Quote>>> {
    Ok(Json(state.services.quotes().list_quotes(params).await?))
}

#[utoipa::path(
    get,
    path = "/quotes/{id}",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote with its items", body = QuoteDetail),
        (status = 404, description = "Quote not found")
    )
)]
pub async fn get_quote(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<QuoteDetail>>> {
    Ok(Json(ApiResponse::success(
        state.services.quotes().get_quote(id).await?,
    )))
}

#[utoipa::path(
    patch,
    path = "/quotes/{id}",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Quote ID")),
    request_body = UpdateQuote,
    responses(
        (status = 200, description = "Quote updated", body = Quote),
        (status = 404, description = "Quote not found")
    )
)]
pub async fn update_quote(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateQuote>,
) -> AppResult<Json<ApiResponse<Quote>>> {
    let quote = state.services.quotes().update_quote(id, input).await?;
    Ok(Json(ApiResponse::success(quote)))
}

#[utoipa::path(
    delete,
    path = "/quotes/{id}",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 204, description = "Quote and its items deleted"),
        (status = 404, description = "Quote not found")
    )
)]
pub async fn delete_quote(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    state.services.quotes().delete_quote(id).await?;
    Ok(NoContent)
}

/// Append requested items to a quote
#[utoipa::path(
    post,
    path = "/quotes/{id}/items",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Quote ID")),
    request_body = AddQuoteItems,
    responses(
        (status = 201, description = "Items added", body = [QuoteItem]),
        (status = 404, description = "Quote not found")
    )
)]
pub async fn add_quote_items(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<AddQuoteItems>,
) -> AppResult<Created<Vec<QuoteItem>>> {
    Ok(Created(state.services.quotes().add_items(id, input).await?))
}
