//! Offer handlers: supplier offers on a quote and their priced lines.

use axum::{
    extract::State,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::api::AppState;
use crate::domain::{
    AddOfferLines, CreateOffer, LinesAdded, Offer, OfferDetail, OfferLine, UpdateOffer,
    UpdateOfferLine,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

pub fn offer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_offers).post(create_offer))
        .route("/by-quote/:quote_id", get(list_offers_by_quote))
        .route("/lines/:line_id", patch(update_offer_line).delete(delete_offer_line))
        .route("/:id", get(get_offer).patch(update_offer).delete(delete_offer))
        .route("/:id/lines", post(add_offer_lines))
}

#[utoipa::path(
    post,
    path = "/offers",
    tag = "Offers",
    security(("bearer_auth" = [])),
    request_body = CreateOffer,
    responses(
        (status = 201, description = "Offer created", body = Offer),
        (status = 400, description = "Validation error or unknown quote/supplier"),
        (status = 409, description = "Supplier already submitted an offer for this quote")
    )
)]
pub async fn create_offer(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateOffer>,
) -> AppResult<Created<Offer>> {
    Ok(Created(state.services.offers().create_offer(input).await?))
}

#[utoipa::path(
    get,
    path = "/offers",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Page of offers", body = [Offer]))
)]
pub async fn list_offers(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Paginated<Offer>>> {
    Ok(Json(state.services.offers().list_offers(params).await?))
}

/// Every offer on a quote, each with its lines
#[utoipa::path(
    get,
    path = "/offers/by-quote/{quote_id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses((status = 200, description = "Offers with lines", body = [OfferDetail]))
)]
pub async fn list_offers_by_quote(
    State(state): State<AppState>,
    ApiPath(quote_id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<OfferDetail>>>> {
    let offers = state.services.offers().list_by_quote(quote_id).await?;
    Ok(Json(ApiResponse::success(offers)))
}

#[utoipa::path(
    get,
    path = "/offers/{id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Offer ID")),
    responses(
        (status = 200, description = "Offer with its lines", body = OfferDetail),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn get_offer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ApiResponse<OfferDetail>>> {
    let offer = state.services.offers().get_offer(id).await?;
    Ok(Json(ApiResponse::success(offer)))
}

#[utoipa::path(
    patch,
    path = "/offers/{id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Offer ID")),
    request_body = UpdateOffer,
    responses(
        (status = 200, description = "Offer updated", body = Offer),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn update_offer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateOffer>,
) -> AppResult<Json<ApiResponse<Offer>>> {
    let offer = state.services.offers().update_offer(id, input).await?;
    Ok(Json(ApiResponse::success(offer)))
}

#[utoipa::path(
    delete,
    path = "/offers/{id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Offer ID")),
    responses(
        (status = 204, description = "Offer and its lines deleted"),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn delete_offer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    state.services.offers().delete_offer(id).await?;
    Ok(NoContent)
}

/// Add priced lines to an offer.
///
/// Lines for quote items that already have a line on this offer, and
/// repeats within the batch, are skipped rather than rejected.
#[utoipa::path(
    post,
    path = "/offers/{id}/lines",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Offer ID")),
    request_body = AddOfferLines,
    responses(
        (status = 201, description = "Lines stored; duplicates skipped", body = LinesAdded),
        (status = 400, description = "Empty batch, invalid line or unknown quote item"),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn add_offer_lines(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<AddOfferLines>,
) -> AppResult<Created<LinesAdded>> {
    Ok(Created(state.services.offers().add_lines(id, input).await?))
}

#[utoipa::path(
    patch,
    path = "/offers/lines/{line_id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("line_id" = Uuid, Path, description = "Offer line ID")),
    request_body = UpdateOfferLine,
    responses(
        (status = 200, description = "Line updated", body = OfferLine),
        (status = 404, description = "Line not found")
    )
)]
pub async fn update_offer_line(
    State(state): State<AppState>,
    ApiPath(line_id): ApiPath<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateOfferLine>,
) -> AppResult<Json<ApiResponse<OfferLine>>> {
    let line = state.services.offers().update_line(line_id, input).await?;
    Ok(Json(ApiResponse::success(line)))
}

#[utoipa::path(
    delete,
    path = "/offers/lines/{line_id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("line_id" = Uuid, Path, description = "Offer line ID")),
    responses(
        (status = 204, description = "Line deleted"),
        (status = 404, description = "Line not found")
    )
)]
pub async fn delete_offer_line(
    State(state): State<AppState>,
    ApiPath(line_id): ApiPath<Uuid>,
) -> AppResult<NoContent> {
    state.services.offers().delete_line(line_id).await?;
    Ok(NoContent)
}
