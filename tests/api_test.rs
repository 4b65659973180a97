//! Integration tests for the HTTP surface and error mapping.
//!
//! Handlers run against stub services, so no database or Redis is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use chrono::Utc;
use sea_orm::{DbErr, RuntimeErr};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use procurement_api::domain::{
    AddOfferLines, CreateOffer, LinesAdded, Offer, OfferDetail, OfferLine, UpdateOffer,
    UpdateOfferLine, User,
};
use procurement_api::errors::{AppError, AppResult, DbFailure, ServerError, INTERNAL_ERROR_MESSAGE};
use procurement_api::services::{
    AuthService, Claims, DashboardService, DepartmentService, FollowupService, OfferService,
    ProductService, PurchaseOrderService, QuoteService, RoleService, ServiceContainer,
    SupplierService, TokenResponse, UserService,
};
use procurement_api::types::{Paginated, PaginationParams};
use procurement_api::{create_router, AppState};

// =============================================================================
// Stub services
// =============================================================================

const BUYER_TOKEN: &str = "buyer-token";

struct StubAuth;

#[async_trait]
impl AuthService for StubAuth {
    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        Err(AppError::InvalidCredentials)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token != BUYER_TOKEN {
            return Err(AppError::Unauthorized);
        }
        Ok(Claims {
            sub: Uuid::new_v4(),
            email: "buyer@example.com".to_string(),
            role: "buyer".to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }

    fn issue_token(&self, _user: &User, _role: &str) -> AppResult<TokenResponse> {
        Err(AppError::internal("not used"))
    }
}

/// Offers whose database is unreachable, except for creation
struct StubOffers;

#[async_trait]
impl OfferService for StubOffers {
    async fn create_offer(&self, input: CreateOffer) -> AppResult<Offer> {
        Ok(Offer {
            id: Uuid::new_v4(),
            quote_id: input.quote_id,
            supplier_id: input.supplier_id,
            currency: input.currency,
            valid_until: input.valid_until,
            notes: input.notes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn get_offer(&self, _id: Uuid) -> AppResult<OfferDetail> {
        Err(AppError::NotFound)
    }

    async fn list_offers(&self, _params: PaginationParams) -> AppResult<Paginated<Offer>> {
        Err(AppError::Database(DbErr::Conn(RuntimeErr::Internal(
            "connection refused by 10.0.0.5:5432".to_string(),
        ))))
    }

    async fn list_by_quote(&self, _quote_id: Uuid) -> AppResult<Vec<OfferDetail>> {
        Ok(Vec::new())
    }

    async fn update_offer(&self, _id: Uuid, _input: UpdateOffer) -> AppResult<Offer> {
        Err(AppError::Database(DbErr::Type("invalid date".to_string())))
    }

    async fn delete_offer(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }

    async fn add_lines(&self, _offer_id: Uuid, input: AddOfferLines) -> AppResult<LinesAdded> {
        Ok(LinesAdded::new(input.lines.len(), 1))
    }

    async fn update_line(&self, _line_id: Uuid, _input: UpdateOfferLine) -> AppResult<OfferLine> {
        Err(AppError::NotFound)
    }

    async fn delete_line(&self, _line_id: Uuid) -> AppResult<()> {
        Err(AppError::NotFound)
    }
}

/// Only authentication and offers are wired; other routes are not exercised.
struct StubServices;

impl ServiceContainer for StubServices {
    fn auth(&self) -> Arc<dyn AuthService> {
        Arc::new(StubAuth)
    }

    fn offers(&self) -> Arc<dyn OfferService> {
        Arc::new(StubOffers)
    }

    fn departments(&self) -> Arc<dyn DepartmentService> {
        unimplemented!("departments are not wired in these tests")
    }

    fn roles(&self) -> Arc<dyn RoleService> {
        unimplemented!("roles are not wired in these tests")
    }

    fn users(&self) -> Arc<dyn UserService> {
        unimplemented!("users are not wired in these tests")
    }

    fn suppliers(&self) -> Arc<dyn SupplierService> {
        unimplemented!("suppliers are not wired in these tests")
    }

    fn products(&self) -> Arc<dyn ProductService> {
        unimplemented!("products are not wired in these tests")
    }

    fn quotes(&self) -> Arc<dyn QuoteService> {
        unimplemented!("quotes are not wired in these tests")
    }

    fn purchase_orders(&self) -> Arc<dyn PurchaseOrderService> {
        unimplemented!("purchase orders are not wired in these tests")
    }

    fn followups(&self) -> Arc<dyn FollowupService> {
        unimplemented!("followups are not wired in these tests")
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        unimplemented!("dashboard is not wired in these tests")
    }
}

async fn send(method: Method, uri: &str, token: Option<&str>, body: Option<&str>) -> (StatusCode, String) {
    let app = create_router(AppState::new(Arc::new(StubServices)));

    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

// =============================================================================
// HTTP error mapping
// =============================================================================

#[tokio::test]
async fn test_unclassified_database_error_is_generic_500() {
    let (status, body) = send(Method::GET, "/offers", Some(BUYER_TOKEN), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["error"]["message"], INTERNAL_ERROR_MESSAGE);
    assert!(!body.contains("10.0.0.5"));
}

#[tokio::test]
async fn test_orm_validation_error_is_400() {
    let (status, body) = send(
        Method::PATCH,
        &format!("/offers/{}", Uuid::new_v4()),
        Some(BUYER_TOKEN),
        Some("{}"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"]["code"], "DATA_VALIDATION_ERROR");
}

#[tokio::test]
async fn test_not_found_passes_through() {
    let (status, body) = send(
        Method::GET,
        &format!("/offers/{}", Uuid::new_v4()),
        Some(BUYER_TOKEN),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_json_keeps_framework_status() {
    let (status, body) = send(Method::POST, "/offers", Some(BUYER_TOKEN), Some("{\"quoteId\":")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let (status, body) = send(Method::GET, "/offers", Some("forged"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json(&body)["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_failed_login_is_uniform() {
    let (status, body) = send(
        Method::POST,
        "/auth/login",
        None,
        Some(r#"{"email":"nobody@example.com","password":"whatever"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json(&body)["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_admin_routes_reject_buyers() {
    let (status, _) = send(
        Method::PATCH,
        &format!("/users/{}", Uuid::new_v4()),
        Some(BUYER_TOKEN),
        Some("{}"),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Envelopes
// =============================================================================

#[tokio::test]
async fn test_created_offer_envelope() {
    let payload = format!(
        r#"{{"quoteId":"{}","supplierId":"{}","currency":"EUR"}}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    let (status, body) = send(Method::POST, "/offers", Some(BUYER_TOKEN), Some(&payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["currency"], "EUR");
}

#[tokio::test]
async fn test_add_lines_reports_skipped() {
    let item = Uuid::new_v4();
    let payload = format!(
        r#"{{"lines":[{{"prItemId":"{item}","unitPrice":"2.00"}},{{"prItemId":"{item}","unitPrice":"1.50"}}]}}"#
    );
    let (status, body) = send(
        Method::POST,
        &format!("/offers/{}/lines", Uuid::new_v4()),
        Some(BUYER_TOKEN),
        Some(&payload),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["skipped"], 1);
}

#[tokio::test]
async fn test_delete_is_no_content() {
    let (status, body) = send(
        Method::DELETE,
        &format!("/offers/{}", Uuid::new_v4()),
        Some(BUYER_TOKEN),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_health_without_infrastructure_is_degraded() {
    let (status, body) = send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json(&body)["status"], "degraded");
}

#[tokio::test]
async fn test_root_endpoint() {
    let (status, body) = send(Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Procurement API");
}

// =============================================================================
// Error classification through the public API
// =============================================================================

#[test]
fn test_sqlstate_classification() {
    let unique = ServerError::new("23505", "duplicate key value")
        .with_detail("Key (quote_id, supplier_id)=(a, b) already exists.");
    assert_eq!(
        DbFailure::from_server_error(&unique),
        DbFailure::UniqueViolation {
            fields: vec!["quoteId".to_string(), "supplierId".to_string()]
        }
    );

    let foreign = ServerError::new("23503", "violates foreign key constraint");
    assert!(matches!(
        DbFailure::from_server_error(&foreign),
        DbFailure::ForeignKeyViolation { .. }
    ));

    let timeout = ServerError::new("57014", "canceling statement due to statement timeout");
    assert_eq!(DbFailure::from_server_error(&timeout), DbFailure::Unclassified);
}

#[test]
fn test_pagination_meta() {
    let page = Paginated::new(vec![1, 2, 3], &PaginationParams::new(3, 10), 23);

    assert_eq!(page.meta.page, 3);
    assert_eq!(page.meta.per_page, 10);
    assert_eq!(page.meta.total_pages, 3);
}
