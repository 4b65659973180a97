//! Router tests: real handlers and services over an in-memory offer store.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

use super::{create_router, AppState};
use crate::config::{Config, ROLE_BUYER};
use crate::domain::{
    CreateOffer, CreateOfferLine, Offer, OfferLine, UpdateOffer, UpdateOfferLine, User,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{MockUnitOfWork, OfferRepository};
use crate::services::{ServiceContainer, Services};
use crate::types::PaginationParams;

const SECRET: &str = "router-tests-secret-at-least-32-bytes";

/// Offer store with the same uniqueness rules as the database:
/// one offer per (quote, supplier), one line per (offer, quote item).
#[derive(Default)]
struct InMemoryOffers {
    offers: Mutex<Vec<Offer>>,
    lines: Mutex<Vec<OfferLine>>,
}

#[async_trait]
impl OfferRepository for InMemoryOffers {
    async fn create(&self, input: CreateOffer) -> AppResult<Offer> {
        let mut offers = self.offers.lock().unwrap();
        if offers
            .iter()
            .any(|o| o.quote_id == input.quote_id && o.supplier_id == input.supplier_id)
        {
            return Err(AppError::conflict("Offer"));
        }

        let now = Utc::now();
        let offer = Offer {
            id: Uuid::new_v4(),
            quote_id: input.quote_id,
            supplier_id: input.supplier_id,
            currency: input.currency,
            valid_until: input.valid_until,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        offers.push(offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Offer>> {
        Ok(self.offers.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self, _params: &PaginationParams) -> AppResult<(Vec<Offer>, u64)> {
        let offers = self.offers.lock().unwrap().clone();
        let total = offers.len() as u64;
        Ok((offers, total))
    }

    async fn list_by_quote(&self, quote_id: Uuid) -> AppResult<Vec<Offer>> {
        Ok(self
            .offers
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.quote_id == quote_id)
            .cloned()
            .collect())
    }

    async fn lines_for(&self, offer_ids: Vec<Uuid>) -> AppResult<Vec<OfferLine>> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| offer_ids.contains(&l.offer_id))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, input: UpdateOffer) -> AppResult<Offer> {
        let mut offers = self.offers.lock().unwrap();
        let offer = offers.iter_mut().find(|o| o.id == id).ok_or_not_found()?;
        if let Some(currency) = input.currency {
            offer.currency = currency;
        }
        Ok(offer.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut offers = self.offers.lock().unwrap();
        let before = offers.len();
        offers.retain(|o| o.id != id);
        if offers.len() == before {
            return Err(AppError::NotFound);
        }
        self.lines.lock().unwrap().retain(|l| l.offer_id != id);
        Ok(())
    }

    async fn insert_lines(&self, offer_id: Uuid, lines: Vec<CreateOfferLine>) -> AppResult<u64> {
        let mut stored = self.lines.lock().unwrap();
        let mut inserted = 0;
        for line in lines {
            let exists = stored
                .iter()
                .any(|l| l.offer_id == offer_id && l.pr_item_id == line.pr_item_id);
            if exists {
                continue;
            }

            let now = Utc::now();
            stored.push(OfferLine {
                id: Uuid::new_v4(),
                offer_id,
                pr_item_id: line.pr_item_id,
                unit_price: line.unit_price,
                delivery_days: line.delivery_days,
                notes: line.notes,
                created_at: now,
                updated_at: now,
            });
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn update_line(&self, id: Uuid, input: UpdateOfferLine) -> AppResult<OfferLine> {
        let mut lines = self.lines.lock().unwrap();
        let line = lines.iter_mut().find(|l| l.id == id).ok_or_not_found()?;
        if let Some(unit_price) = input.unit_price {
            line.unit_price = unit_price;
        }
        Ok(line.clone())
    }

    async fn delete_line(&self, id: Uuid) -> AppResult<()> {
        let mut lines = self.lines.lock().unwrap();
        let before = lines.len();
        lines.retain(|l| l.id != id);
        if lines.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.offers.lock().unwrap().len() as u64)
    }
}

struct TestApp {
    router: Router,
    token: String,
}

impl TestApp {
    fn new(role: &str) -> Self {
        let offers: Arc<dyn OfferRepository> = Arc::new(InMemoryOffers::default());
        let mut uow = MockUnitOfWork::new();
        uow.expect_offers().returning(move || offers.clone());

        let services = Arc::new(Services::new(
            Arc::new(uow),
            Config::with_jwt_secret(SECRET),
        ));

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "buyer@example.com".to_string(),
            password_hash: String::new(),
            name: "Dana Buyer".to_string(),
            role_id: Uuid::new_v4(),
            department_id: None,
            created_at: now,
            updated_at: now,
        };
        let token = services.auth().issue_token(&user, role).unwrap().access_token;

        Self {
            router: create_router(AppState::new(services)),
            token,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));

        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_offer(&self) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/offers",
                Some(json!({
                    "quoteId": Uuid::new_v4(),
                    "supplierId": Uuid::new_v4(),
                    "currency": "EUR"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_create_offer_returns_generated_id() {
    let app = TestApp::new(ROLE_BUYER);
    let quote_id = Uuid::new_v4();

    let (status, body) = app
        .send(
            Method::POST,
            "/offers",
            Some(json!({
                "quoteId": quote_id,
                "supplierId": Uuid::new_v4(),
                "currency": "USD",
                "notes": "Net 30"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(Uuid::parse_str(body["data"]["id"].as_str().unwrap()).is_ok());
    assert_eq!(body["data"]["quoteId"], quote_id.to_string());
    assert_eq!(body["data"]["currency"], "USD");
}

#[tokio::test]
async fn test_duplicate_item_lines_store_one_row() {
    let app = TestApp::new(ROLE_BUYER);
    let offer_id = app.create_offer().await;
    let item = Uuid::new_v4();

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/offers/{}/lines", offer_id),
            Some(json!({
                "lines": [
                    { "prItemId": item, "unitPrice": "12.50", "deliveryDays": 3 },
                    { "prItemId": item, "unitPrice": "11.00" }
                ]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["skipped"], 1);

    let (status, body) = app
        .send(Method::GET, &format!("/offers/{}", offer_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let lines = body["data"]["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["unitPrice"], "12.50");
}

#[tokio::test]
async fn test_resubmitted_lines_are_skipped() {
    let app = TestApp::new(ROLE_BUYER);
    let offer_id = app.create_offer().await;
    let payload = json!({ "lines": [{ "prItemId": Uuid::new_v4(), "unitPrice": "1.00" }] });
    let uri = format!("/offers/{}/lines", offer_id);

    let (first, _) = app.send(Method::POST, &uri, Some(payload.clone())).await;
    let (second, body) = app.send(Method::POST, &uri, Some(payload)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
    assert_eq!(body["data"]["count"], 0);
    assert_eq!(body["data"]["skipped"], 1);
}

#[tokio::test]
async fn test_lines_for_unknown_offer_are_not_found() {
    let app = TestApp::new(ROLE_BUYER);

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/offers/{}/lines", Uuid::new_v4()),
            Some(json!({ "lines": [{ "prItemId": Uuid::new_v4(), "unitPrice": "1.00" }] })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_line_edits_target_stored_lines() {
    let app = TestApp::new(ROLE_BUYER);
    let offer_id = app.create_offer().await;
    let item = Uuid::new_v4();
    app.send(
        Method::POST,
        &format!("/offers/{}/lines", offer_id),
        Some(json!({ "lines": [{ "prItemId": item, "unitPrice": "5.00" }] })),
    )
    .await;

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/offers/lines/{}", Uuid::new_v4()),
            Some(json!({ "unitPrice": "4.00" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, detail) = app.send(Method::GET, &format!("/offers/{}", offer_id), None).await;
    let line_id = detail["data"]["lines"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/offers/lines/{}", line_id),
            Some(json!({ "unitPrice": "4.75" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["unitPrice"], "4.75");
    assert_eq!(body["data"]["prItemId"], item.to_string());
}

#[tokio::test]
async fn test_empty_line_batch_is_rejected() {
    let app = TestApp::new(ROLE_BUYER);
    let offer_id = app.create_offer().await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/offers/{}/lines", offer_id),
            Some(json!({ "lines": [] })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_currency_is_validation_error() {
    let app = TestApp::new(ROLE_BUYER);

    let (status, body) = app
        .send(
            Method::POST,
            "/offers",
            Some(json!({
                "quoteId": Uuid::new_v4(),
                "supplierId": Uuid::new_v4(),
                "currency": "euro"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("currency:"));
}

#[tokio::test]
async fn test_framework_rejections_pass_through() {
    let app = TestApp::new(ROLE_BUYER);

    // Body without a JSON content type
    let request = Request::builder()
        .method(Method::POST)
        .uri("/offers")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
        .body(Body::from("{}"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    // Path segment that is not a UUID
    let (status, _) = app.send(Method::GET, "/offers/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new(ROLE_BUYER);

    let request = Request::builder()
        .uri("/offers")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_buyer_cannot_create_department() {
    let app = TestApp::new(ROLE_BUYER);

    let (status, body) = app
        .send(Method::POST, "/departments", Some(json!({ "name": "Finance" })))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}
