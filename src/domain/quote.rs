//! Quotes (internal purchase requests) and their requested items.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::positive;
use crate::errors::AppError;

/// Lifecycle of a quote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Open,
    Closed,
    Cancelled,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Open => "open",
            QuoteStatus::Closed => "closed",
            QuoteStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(QuoteStatus::Draft),
            "open" => Ok(QuoteStatus::Open),
            "closed" => Ok(QuoteStatus::Closed),
            "cancelled" => Ok(QuoteStatus::Cancelled),
            other => Err(AppError::validation(format!("unknown quote status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    #[schema(example = "Office paper Q3")]
    pub title: String,
    pub requester_id: Uuid,
    pub department_id: Option<Uuid>,
    pub status: QuoteStatus,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product and quantity requested by a quote; offer lines price these
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub product_id: Uuid,
    #[schema(value_type = String, example = "12.5")]
    pub quantity: Decimal,
    pub notes: Option<String>,
}

/// Quote together with its requested items
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetail {
    #[serde(flatten)]
    pub quote: Quote,
    pub items: Vec<QuoteItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteItem {
    pub product_id: Uuid,
    #[validate(custom(function = "positive"))]
    #[schema(value_type = String, example = "12.5")]
    pub quantity: Decimal,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuote {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub department_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<CreateQuoteItem>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddQuoteItems {
    #[validate(length(min = 1, message = "must contain at least one item"), nested)]
    pub items: Vec<CreateQuoteItem>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuote {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub status: Option<QuoteStatus>,
    pub department_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_storage_form() {
        for status in [
            QuoteStatus::Draft,
            QuoteStatus::Open,
            QuoteStatus::Closed,
            QuoteStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<QuoteStatus>().unwrap(), status);
        }
        assert!("archived".parse::<QuoteStatus>().is_err());
    }

    #[test]
    fn test_item_quantity_must_be_positive() {
        let input: AddQuoteItems = serde_json::from_value(serde_json::json!({
            "items": [{ "productId": Uuid::new_v4(), "quantity": "0" }]
        }))
        .unwrap();

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_empty_item_batch_is_rejected() {
        let input = AddQuoteItems { items: vec![] };

        let errors = serde_json::to_value(input.validate().unwrap_err()).unwrap();

        assert_eq!(errors["items"][0]["code"], "length");
        assert_eq!(errors["items"][0]["params"]["value"], serde_json::json!([]));
    }
}
