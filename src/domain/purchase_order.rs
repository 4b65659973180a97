//! Purchase orders issued to suppliers.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{non_negative, CURRENCY_CODE};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Issued,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "draft",
            PurchaseOrderStatus::Issued => "issued",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseOrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PurchaseOrderStatus::Draft),
            "issued" => Ok(PurchaseOrderStatus::Issued),
            "received" => Ok(PurchaseOrderStatus::Received),
            "cancelled" => Ok(PurchaseOrderStatus::Cancelled),
            other => Err(AppError::validation(format!(
                "unknown purchase order status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: Uuid,
    #[schema(example = "PO-2024-0001")]
    pub number: String,
    pub supplier_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub offer_id: Option<Uuid>,
    pub status: PurchaseOrderStatus,
    #[schema(example = "EUR")]
    pub currency: String,
    #[schema(value_type = String, example = "1250.00")]
    pub total_amount: Decimal,
    pub expected_delivery: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrder {
    #[validate(length(min = 1, max = 64))]
    pub number: String,
    pub supplier_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub offer_id: Option<Uuid>,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    #[validate(regex(path = *CURRENCY_CODE, message = "must be a three-letter upper-case currency code"))]
    pub currency: String,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = String, example = "1250.00")]
    pub total_amount: Decimal,
    pub expected_delivery: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchaseOrder {
    pub status: Option<PurchaseOrderStatus>,
    #[validate(regex(path = *CURRENCY_CODE, message = "must be a three-letter upper-case currency code"))]
    pub currency: Option<String>,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<String>)]
    pub total_amount: Option<Decimal>,
    pub expected_delivery: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_draft() {
        let input: CreatePurchaseOrder = serde_json::from_value(serde_json::json!({
            "number": "PO-1",
            "supplierId": Uuid::new_v4(),
            "currency": "USD",
            "totalAmount": "10.00",
        }))
        .unwrap();

        assert_eq!(input.status, PurchaseOrderStatus::Draft);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_unknown_status_is_not_deserialized() {
        let result = serde_json::from_value::<UpdatePurchaseOrder>(serde_json::json!({
            "status": "shipped"
        }));
        assert!(result.is_err());
    }
}
