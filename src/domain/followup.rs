//! Followup notes tracked against purchase orders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Followup {
    pub id: Uuid,
    pub purchase_order_id: Uuid,
    pub author_id: Option<Uuid>,
    #[schema(example = "Supplier confirmed shipment for Friday")]
    pub note: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFollowup {
    pub purchase_order_id: Uuid,
    #[validate(length(min = 1, max = 2000))]
    pub note: String,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFollowup {
    #[validate(length(min = 1, max = 2000))]
    pub note: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

/// Query filter for followup listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FollowupFilter {
    /// Only followups of this purchase order
    pub purchase_order_id: Option<Uuid>,
}
