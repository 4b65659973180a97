//! Purchase order database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{PurchaseOrder, PurchaseOrderStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub number: String,
    pub supplier_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub offer_id: Option<Uuid>,
    pub status: String,
    pub currency: String,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub total_amount: Decimal,
    pub expected_delivery: Option<Date>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PurchaseOrder {
    fn from(model: Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(purchase_order_id = %model.id, status = %model.status, "Unknown stored purchase order status");
            PurchaseOrderStatus::default()
        });

        PurchaseOrder {
            id: model.id,
            number: model.number,
            supplier_id: model.supplier_id,
            quote_id: model.quote_id,
            offer_id: model.offer_id,
            status,
            currency: model.currency,
            total_amount: model.total_amount,
            expected_delivery: model.expected_delivery,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
