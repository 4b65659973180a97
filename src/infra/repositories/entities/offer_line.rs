//! Priced line of an offer. Unique on `(offer_id, pr_item_id)`.

use sea_orm::entity::prelude::*;

use crate::domain::OfferLine;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "offer_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub offer_id: Uuid,
    pub pr_item_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))")]
    pub unit_price: Decimal,
    pub delivery_days: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offer::Entity",
        from = "Column::OfferId",
        to = "super::offer::Column::Id",
        on_delete = "Cascade"
    )]
    Offer,
}

impl Related<super::offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OfferLine {
    fn from(model: Model) -> Self {
        OfferLine {
            id: model.id,
            offer_id: model.offer_id,
            pr_item_id: model.pr_item_id,
            unit_price: model.unit_price,
            delivery_days: model.delivery_days,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
