//! Supplier offer database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Offer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub quote_id: Uuid,
    pub supplier_id: Uuid,
    pub currency: String,
    pub valid_until: Option<Date>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::offer_line::Entity")]
    OfferLine,
}

impl Related<super::offer_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OfferLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Offer {
    fn from(model: Model) -> Self {
        Offer {
            id: model.id,
            quote_id: model.quote_id,
            supplier_id: model.supplier_id,
            currency: model.currency,
            valid_until: model.valid_until,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
