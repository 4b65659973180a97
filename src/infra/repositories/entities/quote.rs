//! Quote database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Quote, QuoteStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub requester_id: Uuid,
    pub department_id: Option<Uuid>,
    pub status: String,
    pub due_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quote_item::Entity")]
    QuoteItem,
}

impl Related<super::quote_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuoteItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Quote {
    fn from(model: Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(quote_id = %model.id, status = %model.status, "Unknown stored quote status");
            QuoteStatus::default()
        });

        Quote {
            id: model.id,
            title: model.title,
            requester_id: model.requester_id,
            department_id: model.department_id,
            status,
            due_date: model.due_date,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
