//! Followup repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::followup::{self, ActiveModel, Entity as FollowupEntity};
use crate::domain::{CreateFollowup, Followup, UpdateFollowup};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FollowupRepository: Send + Sync {
    async fn create(&self, author_id: Option<Uuid>, input: CreateFollowup) -> AppResult<Followup>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Followup>>;

    /// Page of followups, optionally restricted to one purchase order
    async fn list(
        &self,
        params: &PaginationParams,
        purchase_order_id: Option<Uuid>,
    ) -> AppResult<(Vec<Followup>, u64)>;

    async fn update(&self, id: Uuid, input: UpdateFollowup) -> AppResult<Followup>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Followups not yet completed
    async fn count_pending(&self) -> AppResult<u64>;
}

pub struct FollowupStore {
    db: DatabaseConnection,
}

impl FollowupStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<FollowupEntity, followup::Model> for FollowupStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn listing(&self) -> Select<FollowupEntity> {
        FollowupEntity::find().order_by_desc(followup::Column::CreatedAt)
    }
}

impl DeleteRepository<FollowupEntity> for FollowupStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl FollowupRepository for FollowupStore {
    async fn create(&self, author_id: Option<Uuid>, input: CreateFollowup) -> AppResult<Followup> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            purchase_order_id: Set(input.purchase_order_id),
            author_id: Set(author_id),
            note: Set(input.note),
            due_date: Set(input.due_date),
            completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(Followup::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Followup>> {
        Ok(self.find_model(id).await?.map(Followup::from))
    }

    async fn list(
        &self,
        params: &PaginationParams,
        purchase_order_id: Option<Uuid>,
    ) -> AppResult<(Vec<Followup>, u64)> {
        let Some(purchase_order_id) = purchase_order_id else {
            let (models, total) = self.find_paginated(params).await?;
            return Ok((models.into_iter().map(Followup::from).collect(), total));
        };

        let paginator = self
            .listing()
            .filter(followup::Column::PurchaseOrderId.eq(purchase_order_id))
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page() - 1).await?;

        Ok((models.into_iter().map(Followup::from).collect(), total))
    }

    async fn update(&self, id: Uuid, input: UpdateFollowup) -> AppResult<Followup> {
        let mut active: ActiveModel = self.find_model(id).await?.ok_or_not_found()?.into();

        if let Some(note) = input.note {
            active.note = Set(note);
        }
        if input.due_date.is_some() {
            active.due_date = Set(input.due_date);
        }
        if let Some(completed) = input.completed {
            active.completed = Set(completed);
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(Followup::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id(id).await
    }

    async fn count_pending(&self) -> AppResult<u64> {
        FollowupEntity::find()
            .filter(followup::Column::Completed.eq(false))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }
}
