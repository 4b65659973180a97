//! Purchase order repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Select, Set};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::purchase_order::{self, ActiveModel, Entity as PurchaseOrderEntity};
use crate::domain::{CreatePurchaseOrder, PurchaseOrder, UpdatePurchaseOrder};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PurchaseOrderRepository: Send + Sync {
    async fn create(&self, input: CreatePurchaseOrder) -> AppResult<PurchaseOrder>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PurchaseOrder>>;

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<PurchaseOrder>, u64)>;

    async fn update(&self, id: Uuid, input: UpdatePurchaseOrder) -> AppResult<PurchaseOrder>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct PurchaseOrderStore {
    db: DatabaseConnection,
}

impl PurchaseOrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<PurchaseOrderEntity, purchase_order::Model> for PurchaseOrderStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn listing(&self) -> Select<PurchaseOrderEntity> {
        PurchaseOrderEntity::find().order_by_desc(purchase_order::Column::CreatedAt)
    }
}

impl DeleteRepository<PurchaseOrderEntity> for PurchaseOrderStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl PurchaseOrderRepository for PurchaseOrderStore {
    async fn create(&self, input: CreatePurchaseOrder) -> AppResult<PurchaseOrder> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            number: Set(input.number),
            supplier_id: Set(input.supplier_id),
            quote_id: Set(input.quote_id),
            offer_id: Set(input.offer_id),
            status: Set(input.status.as_str().to_string()),
            currency: Set(input.currency),
            total_amount: Set(input.total_amount),
            expected_delivery: Set(input.expected_delivery),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(PurchaseOrder::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PurchaseOrder>> {
        Ok(self.find_model(id).await?.map(PurchaseOrder::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<PurchaseOrder>, u64)> {
        let (models, total) = self.find_paginated(params).await?;
        Ok((models.into_iter().map(PurchaseOrder::from).collect(), total))
    }

    async fn update(&self, id: Uuid, input: UpdatePurchaseOrder) -> AppResult<PurchaseOrder> {
        let mut active: ActiveModel = self.find_model(id).await?.ok_or_not_found()?.into();

        if let Some(status) = input.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(currency) = input.currency {
            active.currency = Set(currency);
        }
        if let Some(total_amount) = input.total_amount {
            active.total_amount = Set(total_amount);
        }
        if input.expected_delivery.is_some() {
            active.expected_delivery = Set(input.expected_delivery);
        }
        if input.notes.is_some() {
            active.notes = Set(input.notes);
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(PurchaseOrder::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id(id).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.count_all().await
    }
}
