//! Supplier repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Select, Set};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::supplier::{self, ActiveModel, Entity as SupplierEntity};
use crate::domain::{CreateSupplier, Supplier, UpdateSupplier};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn create(&self, input: CreateSupplier) -> AppResult<Supplier>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Supplier>>;

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Supplier>, u64)>;

    async fn update(&self, id: Uuid, input: UpdateSupplier) -> AppResult<Supplier>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct SupplierStore {
    db: DatabaseConnection,
}

impl SupplierStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<SupplierEntity, supplier::Model> for SupplierStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn listing(&self) -> Select<SupplierEntity> {
        SupplierEntity::find().order_by_asc(supplier::Column::Name)
    }
}

impl DeleteRepository<SupplierEntity> for SupplierStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl SupplierRepository for SupplierStore {
    async fn create(&self, input: CreateSupplier) -> AppResult<Supplier> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            tax_id: Set(input.tax_id),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(Supplier::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Supplier>> {
        Ok(self.find_model(id).await?.map(Supplier::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Supplier>, u64)> {
        let (models, total) = self.find_paginated(params).await?;
        Ok((models.into_iter().map(Supplier::from).collect(), total))
    }

    async fn update(&self, id: Uuid, input: UpdateSupplier) -> AppResult<Supplier> {
        let mut active: ActiveModel = self.find_model(id).await?.ok_or_not_found()?.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(tax_id) = input.tax_id {
            active.tax_id = Set(tax_id);
        }
        if input.email.is_some() {
            active.email = Set(input.email);
        }
        if input.phone.is_some() {
            active.phone = Set(input.phone);
        }
        if input.address.is_some() {
            active.address = Set(input.address);
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(Supplier::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id(id).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.count_all().await
    }
}
