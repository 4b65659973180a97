//! Product catalog repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Select, Set};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: CreateProduct) -> AppResult<Product>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)>;

    async fn update(&self, id: Uuid, input: UpdateProduct) -> AppResult<Product>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<ProductEntity, product::Model> for ProductStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn listing(&self) -> Select<ProductEntity> {
        ProductEntity::find().order_by_asc(product::Column::Sku)
    }
}

impl DeleteRepository<ProductEntity> for ProductStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn create(&self, input: CreateProduct) -> AppResult<Product> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            sku: Set(input.sku),
            name: Set(input.name),
            description: Set(input.description),
            unit: Set(input.unit),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(Product::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.find_model(id).await?.map(Product::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)> {
        let (models, total) = self.find_paginated(params).await?;
        Ok((models.into_iter().map(Product::from).collect(), total))
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> AppResult<Product> {
        let mut active: ActiveModel = self.find_model(id).await?.ok_or_not_found()?.into();

        if let Some(sku) = input.sku {
            active.sku = Set(sku);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.description.is_some() {
            active.description = Set(input.description);
        }
        if let Some(unit) = input.unit {
            active.unit = Set(unit);
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(Product::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id(id).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.count_all().await
    }
}
