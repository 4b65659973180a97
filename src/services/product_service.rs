//! Product catalog service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateProduct, Product, UpdateProduct};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait ProductService: Send + Sync {
    async fn create_product(&self, input: CreateProduct) -> AppResult<Product>;

    async fn get_product(&self, id: Uuid) -> AppResult<Product>;

    async fn list_products(&self, params: PaginationParams) -> AppResult<Paginated<Product>>;

    async fn update_product(&self, id: Uuid, input: UpdateProduct) -> AppResult<Product>;

    async fn delete_product(&self, id: Uuid) -> AppResult<()>;
}

pub struct ProductManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductManager<U> {
    async fn create_product(&self, input: CreateProduct) -> AppResult<Product> {
        self.uow.products().create(input).await
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.uow.products().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_products(&self, params: PaginationParams) -> AppResult<Paginated<Product>> {
        let (data, total) = self.uow.products().list(&params).await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn update_product(&self, id: Uuid, input: UpdateProduct) -> AppResult<Product> {
        self.uow.products().update(id, input).await
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        self.uow.products().delete(id).await
    }
}
