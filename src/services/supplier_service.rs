//! Supplier service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateSupplier, Supplier, UpdateSupplier};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait SupplierService: Send + Sync {
    async fn create_supplier(&self, input: CreateSupplier) -> AppResult<Supplier>;

    async fn get_supplier(&self, id: Uuid) -> AppResult<Supplier>;

    async fn list_suppliers(&self, params: PaginationParams) -> AppResult<Paginated<Supplier>>;

    async fn update_supplier(&self, id: Uuid, input: UpdateSupplier) -> AppResult<Supplier>;

    async fn delete_supplier(&self, id: Uuid) -> AppResult<()>;
}

pub struct SupplierManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SupplierManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SupplierService for SupplierManager<U> {
    async fn create_supplier(&self, input: CreateSupplier) -> AppResult<Supplier> {
        self.uow.suppliers().create(input).await
    }

    async fn get_supplier(&self, id: Uuid) -> AppResult<Supplier> {
        self.uow.suppliers().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_suppliers(&self, params: PaginationParams) -> AppResult<Paginated<Supplier>> {
        let (data, total) = self.uow.suppliers().list(&params).await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn update_supplier(&self, id: Uuid, input: UpdateSupplier) -> AppResult<Supplier> {
        self.uow.suppliers().update(id, input).await
    }

    async fn delete_supplier(&self, id: Uuid) -> AppResult<()> {
        self.uow.suppliers().delete(id).await
    }
}
