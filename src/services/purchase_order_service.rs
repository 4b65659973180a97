//! Purchase order service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreatePurchaseOrder, PurchaseOrder, UpdatePurchaseOrder};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait PurchaseOrderService: Send + Sync {
    async fn create_purchase_order(&self, input: CreatePurchaseOrder) -> AppResult<PurchaseOrder>;

    async fn get_purchase_order(&self, id: Uuid) -> AppResult<PurchaseOrder>;

    async fn list_purchase_orders(&self, params: PaginationParams) -> AppResult<Paginated<PurchaseOrder>>;

    async fn update_purchase_order(&self, id: Uuid, input: UpdatePurchaseOrder) -> AppResult<PurchaseOrder>;

    async fn delete_purchase_order(&self, id: Uuid) -> AppResult<()>;
}

pub struct PurchaseOrderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PurchaseOrderManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PurchaseOrderService for PurchaseOrderManager<U> {
    async fn create_purchase_order(&self, input: CreatePurchaseOrder) -> AppResult<PurchaseOrder> {
        self.uow.purchase_orders().create(input).await
    }

    async fn get_purchase_order(&self, id: Uuid) -> AppResult<PurchaseOrder> {
        self.uow.purchase_orders().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_purchase_orders(&self, params: PaginationParams) -> AppResult<Paginated<PurchaseOrder>> {
        let (data, total) = self.uow.purchase_orders().list(&params).await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn update_purchase_order(&self, id: Uuid, input: UpdatePurchaseOrder) -> AppResult<PurchaseOrder> {
        self.uow.purchase_orders().update(id, input).await
    }

    async fn delete_purchase_order(&self, id: Uuid) -> AppResult<()> {
        self.uow.purchase_orders().delete(id).await
    }
}
