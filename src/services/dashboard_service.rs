//! Dashboard service - headline counts for the procurement overview.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::container::parallel;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub suppliers: u64,
    pub products: u64,
    pub quotes: u64,
    pub offers: u64,
    pub purchase_orders: u64,
    /// Followups not yet completed
    pub pending_followups: u64,
}

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn summary(&self) -> AppResult<DashboardSummary>;
}

pub struct DashboardManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardManager<U> {
    async fn summary(&self) -> AppResult<DashboardSummary> {
        let (suppliers_repo, products_repo, quotes_repo) =
            (self.uow.suppliers(), self.uow.products(), self.uow.quotes());
        let (offers_repo, orders_repo, followups_repo) =
            (self.uow.offers(), self.uow.purchase_orders(), self.uow.followups());

        let ((suppliers, products, quotes, offers), (purchase_orders, pending_followups)) =
            parallel::join2(
                parallel::join4(
                    suppliers_repo.count(),
                    products_repo.count(),
                    quotes_repo.count(),
                    offers_repo.count(),
                ),
                parallel::join2(orders_repo.count(), followups_repo.count_pending()),
            )
            .await?;

        Ok(DashboardSummary {
            suppliers,
            products,
            quotes,
            offers,
            purchase_orders,
            pending_followups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::{
        FollowupRepository, MockFollowupRepository, MockOfferRepository,
        MockProductRepository, MockPurchaseOrderRepository, MockQuoteRepository,
        MockSupplierRepository, MockUnitOfWork, OfferRepository, ProductRepository,
        PurchaseOrderRepository, QuoteRepository, SupplierRepository,
    };

    fn uow_with_counts(offers_count: AppResult<u64>) -> MockUnitOfWork {
        let mut suppliers = MockSupplierRepository::new();
        suppliers.expect_count().returning(|| Ok(3));
        let mut products = MockProductRepository::new();
        products.expect_count().returning(|| Ok(12));
        let mut quotes = MockQuoteRepository::new();
        quotes.expect_count().returning(|| Ok(4));
        let mut offers = MockOfferRepository::new();
        let mut offers_count = Some(offers_count);
        offers
            .expect_count()
            .returning(move || offers_count.take().unwrap_or(Ok(0)));
        let mut orders = MockPurchaseOrderRepository::new();
        orders.expect_count().returning(|| Ok(2));
        let mut followups = MockFollowupRepository::new();
        followups.expect_count_pending().returning(|| Ok(1));

        let suppliers: Arc<dyn SupplierRepository> = Arc::new(suppliers);
        let products: Arc<dyn ProductRepository> = Arc::new(products);
        let quotes: Arc<dyn QuoteRepository> = Arc::new(quotes);
        let offers: Arc<dyn OfferRepository> = Arc::new(offers);
        let orders: Arc<dyn PurchaseOrderRepository> = Arc::new(orders);
        let followups: Arc<dyn FollowupRepository> = Arc::new(followups);

        let mut uow = MockUnitOfWork::new();
        uow.expect_suppliers().returning(move || suppliers.clone());
        uow.expect_products().returning(move || products.clone());
        uow.expect_quotes().returning(move || quotes.clone());
        uow.expect_offers().returning(move || offers.clone());
        uow.expect_purchase_orders().returning(move || orders.clone());
        uow.expect_followups().returning(move || followups.clone());
        uow
    }

    #[tokio::test]
    async fn test_summary_collects_all_counts() {
        let summary = DashboardManager::new(Arc::new(uow_with_counts(Ok(7))))
            .summary()
            .await
            .unwrap();

        assert_eq!(
            summary,
            DashboardSummary {
                suppliers: 3,
                products: 12,
                quotes: 4,
                offers: 7,
                purchase_orders: 2,
                pending_followups: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_summary_fails_when_any_count_fails() {
        let result = DashboardManager::new(Arc::new(uow_with_counts(Err(AppError::internal(
            "count failed",
        )))))
        .summary()
        .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
