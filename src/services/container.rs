//! Service container - one handle to every application service.
//!
//! Handlers reach services through `ServiceContainer` so the router can be
//! driven by real services over a mocked unit of work, or by a fully
//! mocked container.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, DashboardManager, DashboardService, DepartmentManager,
    DepartmentService, FollowupManager, FollowupService, OfferManager, OfferService,
    ProductManager, ProductService, PurchaseOrderManager, PurchaseOrderService, QuoteManager,
    QuoteService, RoleManager, RoleService, SupplierManager, SupplierService, UserManager,
    UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn departments(&self) -> Arc<dyn DepartmentService>;

    fn roles(&self) -> Arc<dyn RoleService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn suppliers(&self) -> Arc<dyn SupplierService>;

    fn products(&self) -> Arc<dyn ProductService>;

    fn quotes(&self) -> Arc<dyn QuoteService>;

    fn offers(&self) -> Arc<dyn OfferService>;

    fn purchase_orders(&self) -> Arc<dyn PurchaseOrderService>;

    fn followups(&self) -> Arc<dyn FollowupService>;

    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth: Arc<dyn AuthService>,
    departments: Arc<dyn DepartmentService>,
    roles: Arc<dyn RoleService>,
    users: Arc<dyn UserService>,
    suppliers: Arc<dyn SupplierService>,
    products: Arc<dyn ProductService>,
    quotes: Arc<dyn QuoteService>,
    offers: Arc<dyn OfferService>,
    purchase_orders: Arc<dyn PurchaseOrderService>,
    followups: Arc<dyn FollowupService>,
    dashboard: Arc<dyn DashboardService>,
}

impl Services {
    /// Wire every service over one unit of work
    pub fn new<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), config)),
            departments: Arc::new(DepartmentManager::new(uow.clone())),
            roles: Arc::new(RoleManager::new(uow.clone())),
            users: Arc::new(UserManager::new(uow.clone())),
            suppliers: Arc::new(SupplierManager::new(uow.clone())),
            products: Arc::new(ProductManager::new(uow.clone())),
            quotes: Arc::new(QuoteManager::new(uow.clone())),
            offers: Arc::new(OfferManager::new(uow.clone())),
            purchase_orders: Arc::new(PurchaseOrderManager::new(uow.clone())),
            followups: Arc::new(FollowupManager::new(uow.clone())),
            dashboard: Arc::new(DashboardManager::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::new(Arc::new(Persistence::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentService> {
        self.departments.clone()
    }

    fn roles(&self) -> Arc<dyn RoleService> {
        self.roles.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    fn suppliers(&self) -> Arc<dyn SupplierService> {
        self.suppliers.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.products.clone()
    }

    fn quotes(&self) -> Arc<dyn QuoteService> {
        self.quotes.clone()
    }

    fn offers(&self) -> Arc<dyn OfferService> {
        self.offers.clone()
    }

    fn purchase_orders(&self) -> Arc<dyn PurchaseOrderService> {
        self.purchase_orders.clone()
    }

    fn followups(&self) -> Arc<dyn FollowupService> {
        self.followups.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard.clone()
    }
}

/// Run independent repository calls concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Await two operations together; the first error wins.
    ///
    /// # Example
    /// ```ignore
    /// let (quote, items) = parallel::join2(quotes.find_by_id(id), quotes.items(id)).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockUnitOfWork;

    #[tokio::test]
    async fn test_parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<&'static str> {
            Ok("two")
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
    }

    #[tokio::test]
    async fn test_parallel_join4_short_circuits_on_error() {
        async fn ok(n: u64) -> AppResult<u64> {
            Ok(n)
        }
        async fn fail() -> AppResult<u64> {
            Err(AppError::NotFound)
        }

        let result = parallel::join4(ok(1), ok(2), fail(), ok(4)).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_services_wire_over_unit_of_work() {
        let services = Services::new(
            Arc::new(MockUnitOfWork::new()),
            Config::with_jwt_secret("a-very-long-secret-used-for-tests-only"),
        );

        // Building the container touches no repository
        let _ = services.offers();
        let _ = services.dashboard();
    }
}
