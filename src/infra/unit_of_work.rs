//! Unit of Work: one access point for every repository.
//!
//! Services depend on `UnitOfWork` rather than on individual stores, so a
//! single handle wires them to the database and a single mock replaces it
//! in tests. Multi-row writes that must be atomic (a quote and its items)
//! open their transaction inside the owning store.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    DepartmentRepository, DepartmentStore, FollowupRepository, FollowupStore, OfferRepository,
    OfferStore, ProductRepository, ProductStore, PurchaseOrderRepository, PurchaseOrderStore,
    QuoteRepository, QuoteStore, RoleRepository, RoleStore, SupplierRepository, SupplierStore,
    UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Repository registry for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWork: Send + Sync {
    fn departments(&self) -> Arc<dyn DepartmentRepository>;

    fn roles(&self) -> Arc<dyn RoleRepository>;

    fn users(&self) -> Arc<dyn UserRepository>;

    fn suppliers(&self) -> Arc<dyn SupplierRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    fn quotes(&self) -> Arc<dyn QuoteRepository>;

    fn offers(&self) -> Arc<dyn OfferRepository>;

    fn purchase_orders(&self) -> Arc<dyn PurchaseOrderRepository>;

    fn followups(&self) -> Arc<dyn FollowupRepository>;
}

/// Database-backed `UnitOfWork`
pub struct Persistence {
    departments: Arc<DepartmentStore>,
    roles: Arc<RoleStore>,
    users: Arc<UserStore>,
    suppliers: Arc<SupplierStore>,
    products: Arc<ProductStore>,
    quotes: Arc<QuoteStore>,
    offers: Arc<OfferStore>,
    purchase_orders: Arc<PurchaseOrderStore>,
    followups: Arc<FollowupStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            departments: Arc::new(DepartmentStore::new(db.clone())),
            roles: Arc::new(RoleStore::new(db.clone())),
            users: Arc::new(UserStore::new(db.clone())),
            suppliers: Arc::new(SupplierStore::new(db.clone())),
            products: Arc::new(ProductStore::new(db.clone())),
            quotes: Arc::new(QuoteStore::new(db.clone())),
            offers: Arc::new(OfferStore::new(db.clone())),
            purchase_orders: Arc::new(PurchaseOrderStore::new(db.clone())),
            followups: Arc::new(FollowupStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.departments.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.roles.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn suppliers(&self) -> Arc<dyn SupplierRepository> {
        self.suppliers.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    fn quotes(&self) -> Arc<dyn QuoteRepository> {
        self.quotes.clone()
    }

    fn offers(&self) -> Arc<dyn OfferRepository> {
        self.offers.clone()
    }

    fn purchase_orders(&self) -> Arc<dyn PurchaseOrderRepository> {
        self.purchase_orders.clone()
    }

    fn followups(&self) -> Arc<dyn FollowupRepository> {
        self.followups.clone()
    }
}
