//! Infrastructure layer - External systems integration
//!
//! - PostgreSQL connection, migrations and repositories
//! - Redis (rate limiting, health)
//! - Unit of Work wiring repositories to services

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    DepartmentRepository, FollowupRepository, OfferRepository, ProductRepository,
    PurchaseOrderRepository, QuoteRepository, RoleRepository, SupplierRepository, UserRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockDepartmentRepository, MockFollowupRepository, MockOfferRepository, MockProductRepository,
    MockPurchaseOrderRepository, MockQuoteRepository, MockRoleRepository, MockSupplierRepository,
    MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
