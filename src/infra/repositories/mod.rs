//! Repository layer - Data access abstraction
//!
//! One trait per aggregate, implemented by a sea-orm `*Store`.

mod base;
mod department_repository;
pub(crate) mod entities;
mod followup_repository;
mod offer_repository;
mod product_repository;
mod purchase_order_repository;
mod quote_repository;
mod role_repository;
mod supplier_repository;
mod user_repository;

pub use base::{DeleteRepository, ReadRepository};
pub use department_repository::{DepartmentRepository, DepartmentStore};
pub use followup_repository::{FollowupRepository, FollowupStore};
pub use offer_repository::{OfferRepository, OfferStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use purchase_order_repository::{PurchaseOrderRepository, PurchaseOrderStore};
pub use quote_repository::{QuoteRepository, QuoteStore};
pub use role_repository::{RoleRepository, RoleStore};
pub use supplier_repository::{SupplierRepository, SupplierStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use department_repository::MockDepartmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use followup_repository::MockFollowupRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use offer_repository::MockOfferRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use purchase_order_repository::MockPurchaseOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use quote_repository::MockQuoteRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use supplier_repository::MockSupplierRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
