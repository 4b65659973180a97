//! Application services layer - use cases over the unit of work.
//!
//! Each resource exposes a service trait (used by handlers and mocked in
//! router tests) and a `*Manager` implementation generic over `UnitOfWork`.

mod auth_service;
pub mod container;
mod dashboard_service;
mod department_service;
mod followup_service;
mod offer_service;
mod product_service;
mod purchase_order_service;
mod quote_service;
mod role_service;
mod supplier_service;
mod user_service;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use dashboard_service::{DashboardManager, DashboardService, DashboardSummary};
pub use department_service::{DepartmentManager, DepartmentService};
pub use followup_service::{FollowupManager, FollowupService};
pub use offer_service::{OfferManager, OfferService};
pub use product_service::{ProductManager, ProductService};
pub use purchase_order_service::{PurchaseOrderManager, PurchaseOrderService};
pub use quote_service::{QuoteManager, QuoteService};
pub use role_service::{RoleManager, RoleService};
pub use supplier_service::{SupplierManager, SupplierService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
