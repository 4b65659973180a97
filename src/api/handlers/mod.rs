//! HTTP request handlers.

pub mod auth_handler;
pub mod dashboard_handler;
pub mod department_handler;
pub mod followup_handler;
pub mod health_handler;
pub mod offer_handler;
pub mod product_handler;
pub mod purchase_order_handler;
pub mod quote_handler;
pub mod role_handler;
pub mod supplier_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use dashboard_handler::dashboard_routes;
pub use department_handler::department_routes;
pub use followup_handler::followup_routes;
pub use offer_handler::offer_routes;
pub use product_handler::product_routes;
pub use purchase_order_handler::purchase_order_routes;
pub use quote_handler::quote_routes;
pub use role_handler::role_routes;
pub use supplier_handler::supplier_routes;
pub use user_handler::user_routes;
