//! SeaORM entity definitions
//!
//! Database-specific models, converted into domain entities at the
//! repository boundary.

pub mod department;
pub mod followup;
pub mod offer;
pub mod offer_line;
pub mod product;
pub mod purchase_order;
pub mod quote;
pub mod quote_item;
pub mod role;
pub mod supplier;
pub mod user;
