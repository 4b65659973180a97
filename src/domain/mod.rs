//! Domain layer - Procurement entities, request payloads and rules.
//!
//! Types here know nothing about HTTP or SQL. Request payloads carry their
//! `validator` rules; persistence models convert into these entities.

pub mod followup;
pub mod offer;
pub mod organization;
pub mod password;
pub mod product;
pub mod purchase_order;
pub mod quote;
pub mod supplier;
pub mod user;
mod validation;

pub use followup::{CreateFollowup, Followup, FollowupFilter, UpdateFollowup};
pub use offer::{
    dedup_lines_by_item, AddOfferLines, CreateOffer, CreateOfferLine, LinesAdded, Offer,
    OfferDetail, OfferLine, UpdateOffer, UpdateOfferLine,
};
pub use organization::{
    CreateDepartment, CreateRole, Department, Role, UpdateDepartment, UpdateRole,
};
pub use password::Password;
pub use product::{CreateProduct, Product, UpdateProduct};
pub use purchase_order::{
    CreatePurchaseOrder, PurchaseOrder, PurchaseOrderStatus, UpdatePurchaseOrder,
};
pub use quote::{
    AddQuoteItems, CreateQuote, CreateQuoteItem, Quote, QuoteDetail, QuoteItem, QuoteStatus,
    UpdateQuote,
};
pub use supplier::{CreateSupplier, Supplier, UpdateSupplier};
pub use user::{CreateUser, NewUser, UpdateUser, User, UserChanges, UserResponse};
pub use validation::CURRENCY_CODE;
