//! OpenAPI document served at `/api-docs/openapi.json` with Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, dashboard_handler, department_handler, followup_handler, offer_handler,
    product_handler, purchase_order_handler, quote_handler, role_handler, supplier_handler,
    user_handler,
};
use crate::domain::{
    AddOfferLines, AddQuoteItems, CreateDepartment, CreateFollowup, CreateOffer, CreateOfferLine,
    CreateProduct, CreatePurchaseOrder, CreateQuote, CreateQuoteItem, CreateRole, CreateSupplier,
    CreateUser, Department, Followup, LinesAdded, Offer, OfferDetail, OfferLine, Product,
    PurchaseOrder, PurchaseOrderStatus, Quote, QuoteDetail, QuoteItem, QuoteStatus, Role,
    Supplier, UpdateDepartment, UpdateFollowup, UpdateOffer, UpdateOfferLine, UpdateProduct,
    UpdatePurchaseOrder, UpdateQuote, UpdateRole, UpdateSupplier, UpdateUser, UserResponse,
};
use crate::errors::{ErrorBody, ErrorResponse};
use crate::services::{DashboardSummary, TokenResponse};
use crate::types::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Procurement API",
        version = "0.1.0",
        description = "Quotes, supplier offers, purchase orders and followups"
    ),
    servers((url = "http://localhost:3000", description = "Local development server")),
    paths(
        auth_handler::login,
        auth_handler::me,
        department_handler::create_department,
        department_handler::list_departments,
        department_handler::get_department,
        department_handler::update_department,
        department_handler::delete_department,
        role_handler::create_role,
        role_handler::list_roles,
        role_handler::get_role,
        role_handler::update_role,
        role_handler::delete_role,
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        supplier_handler::create_supplier,
        supplier_handler::list_suppliers,
        supplier_handler::get_supplier,
        supplier_handler::update_supplier,
        supplier_handler::delete_supplier,
        product_handler::create_product,
        product_handler::list_products,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
        quote_handler::create_quote,
        quote_handler::list_quotes,
        quote_handler::get_quote,
        quote_handler::update_quote,
        quote_handler::delete_quote,
        quote_handler::add_quote_items,
        offer_handler::create_offer,
        offer_handler::list_offers,
        offer_handler::list_offers_by_quote,
        offer_handler::get_offer,
        offer_handler::update_offer,
        offer_handler::delete_offer,
        offer_handler::add_offer_lines,
        offer_handler::update_offer_line,
        offer_handler::delete_offer_line,
        purchase_order_handler::create_purchase_order,
        purchase_order_handler::list_purchase_orders,
        purchase_order_handler::get_purchase_order,
        purchase_order_handler::update_purchase_order,
        purchase_order_handler::delete_purchase_order,
        followup_handler::create_followup,
        followup_handler::list_followups,
        followup_handler::get_followup,
        followup_handler::update_followup,
        followup_handler::delete_followup,
        dashboard_handler::summary,
    ),
    components(schemas(
        auth_handler::LoginRequest,
        TokenResponse,
        UserResponse,
        CreateUser,
        UpdateUser,
        Department,
        CreateDepartment,
        UpdateDepartment,
        Role,
        CreateRole,
        UpdateRole,
        Supplier,
        CreateSupplier,
        UpdateSupplier,
        Product,
        CreateProduct,
        UpdateProduct,
        QuoteStatus,
        Quote,
        QuoteItem,
        QuoteDetail,
        CreateQuote,
        CreateQuoteItem,
        AddQuoteItems,
        UpdateQuote,
        Offer,
        OfferLine,
        OfferDetail,
        CreateOffer,
        UpdateOffer,
        CreateOfferLine,
        AddOfferLines,
        UpdateOfferLine,
        LinesAdded,
        PurchaseOrderStatus,
        PurchaseOrder,
        CreatePurchaseOrder,
        UpdatePurchaseOrder,
        Followup,
        CreateFollowup,
        UpdateFollowup,
        DashboardSummary,
        PaginationMeta,
        ErrorResponse,
        ErrorBody,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and current user"),
        (name = "Organization", description = "Departments and roles"),
        (name = "Users", description = "User accounts"),
        (name = "Catalog", description = "Suppliers and products"),
        (name = "Quotes", description = "Purchase requests and requested items"),
        (name = "Offers", description = "Supplier offers and priced lines"),
        (name = "Purchase orders", description = "Purchase orders and followups"),
        (name = "Dashboard", description = "Summary counts")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_offer_line_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/offers/{id}/lines"));
        assert!(doc.paths.paths.contains_key("/offers/lines/{line_id}"));
    }
}
