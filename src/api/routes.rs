//! Application route configuration.

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::health_handler::{health, root};
use super::handlers::{
    auth_routes, dashboard_routes, department_routes, followup_routes, offer_routes,
    product_routes, purchase_order_routes, quote_routes, role_routes, supplier_routes,
    user_routes,
};
use super::middleware::{
    auth_middleware, error_log_middleware, rate_limit_auth_middleware, rate_limit_middleware,
};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no rate limiting)
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Login is public with a stricter rate limit
        .nest(
            "/auth",
            auth_routes(state.clone()).route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_auth_middleware,
            )),
        )
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(middleware::from_fn(error_log_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Resource routes: JWT required, general rate limit
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/departments", department_routes())
        .nest("/roles", role_routes())
        .nest("/users", user_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/products", product_routes())
        .nest("/quotes", quote_routes())
        .nest("/offers", offer_routes())
        .nest("/purchase-orders", purchase_order_routes())
        .nest("/followups", followup_routes())
        .nest("/dashboard", dashboard_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route_layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}
