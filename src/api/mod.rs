//! API layer - HTTP handlers, middleware, extractors and routes.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
