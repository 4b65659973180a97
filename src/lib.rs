//! Procurement API
//!
//! REST backend for purchasing: departments, roles and users; suppliers and
//! products; quotes with requested items; supplier offers with priced lines;
//! purchase orders and their followups.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve`, `migrate`, `seed`
//! - **config**: environment configuration and constants
//! - **domain**: entities, request payloads and their validation rules
//! - **services**: use cases over the unit of work
//! - **infra**: PostgreSQL (sea-orm) repositories, migrations and Redis
//! - **api**: axum handlers, middleware, extractors and routes
//! - **types**: pagination and response envelopes
//! - **errors**: `AppError` and its mapping to HTTP responses
//!
//! # CLI Usage
//!
//! ```bash
//! procurement-api migrate up
//! procurement-api seed --admin-email admin@example.com --admin-password '...'
//! procurement-api serve --port 3000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use errors::{AppError, AppResult};
