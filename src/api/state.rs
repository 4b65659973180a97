//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{ServiceContainer, Services};

/// Application state (DI container).
///
/// `cache` and `database` are optional so the router can be driven without
/// infrastructure; without a cache, rate limiting is disabled and health
/// reports the probe as unavailable.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub cache: Option<Arc<Cache>>,
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Build the production state: services over the database, plus Redis.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: Config) -> Self {
        let services = Arc::new(Services::from_connection(database.get_connection(), config));

        Self {
            services,
            cache: Some(cache),
            database: Some(database),
        }
    }

    /// State over an arbitrary service container, without infrastructure.
    pub fn new(services: Arc<dyn ServiceContainer>) -> Self {
        Self {
            services,
            cache: None,
            database: None,
        }
    }
}
