pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use sqlx::PgPool;

use config::Config;
use services::validation::ValidationChain;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    /// Static fileserver hit counter, owned here rather than living in a
    /// process-wide global.
    pub fileserver_hits: Arc<AtomicU64>,
    pub post_validation: Arc<ValidationChain>,
}

impl AppState {
    pub fn new(db: PgPool, config: Arc<Config>) -> Self {
        Self {
            db,
            config,
            fileserver_hits: Arc::new(AtomicU64::new(0)),
            post_validation: Arc::new(ValidationChain::for_posts()),
        }
    }
}
