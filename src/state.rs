use std::sync::Arc;

use sqlx::PgPool;

use crate::{config::Config, media::Media, storage::Storage};

/// Central application state shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,

    /// Object storage backend (S3 or MinIO).
    pub storage: Arc<dyn Storage>,

    /// Application configuration loaded from environment variables or `.env`.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: PgPool, storage: Arc<dyn Storage>, config: Config) -> Self {
        Self {
            pool,
            storage,
            config: Arc::new(config),
        }
    }

    pub fn media(&self) -> Media<'_> {
        Media::new(self.storage.as_ref(), &self.config)
    }
}
