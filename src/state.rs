//! Shared application state for all routes.

use crate::config::Settings;
use crate::error::AppError;
use crate::migration::apply_migrations;
use crate::render::Templates;
use crate::store::{ensure_database_exists, MemoryPersonStore, PersonStore, PgPersonStore};
use crate::urls::Urls;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonStore>,
    pub urls: Urls,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(store: Arc<dyn PersonStore>, urls: Urls) -> Result<Self, AppError> {
        Ok(AppState {
            store,
            urls,
            templates: Templates::shared()?,
        })
    }

    /// Build state from settings: PostgreSQL (created and migrated as needed) when
    /// `database_url` is set, otherwise an in-memory store.
    pub async fn connect(settings: &Settings) -> Result<Self, AppError> {
        let urls = Urls::new(settings.mount_path.clone());
        let Some(database_url) = settings.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set; records are kept in memory");
            return Self::new(Arc::new(MemoryPersonStore::new()), urls);
        };
        ensure_database_exists(database_url).await?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(database_url)
            .await?;
        apply_migrations(&pool).await?;
        Self::new(Arc::new(PgPersonStore::new(pool)), urls)
    }
}
