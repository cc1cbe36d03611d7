//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;

use crate::config::Config;
use crate::db;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,
}

impl AppState {
    /// Initialize state: connect to the database and apply migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config).await?;
        db::run_migrations(&db).await?;

        Ok(Self {
            inner: Arc::new(AppStateInner { db }),
        })
    }

    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub async fn database_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
