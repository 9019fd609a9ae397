//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::PanelConfig;
use crate::services::uploads::{UploadClient, UploadError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PanelConfig,
    pool: PgPool,
    uploads: UploadClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Panel configuration
    /// * `pool` - `PostgreSQL` connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the upload client fails to build.
    pub fn new(config: PanelConfig, pool: PgPool) -> Result<Self, UploadError> {
        let uploads = UploadClient::new(&config.uploads)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                uploads,
            }),
        })
    }

    /// Get a reference to the panel configuration.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the upload service client.
    #[must_use]
    pub fn uploads(&self) -> &UploadClient {
        &self.inner.uploads
    }
}
