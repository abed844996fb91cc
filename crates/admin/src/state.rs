//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::AdminConfig,
    services::{AssetStore, EmailService, TokenService},
};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    email: EmailService,
    tokens: TokenService,
    assets: AssetStore,
}

impl AppState {
    /// Build the application state from configuration and a database pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be configured or the
    /// uploads directory cannot be created.
    pub async fn new(
        config: &AdminConfig,
        pool: PgPool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let email = EmailService::new(&config.email)?;
        let tokens = TokenService::new(&config.jwt_secret);
        let assets = AssetStore::new(config.uploads_dir.clone());
        assets.ensure_root().await?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                pool,
                email,
                tokens,
                assets,
            }),
        })
    }

    /// Database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Transactional email service.
    #[must_use]
    pub fn email(&self) -> &EmailService {
        &self.inner.email
    }

    /// Bearer token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Uploaded asset store.
    #[must_use]
    pub fn assets(&self) -> &AssetStore {
        &self.inner.assets
    }
}
