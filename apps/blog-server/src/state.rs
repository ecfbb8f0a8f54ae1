//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{PasswordService, Repositories, TokenService};
use blog_core::services::{AccountService, AuthoringService, ContentService};
use blog_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the state, falling back to the in-memory store when the
    /// database is not configured or unreachable.
    pub async fn new(config: &AppConfig) -> Self {
        let repos = Self::repositories(config).await;

        tracing::info!("Application state initialized");
        Self::with_repositories(repos, config.jwt.clone())
    }

    /// State over the in-memory store.
    pub fn in_memory(jwt: JwtConfig) -> Self {
        Self::with_repositories(Arc::new(InMemoryStore::new()).repositories(), jwt)
    }

    fn with_repositories(repos: Repositories, jwt: JwtConfig) -> Self {
        Self {
            repos,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> Repositories {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryStore::new()).repositories();
        };

        match blog_infra::database::connect(db_config).await {
            Ok(db) => blog_infra::database::repositories(db),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryStore::new()).repositories()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(config: &AppConfig) -> Repositories {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory store");
        Arc::new(InMemoryStore::new()).repositories()
    }

    pub fn content(&self) -> ContentService {
        ContentService::new(self.repos.clone())
    }

    pub fn authoring(&self) -> AuthoringService {
        AuthoringService::new(self.repos.clone())
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.repos.clone(), self.passwords.clone())
    }
}
