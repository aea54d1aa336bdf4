//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::domain::{User, UserId};
use blog_core::ports::{CategoryRepository, PostRepository, UserRepository};
use blog_core::{CategoryService, Locale, PostService};
use blog_infra::{InMemoryCategoryRepository, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use blog_infra::database::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository, connect,
};

use crate::config::{AppConfig, PaginationConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub posts: PostService,
    pub locale: Locale,
    pub pagination: PaginationConfig,
    pub default_author: Option<UserId>,
}

type Repositories = (
    Arc<dyn CategoryRepository>,
    Arc<dyn PostRepository>,
    Arc<dyn UserRepository>,
);

/// In-memory tables with the default author the migration would seed.
fn memory_repositories() -> Repositories {
    let now = chrono::Utc::now();
    let admin = User {
        id: 1,
        name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        created_at: now,
        updated_at: now,
    };

    (
        Arc::new(InMemoryCategoryRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryUserRepository::seeded([admin])),
    )
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let repos: Repositories = match &config.database {
            Some(db_config) => match connect(db_config).await {
                Ok(conn) => (
                    Arc::new(PostgresCategoryRepository::new(conn.clone())),
                    Arc::new(PostgresPostRepository::new(conn.clone())),
                    Arc::new(PostgresUserRepository::new(conn)),
                ),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    memory_repositories()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                memory_repositories()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos: Repositories = {
            tracing::info!("Running without postgres feature - using in-memory repository");
            memory_repositories()
        };

        let state = Self::from_repositories(repos, config);
        tracing::info!(locale = %state.locale, "Application state initialized");
        state
    }

    /// State over fresh in-memory tables.
    #[cfg(test)]
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::from_repositories(memory_repositories(), config)
    }

    fn from_repositories(
        (categories, posts, users): Repositories,
        config: &AppConfig,
    ) -> Self {
        Self {
            categories: CategoryService::new(categories.clone(), posts.clone(), config.locale),
            posts: PostService::new(posts, categories, users, config.locale),
            locale: config.locale,
            pagination: config.pagination,
            default_author: config.default_author_id,
        }
    }
}
