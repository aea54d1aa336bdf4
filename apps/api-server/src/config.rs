//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_core::Locale;
use blog_core::domain::UserId;
use blog_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub locale: Locale,
    pub pagination: PaginationConfig,
    /// Author used for post creation when the caller sent no bearer token.
    pub default_author_id: Option<UserId>,
    pub jwt: Option<JwtSettings>,
}

/// Page sizes of the post listing.
#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    pub per_page: u64,
    pub max_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: 10,
            max_per_page: 100,
        }
    }
}

impl PaginationConfig {
    /// Resolve the requested page size. Missing or zero falls back to the
    /// default; anything above the maximum is clamped.
    pub fn per_page(&self, requested: Option<u64>) -> u64 {
        requested
            .filter(|n| *n > 0)
            .unwrap_or(self.per_page)
            .clamp(1, self.max_per_page.max(1))
    }
}

/// Bearer token settings; present only when `JWT_SECRET` is set.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub expiration_hours: i64,
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        let locale = match env::var("APP_LOCALE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to the default locale");
                Locale::default()
            }),
            Err(_) => Locale::default(),
        };

        let defaults = PaginationConfig::default();
        let pagination = PaginationConfig {
            per_page: parsed("POSTS_PER_PAGE").unwrap_or(defaults.per_page),
            max_per_page: parsed("POSTS_MAX_PER_PAGE").unwrap_or(defaults.max_per_page),
        };

        let jwt = env::var("JWT_SECRET").ok().map(|secret| JwtSettings {
            secret,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "blog-api".to_string()),
            expiration_hours: parsed("JWT_EXPIRATION_HOURS").unwrap_or(24),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            database,
            locale,
            pagination,
            default_author_id: parsed("DEFAULT_AUTHOR_ID"),
            jwt,
        }
    }
}
