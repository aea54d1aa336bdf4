//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `auth` - JWT bearer token validation

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::memory::{
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
