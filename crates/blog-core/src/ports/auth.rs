//! Caller identity port. Tokens are issued by an external auth service;
//! the blog only validates them.

use crate::domain::UserId;

/// Claims carried by a bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub name: Option<String>,
    pub exp: i64,
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user. Used by tooling and tests.
    fn generate_token(&self, user_id: UserId, name: Option<&str>) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
