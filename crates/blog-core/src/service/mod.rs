//! Resource services - the CRUD operations behind the HTTP handlers.

mod category;
mod post;

pub use category::CategoryService;
pub use post::PostService;

use crate::error::{DomainError, RepoError};
use crate::validation::{ValidationErrors, taken_message};

/// The store's unique index is the final guard against two writers racing
/// past the validation pre-check; report its rejection like the pre-check.
fn unique_slug_guard(err: RepoError) -> DomainError {
    match err {
        RepoError::UniqueViolation(constraint) => {
            tracing::debug!(%constraint, "Unique constraint rejected write");
            DomainError::Validation(ValidationErrors::single("slug", taken_message("slug")))
        }
        other => other.into(),
    }
}
