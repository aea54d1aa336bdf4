//! # Blog Core
//!
//! The domain layer of the blog backend.
//! This crate contains the entities, the validation rules and the resource
//! services for posts and categories, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod locale;
pub mod ports;
pub mod service;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{DomainError, RepoError};
pub use locale::Locale;
pub use service::{CategoryService, PostService};
pub use validation::{Payload, ValidationErrors};
