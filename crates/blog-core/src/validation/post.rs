use std::sync::LazyLock;

use regex::Regex;

use crate::domain::PostChanges;
use crate::error::DomainError;
use crate::ports::{CategoryRepository, PostRepository, UniquenessScope};

use super::{MAX_EXCERPT_LEN, MAX_SLUG_LEN, MAX_TITLE_LEN, Payload, ValidationErrors, rules};

static POST_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("post slug pattern compiles"));

/// Lowercase ASCII letters, digits and hyphens only.
pub fn is_valid_post_slug(slug: &str) -> bool {
    POST_SLUG.is_match(slug)
}

/// Validate a post submission.
///
/// `title`, `slug` and `category_id` are required on update as well; the
/// nullable fields are only touched when submitted.
pub async fn validate_post(
    payload: &Payload,
    scope: UniquenessScope,
    posts: &dyn PostRepository,
    categories: &dyn CategoryRepository,
) -> Result<PostChanges, DomainError> {
    let mut errors = ValidationErrors::new();

    let title = rules::required_string(payload, "title", MAX_TITLE_LEN, &mut errors);
    let mut slug = rules::required_string(payload, "slug", MAX_SLUG_LEN, &mut errors);
    let content_raw = rules::nullable_string(payload, "content_raw", None, &mut errors);
    let excerpt = rules::nullable_string(payload, "excerpt", Some(MAX_EXCERPT_LEN), &mut errors);
    let category_id = rules::required_integer(payload, "category_id", &mut errors);
    let is_published = rules::optional_boolean(payload, "is_published", &mut errors);

    if slug.as_deref().is_some_and(|s| !is_valid_post_slug(s)) {
        errors.add("slug", rules::invalid_format("slug"));
        slug = None;
    }

    if let Some(slug) = &slug {
        if posts.slug_exists(slug, scope).await? {
            errors.add("slug", rules::taken("slug"));
        }
    }

    if let Some(category_id) = category_id {
        if categories.find_by_id(category_id).await?.is_none() {
            errors.add("category_id", rules::invalid_selection("category_id"));
        }
    }

    match (title, slug, category_id) {
        (Some(title), Some(slug), Some(category_id)) if errors.is_empty() => Ok(PostChanges {
            title,
            slug,
            category_id,
            content_raw,
            excerpt,
            is_published,
        }),
        _ => Err(DomainError::Validation(errors)),
    }
}
