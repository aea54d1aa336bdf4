use std::collections::HashSet;

use crate::domain::{CategoryChanges, CategoryId};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, UniquenessScope};

use super::{MAX_SLUG_LEN, MAX_TITLE_LEN, Payload, ValidationErrors, rules};

/// Validate a category submission.
///
/// `scope` is `Global` on create and `ExcludingId(id)` on update; in the
/// latter case the parent may be neither the category itself nor one of
/// its descendants.
pub async fn validate_category(
    payload: &Payload,
    scope: UniquenessScope,
    categories: &dyn CategoryRepository,
) -> Result<CategoryChanges, DomainError> {
    let mut errors = ValidationErrors::new();

    let title = rules::required_string(payload, "title", MAX_TITLE_LEN, &mut errors);
    let slug = rules::required_string(payload, "slug", MAX_SLUG_LEN, &mut errors);
    let parent_id = rules::nullable_integer(payload, "parent_id", &mut errors);
    let description = rules::nullable_string(payload, "description", None, &mut errors);

    if let Some(slug) = &slug {
        if categories.slug_exists(slug, scope).await? {
            errors.add("slug", rules::taken("slug"));
        }
    }

    if let Some(Some(parent_id)) = parent_id {
        check_parent(parent_id, scope.excluded_id(), categories, &mut errors).await?;
    }

    match (title, slug) {
        (Some(title), Some(slug)) if errors.is_empty() => Ok(CategoryChanges {
            title,
            slug,
            parent_id,
            description,
        }),
        _ => Err(DomainError::Validation(errors)),
    }
}

async fn check_parent(
    parent_id: CategoryId,
    own_id: Option<CategoryId>,
    categories: &dyn CategoryRepository,
    errors: &mut ValidationErrors,
) -> Result<(), DomainError> {
    if own_id == Some(parent_id) {
        errors.add(
            "parent_id",
            "The parent id field must not reference the category itself.",
        );
        return Ok(());
    }

    let Some(parent) = categories.find_by_id(parent_id).await? else {
        errors.add("parent_id", rules::invalid_selection("parent_id"));
        return Ok(());
    };

    let Some(own_id) = own_id else {
        return Ok(());
    };

    // Walk up from the new parent; meeting ourselves means a cycle.
    let mut seen = HashSet::from([parent.id]);
    let mut cursor = parent.parent_id;
    while let Some(ancestor_id) = cursor {
        if ancestor_id == own_id {
            errors.add(
                "parent_id",
                "The parent id field must not reference a descendant of the category.",
            );
            break;
        }
        if !seen.insert(ancestor_id) {
            break;
        }
        cursor = categories
            .find_by_id(ancestor_id)
            .await?
            .and_then(|c| c.parent_id);
    }

    Ok(())
}
