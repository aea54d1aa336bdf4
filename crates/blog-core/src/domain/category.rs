use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CategoryId = i64;

/// Category entity - a taxonomy entry, optionally nested under a parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub slug: String,
    pub parent_id: Option<CategoryId>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated category fields.
///
/// The nullable fields are doubly optional: the outer `None` means the field
/// was not submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChanges {
    pub title: String,
    pub slug: String,
    pub parent_id: Option<Option<CategoryId>>,
    pub description: Option<Option<String>>,
}

/// A category ready to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub title: String,
    pub slug: String,
    pub parent_id: Option<CategoryId>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewCategory {
    pub fn new(changes: CategoryChanges, now: DateTime<Utc>) -> Self {
        Self {
            title: changes.title,
            slug: changes.slug,
            parent_id: changes.parent_id.flatten(),
            description: changes.description.flatten(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Category {
    /// Apply the submitted fields and bump `updated_at`.
    pub fn apply(&mut self, changes: CategoryChanges, now: DateTime<Utc>) {
        self.title = changes.title;
        self.slug = changes.slug;
        if let Some(parent_id) = changes.parent_id {
            self.parent_id = parent_id;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = now;
    }

    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// The `{id, title}` view of a category embedded in post responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub title: String,
}
