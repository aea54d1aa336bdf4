use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::{CategoryId, CategorySummary};
use super::user::{AuthorSummary, UserId};

pub type PostId = i64;

/// Post entity - a blog post filed under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub category_id: CategoryId,
    pub user_id: UserId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content_raw: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated post fields.
///
/// The nullable fields are doubly optional: the outer `None` means the field
/// was not submitted and the stored value must be kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub slug: String,
    pub category_id: CategoryId,
    pub content_raw: Option<Option<String>>,
    pub excerpt: Option<Option<String>>,
    pub is_published: Option<bool>,
}

/// A post ready to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub category_id: CategoryId,
    pub user_id: UserId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content_raw: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(changes: PostChanges, author: UserId, now: DateTime<Utc>) -> Self {
        let is_published = changes.is_published.unwrap_or(false);
        Self {
            category_id: changes.category_id,
            user_id: author,
            title: changes.title,
            slug: changes.slug,
            excerpt: changes.excerpt.flatten(),
            content_raw: changes.content_raw.flatten(),
            is_published,
            published_at: is_published.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Post {
    /// Merge validated changes onto the stored post.
    ///
    /// `published_at` is stamped the first time the post is published and
    /// cleared when it is withdrawn.
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        self.title = changes.title;
        self.slug = changes.slug;
        self.category_id = changes.category_id;
        if let Some(content_raw) = changes.content_raw {
            self.content_raw = content_raw;
        }
        if let Some(excerpt) = changes.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(is_published) = changes.is_published {
            match (self.is_published, is_published) {
                (false, true) => self.published_at = Some(now),
                (true, false) => self.published_at = None,
                _ => {}
            }
            self.is_published = is_published;
        }
        self.updated_at = now;
    }
}

/// A post together with its author and category summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithRelations {
    #[serde(flatten)]
    pub post: Post,
    pub user: Option<AuthorSummary>,
    pub category: Option<CategorySummary>,
}
