use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Category, CategoryId, NewCategory};
use crate::error::{DomainError, RepoError};
use crate::locale::Locale;
use crate::ports::{CategoryRepository, PostRepository, UniquenessScope};
use crate::validation::{Payload, validate_category};

use super::unique_slug_guard;

/// CRUD operations for categories.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    locale: Locale,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostRepository>,
        locale: Locale,
    ) -> Self {
        Self {
            categories,
            posts,
            locale,
        }
    }

    pub async fn list(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.find_all().await?)
    }

    pub async fn get(&self, id: CategoryId) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        Ok(self
            .categories
            .slug_exists(slug, UniquenessScope::Global)
            .await?)
    }

    pub async fn create(&self, payload: &Payload) -> Result<Category, DomainError> {
        let changes =
            validate_category(payload, UniquenessScope::Global, self.categories.as_ref()).await?;

        let category = self
            .categories
            .insert(NewCategory::new(changes, Utc::now()))
            .await
            .map_err(unique_slug_guard)?;

        tracing::info!(category_id = category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: CategoryId, payload: &Payload) -> Result<Category, DomainError> {
        let mut category = self.get(id).await?;
        let changes = validate_category(
            payload,
            UniquenessScope::ExcludingId(id),
            self.categories.as_ref(),
        )
        .await?;

        category.apply(changes, Utc::now());
        let category = self
            .categories
            .update(category)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => self.not_found(id),
                other => unique_slug_guard(other),
            })?;

        tracing::info!(category_id = id, "Category updated");
        Ok(category)
    }

    /// Delete a category. Refused while posts or subcategories reference it.
    pub async fn delete(&self, id: CategoryId) -> Result<(), DomainError> {
        self.get(id).await?;

        let children = self.categories.count_children(id).await?;
        let posts = self.posts.count_by_category(id).await?;
        if children > 0 || posts > 0 {
            tracing::info!(category_id = id, children, posts, "Category deletion refused");
            return Err(DomainError::Conflict(self.locale.category_in_use().to_string()));
        }

        self.categories.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => self.not_found(id),
            RepoError::ForeignKeyViolation(_) => {
                DomainError::Conflict(self.locale.category_in_use().to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    fn not_found(&self, id: CategoryId) -> DomainError {
        DomainError::not_found("Category", id, self.locale.category_not_found())
    }
}
