use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    NewPost, PageRequest, Paginated, Post, PostId, PostWithRelations, UserId,
};
use crate::error::{DomainError, RepoError};
use crate::locale::Locale;
use crate::ports::{CategoryRepository, PostRepository, UniquenessScope, UserRepository};
use crate::validation::{Payload, validate_post};

use super::unique_slug_guard;

/// CRUD operations for posts, plus author/category embedding for reads.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
    locale: Locale,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserRepository>,
        locale: Locale,
    ) -> Self {
        Self {
            posts,
            categories,
            users,
            locale,
        }
    }

    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<PostWithRelations>, DomainError> {
        let page = self.posts.paginate(page).await?;
        let items = self.with_relations(page.items).await?;
        Ok(Paginated {
            items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
        })
    }

    pub async fn get(&self, id: PostId) -> Result<PostWithRelations, DomainError> {
        let post = self.find(id).await?;
        let mut loaded = self.with_relations(vec![post]).await?;
        loaded.pop().ok_or_else(|| self.not_found(id))
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        Ok(self.posts.slug_exists(slug, UniquenessScope::Global).await?)
    }

    /// Create a post authored by `author`.
    pub async fn create(&self, payload: &Payload, author: UserId) -> Result<Post, DomainError> {
        let changes = validate_post(
            payload,
            UniquenessScope::Global,
            self.posts.as_ref(),
            self.categories.as_ref(),
        )
        .await?;

        if self.users.find_by_id(author).await?.is_none() {
            tracing::warn!(user_id = author, "Post author does not exist");
            return Err(DomainError::Unauthorized);
        }

        tracing::debug!(user_id = author, slug = %changes.slug, "Creating post");
        let post = self
            .posts
            .insert(NewPost::new(changes, author, Utc::now()))
            .await
            .map_err(unique_slug_guard)?;

        tracing::info!(post_id = post.id, user_id = author, "Post created");
        Ok(post)
    }

    pub async fn update(&self, id: PostId, payload: &Payload) -> Result<Post, DomainError> {
        let mut post = self.find(id).await?;
        let changes = validate_post(
            payload,
            UniquenessScope::ExcludingId(id),
            self.posts.as_ref(),
            self.categories.as_ref(),
        )
        .await?;

        post.apply(changes, Utc::now());
        let post = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => self.not_found(id),
            other => unique_slug_guard(other),
        })?;

        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        self.find(id).await?;
        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => self.not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    async fn find(&self, id: PostId) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    /// Load the authors and categories of `posts` with one query each.
    async fn with_relations(
        &self,
        posts: Vec<Post>,
    ) -> Result<Vec<PostWithRelations>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<_> = posts
            .iter()
            .map(|p| p.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let category_ids: Vec<_> = posts
            .iter()
            .map(|p| p.category_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let users: HashMap<_, _> = self
            .users
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.summary()))
            .collect();
        let categories: HashMap<_, _> = self
            .categories
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c.summary()))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| PostWithRelations {
                user: users.get(&post.user_id).cloned(),
                category: categories.get(&post.category_id).cloned(),
                post,
            })
            .collect())
    }

    fn not_found(&self, id: PostId) -> DomainError {
        DomainError::not_found("Post", id, self.locale.post_not_found())
    }
}
