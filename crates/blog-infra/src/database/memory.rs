//! In-memory store - used as fallback when no database is configured.
//!
//! Each table is a `BTreeMap` behind an async `RwLock`, so iteration follows
//! id order like the database default. Slug uniqueness is enforced on write
//! the way the database unique index would.
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{
    Category, CategoryId, NewCategory, NewPost, PageRequest, Paginated, Post, User, UserId,
};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CategoryRepository, PostRepository, UniquenessScope, UserRepository,
};

/// A row that can live in an [`InMemoryRepository`].
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;

    /// Value covered by a unique index, if the table has one.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Record for Category {
    fn id(&self) -> i64 {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(self.slug.as_str())
    }
}

impl Record for Post {
    fn id(&self) -> i64 {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(self.slug.as_str())
    }
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Generic in-memory table.
pub struct InMemoryRepository<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

pub type InMemoryCategoryRepository = InMemoryRepository<Category>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryUserRepository = InMemoryRepository<User>;

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Start with existing rows; new ids continue after the largest one.
    pub fn seeded(rows: impl IntoIterator<Item = T>) -> Self {
        let rows: BTreeMap<i64, T> = rows.into_iter().map(|r| (r.id(), r)).collect();
        let next = rows.keys().next_back().copied().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicI64::new(next),
        }
    }

    fn check_unique(rows: &BTreeMap<i64, T>, candidate: &T) -> Result<(), RepoError> {
        let Some(key) = candidate.unique_key() else {
            return Ok(());
        };
        let clash = rows
            .values()
            .any(|r| r.id() != candidate.id() && r.unique_key() == Some(key));
        if clash {
            return Err(RepoError::UniqueViolation(format!("slug `{key}`")));
        }
        Ok(())
    }

    /// Assign the next id and store the row built by `build`.
    async fn insert_with(&self, build: impl FnOnce(i64) -> T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        let row = build(self.next_id.load(Ordering::SeqCst));
        Self::check_unique(&rows, &row)?;
        self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.insert(row.id(), row.clone());
        Ok(row)
    }

    async fn find_where(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        let rows = self.rows.read().await;
        rows.values().filter(|r| pred(*r)).cloned().collect()
    }

    async fn count_where(&self, pred: impl Fn(&T) -> bool) -> u64 {
        let rows = self.rows.read().await;
        rows.values().filter(|r| pred(*r)).count() as u64
    }

    async fn key_exists(&self, key: &str, scope: UniquenessScope) -> bool {
        let rows = self.rows.read().await;
        rows.values()
            .any(|r| r.unique_key() == Some(key) && scope.covers(r.id()))
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, i64> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        // Use async read lock - doesn't block the executor
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        Self::check_unique(&rows, &entity)?;
        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.find_where(|_| true).await)
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, RepoError> {
        Ok(self.find_where(|c| ids.contains(&c.id)).await)
    }

    async fn insert(&self, new: NewCategory) -> Result<Category, RepoError> {
        self.insert_with(|id| Category {
            id,
            title: new.title,
            slug: new.slug,
            parent_id: new.parent_id,
            description: new.description,
            created_at: new.created_at,
            updated_at: new.updated_at,
        })
        .await
    }

    async fn slug_exists(&self, slug: &str, scope: UniquenessScope) -> Result<bool, RepoError> {
        Ok(self.key_exists(slug, scope).await)
    }

    async fn count_children(&self, id: CategoryId) -> Result<u64, RepoError> {
        Ok(self.count_where(|c| c.parent_id == Some(id)).await)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn paginate(&self, page: PageRequest) -> Result<Paginated<Post>, RepoError> {
        let rows = self.rows.read().await;
        let items = rows
            .values()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect();

        Ok(Paginated {
            items,
            page: page.page,
            per_page: page.per_page,
            total: rows.len() as u64,
        })
    }

    async fn insert(&self, new: NewPost) -> Result<Post, RepoError> {
        self.insert_with(|id| Post {
            id,
            category_id: new.category_id,
            user_id: new.user_id,
            title: new.title,
            slug: new.slug,
            excerpt: new.excerpt,
            content_raw: new.content_raw,
            is_published: new.is_published,
            published_at: new.published_at,
            created_at: new.created_at,
            updated_at: new.updated_at,
        })
        .await
    }

    async fn slug_exists(&self, slug: &str, scope: UniquenessScope) -> Result<bool, RepoError> {
        Ok(self.key_exists(slug, scope).await)
    }

    async fn count_by_category(&self, category_id: CategoryId) -> Result<u64, RepoError> {
        Ok(self.count_where(|p| p.category_id == category_id).await)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepoError> {
        Ok(self.find_where(|u| ids.contains(&u.id)).await)
    }
}
