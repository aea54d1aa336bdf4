use async_trait::async_trait;

use crate::domain::{
    Category, CategoryId, NewCategory, NewPost, PageRequest, Paginated, Post, PostId, User,
    UserId,
};
use crate::error::RepoError;

/// Which rows a slug uniqueness check covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessScope {
    /// Every row in the table.
    Global,
    /// Every row except the one with this id (the record being updated).
    ExcludingId(i64),
}

impl UniquenessScope {
    /// Whether a row with `id` takes part in the check.
    pub fn covers(&self, id: i64) -> bool {
        match self {
            UniquenessScope::Global => true,
            UniquenessScope::ExcludingId(excluded) => *excluded != id,
        }
    }

    pub fn excluded_id(&self) -> Option<i64> {
        match self {
            UniquenessScope::Global => None,
            UniquenessScope::ExcludingId(id) => Some(*id),
        }
    }
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist every field of an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, CategoryId> {
    /// All categories in store order.
    async fn find_all(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, RepoError>;

    async fn insert(&self, category: NewCategory) -> Result<Category, RepoError>;

    async fn slug_exists(&self, slug: &str, scope: UniquenessScope) -> Result<bool, RepoError>;

    /// Number of categories whose parent is `id`.
    async fn count_children(&self, id: CategoryId) -> Result<u64, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    async fn paginate(&self, page: PageRequest) -> Result<Paginated<Post>, RepoError>;

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn slug_exists(&self, slug: &str, scope: UniquenessScope) -> Result<bool, RepoError>;

    async fn count_by_category(&self, category_id: CategoryId) -> Result<u64, RepoError>;
}

/// User repository - read access for author lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, UserId> {
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepoError>;
}
