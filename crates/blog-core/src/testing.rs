//! Vec-backed repository stubs for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Category, CategoryId, NewCategory, NewPost, PageRequest, Paginated, Post, PostId, User, UserId,
};
use crate::error::RepoError;
use crate::ports::{
    BaseRepository, CategoryRepository, PostRepository, UniquenessScope, UserRepository,
};

pub(crate) fn category(id: CategoryId, slug: &str, parent_id: Option<CategoryId>) -> Category {
    let now = Utc::now();
    Category {
        id,
        title: slug.to_uppercase(),
        slug: slug.to_string(),
        parent_id,
        description: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn post(id: PostId, slug: &str) -> Post {
    let now = Utc::now();
    Post {
        id,
        category_id: 1,
        user_id: 1,
        title: slug.to_string(),
        slug: slug.to_string(),
        excerpt: None,
        content_raw: None,
        is_published: false,
        published_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Rejects a duplicate slug on write the way the store's unique index does.
fn check_unique<'a>(
    mut slugs: impl Iterator<Item = (i64, &'a str)>,
    id: i64,
    slug: &str,
) -> Result<(), RepoError> {
    if slugs.any(|(other, taken)| other != id && taken == slug) {
        return Err(RepoError::UniqueViolation(format!("slug `{slug}`")));
    }
    Ok(())
}

#[derive(Default)]
pub(crate) struct StubCategories {
    rows: Mutex<Vec<Category>>,
    stale_slug_check: bool,
}

impl StubCategories {
    pub fn with(rows: &[(CategoryId, &str, Option<CategoryId>)]) -> Self {
        Self {
            rows: Mutex::new(
                rows.iter()
                    .map(|(id, slug, parent)| category(*id, slug, *parent))
                    .collect(),
            ),
            stale_slug_check: false,
        }
    }

    /// `slug_exists` always answers false, as if a concurrent writer took
    /// the slug between the check and the write.
    pub fn stale_slug_check(mut self) -> Self {
        self.stale_slug_check = true;
        self
    }

    pub fn rows(&self) -> Vec<Category> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseRepository<Category, CategoryId> for StubCategories {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, entity: Category) -> Result<Category, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        check_unique(rows.iter().map(|c| (c.id, c.slug.as_str())), entity.id, &entity.slug)?;
        let row = rows
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *row = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: CategoryId) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for StubCategories {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, category: NewCategory) -> Result<Category, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        check_unique(rows.iter().map(|c| (c.id, c.slug.as_str())), id, &category.slug)?;
        let created = Category {
            id,
            title: category.title,
            slug: category.slug,
            parent_id: category.parent_id,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn slug_exists(&self, slug: &str, scope: UniquenessScope) -> Result<bool, RepoError> {
        if self.stale_slug_check {
            return Ok(false);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.slug == slug && scope.covers(c.id)))
    }

    async fn count_children(&self, id: CategoryId) -> Result<u64, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.parent_id == Some(id))
            .count() as u64)
    }
}

#[derive(Default)]
pub(crate) struct StubPosts {
    rows: Mutex<Vec<Post>>,
    stale_slug_check: bool,
}

impl StubPosts {
    pub fn with(rows: &[(PostId, &str)]) -> Self {
        Self {
            rows: Mutex::new(rows.iter().map(|(id, slug)| post(*id, slug)).collect()),
            stale_slug_check: false,
        }
    }

    /// See [`StubCategories::stale_slug_check`].
    pub fn stale_slug_check(mut self) -> Self {
        self.stale_slug_check = true;
        self
    }

    pub fn rows(&self) -> Vec<Post> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for StubPosts {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        check_unique(rows.iter().map(|p| (p.id, p.slug.as_str())), entity.id, &entity.slug)?;
        let row = rows
            .iter_mut()
            .find(|p| p.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *row = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for StubPosts {
    async fn paginate(&self, page: PageRequest) -> Result<Paginated<Post>, RepoError> {
        let rows = self.rows.lock().unwrap();
        let items = rows
            .iter()
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

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        check_unique(rows.iter().map(|p| (p.id, p.slug.as_str())), id, &post.slug)?;
        let created = Post {
            id,
            category_id: post.category_id,
            user_id: post.user_id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content_raw: post.content_raw,
            is_published: post.is_published,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn slug_exists(&self, slug: &str, scope: UniquenessScope) -> Result<bool, RepoError> {
        if self.stale_slug_check {
            return Ok(false);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.slug == slug && scope.covers(p.id)))
    }

    async fn count_by_category(&self, category_id: CategoryId) -> Result<u64, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.category_id == category_id)
            .count() as u64)
    }
}

pub(crate) struct StubUsers(pub Vec<User>);

impl StubUsers {
    pub fn with(rows: &[(UserId, &str)]) -> Self {
        let now = Utc::now();
        Self(
            rows.iter()
                .map(|(id, name)| User {
                    id: *id,
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    created_at: now,
                    updated_at: now,
                })
                .collect(),
        )
    }
}

#[async_trait]
impl BaseRepository<User, UserId> for StubUsers {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.0.iter().find(|u| u.id == id).cloned())
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        Ok(entity)
    }

    async fn delete(&self, _id: UserId) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for StubUsers {
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepoError> {
        Ok(self
            .0
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}
