//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use blog_core::domain::{
    Category, CategoryId, NewCategory, NewPost, PageRequest, Paginated, Post, User, UserId,
};
use blog_core::error::RepoError;
use blog_core::ports::{CategoryRepository, PostRepository, UniquenessScope, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new: NewCategory) -> Result<Category, RepoError> {
        let model = category::ActiveModel::from(new)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn slug_exists(&self, slug: &str, scope: UniquenessScope) -> Result<bool, RepoError> {
        let mut query = CategoryEntity::find().filter(category::Column::Slug.eq(slug));
        if let Some(id) = scope.excluded_id() {
            query = query.filter(category::Column::Id.ne(id));
        }

        let found = query.one(&self.db).await.map_err(map_db_err)?;
        Ok(found.is_some())
    }

    async fn count_children(&self, id: CategoryId) -> Result<u64, RepoError> {
        CategoryEntity::find()
            .filter(category::Column::ParentId.eq(id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn paginate(&self, page: PageRequest) -> Result<Paginated<Post>, RepoError> {
        let paginator = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        // past the end: skip the query, sea-orm would overflow computing the offset
        let items = if page.offset() >= total {
            Vec::new()
        } else {
            paginator
                .fetch_page(page.page - 1)
                .await
                .map_err(map_db_err)?
        };

        tracing::debug!(page = page.page, per_page = page.per_page, total, "Fetched post page");

        Ok(Paginated {
            items: items.into_iter().map(Into::into).collect(),
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn insert(&self, new: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn slug_exists(&self, slug: &str, scope: UniquenessScope) -> Result<bool, RepoError> {
        let mut query = PostEntity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = scope.excluded_id() {
            query = query.filter(post::Column::Id.ne(id));
        }

        let found = query.one(&self.db).await.map_err(map_db_err)?;
        Ok(found.is_some())
    }

    async fn count_by_category(&self, category_id: CategoryId) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
