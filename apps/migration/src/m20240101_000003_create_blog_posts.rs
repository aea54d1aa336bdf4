use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_blog_categories::BlogCategories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPosts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(BlogPosts::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BlogPosts::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(BlogPosts::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::Excerpt).text().null())
                    .col(ColumnDef::new(BlogPosts::ContentRaw).text().null())
                    .col(
                        ColumnDef::new(BlogPosts::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_category")
                            .from(BlogPosts::Table, BlogPosts::CategoryId)
                            .to(BlogCategories::Table, BlogCategories::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_user")
                            .from(BlogPosts::Table, BlogPosts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_blog_posts_category_id", BlogPosts::CategoryId),
            ("idx_blog_posts_user_id", BlogPosts::UserId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(BlogPosts::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    CategoryId,
    UserId,
    Title,
    Slug,
    Excerpt,
    ContentRaw,
    IsPublished,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
