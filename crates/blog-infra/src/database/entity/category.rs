//! Category entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{Category, NewCategory};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub parent_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Parent,
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Category.
impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            parent_id: model.parent_id,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Category to SeaORM ActiveModel.
impl From<Category> for ActiveModel {
    fn from(category: Category) -> Self {
        Self {
            id: Set(category.id),
            title: Set(category.title),
            slug: Set(category.slug),
            parent_id: Set(category.parent_id),
            description: Set(category.description),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
        }
    }
}

/// Insert form - the id is left to the sequence.
impl From<NewCategory> for ActiveModel {
    fn from(category: NewCategory) -> Self {
        Self {
            title: Set(category.title),
            slug: Set(category.slug),
            parent_id: Set(category.parent_id),
            description: Set(category.description),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
            ..Default::default()
        }
    }
}
