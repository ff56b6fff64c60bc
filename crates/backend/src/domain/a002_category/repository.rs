use chrono::Utc;
use contracts::domain::a002_category::aggregate::{Category, CategoryId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub comment: Option<String>,
    pub parent_ref: Option<i64>,
    pub color: Option<String>,
    pub position: i32,
    pub is_deleted: bool,
    pub is_published: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_published: m.is_published,
            version: m.version,
        };

        Category {
            base: BaseAggregate::with_metadata(
                CategoryId::new(m.id),
                m.slug,
                m.title,
                m.comment,
                metadata,
            ),
            parent_ref: m.parent_ref.map(CategoryId::new),
            color: m.color,
            position: m.position,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Category) -> ActiveModel {
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        slug: Set(aggregate.base.slug.clone()),
        title: Set(aggregate.base.title.clone()),
        comment: Set(aggregate.base.comment.clone()),
        parent_ref: Set(aggregate.parent_ref.map(|p| p.value())),
        color: Set(aggregate.color.clone()),
        position: Set(aggregate.position),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_published: Set(aggregate.base.metadata.is_published),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    let mut items: Vec<Category> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by_key(|c| (c.position, c.base.title.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Category>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.filter(|m| !m.is_deleted).map(Into::into))
}

pub async fn get_by_slug(slug: &str) -> anyhow::Result<Option<Category>> {
    let result = Entity::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Category) -> anyhow::Result<i64> {
    let res = Entity::insert(to_active(aggregate)).exec(conn()).await?;
    Ok(res.last_insert_id)
}

pub async fn update(aggregate: &Category) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.id = Set(aggregate.base.id.value());
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: i64) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Сколько живых рубрик ссылаются на эту как на родителя
pub async fn count_children(id: i64) -> anyhow::Result<u64> {
    use sea_orm::PaginatorTrait;
    let count = Entity::find()
        .filter(Column::ParentRef.eq(id))
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count)
}
