use chrono::Utc;
use contracts::domain::a001_post::aggregate::PostId;
use contracts::domain::a003_comment::aggregate::{Comment, CommentId, CommentStatus};
use contracts::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub post_ref: i64,
    pub author_name: String,
    pub author_email: Option<String>,
    pub body: String,
    pub status: String,
    pub spam_score: f32,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            // у комментария нет понятия публикации, одобрение — в status
            is_published: false,
            version: m.version,
        };

        Comment {
            id: CommentId::new(m.id),
            post_ref: PostId::new(m.post_ref),
            author_name: m.author_name,
            author_email: m.author_email,
            body: m.body,
            status: CommentStatus::from_code(&m.status),
            spam_score: m.spam_score,
            metadata,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Comment>> {
    let items: Vec<Comment> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Comment>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    Ok(result.filter(|m| !m.is_deleted).map(Into::into))
}

pub async fn insert(aggregate: &Comment) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        post_ref: Set(aggregate.post_ref.value()),
        author_name: Set(aggregate.author_name.clone()),
        author_email: Set(aggregate.author_email.clone()),
        body: Set(aggregate.body.clone()),
        status: Set(aggregate.status.code().to_string()),
        spam_score: Set(aggregate.spam_score),
        is_deleted: Set(aggregate.metadata.is_deleted),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    };
    let res = Entity::insert(active).exec(conn()).await?;
    Ok(res.last_insert_id)
}

/// Обновить статус модерации
pub async fn set_status(id: i64, status: CommentStatus) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.code()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
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
