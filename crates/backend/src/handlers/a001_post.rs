use axum::{extract::Path, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;

use crate::domain::a001_post;
use crate::shared::config;
use contracts::domain::a001_post::aggregate::{Post, PostDto, PostEditableField};
use contracts::shared::list_state::{bulk, BulkReport, BulkRequest};

/// GET /api/post
pub async fn list_all() -> Result<Json<Vec<Post>>, StatusCode> {
    match a001_post::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/post/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Post>, StatusCode> {
    match a001_post::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/post
pub async fn upsert(Json(dto): Json<PostDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a001_post::service::update(dto).await.map(|_| 0)
    } else {
        // Бизнес-роуты пока без авторизации, автором становится
        // первый администратор
        a001_post::service::create(dto, 1).await
    };
    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            tracing::warn!("post upsert failed: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/post/:id
pub async fn delete(Path(id): Path<i64>) -> Result<(), StatusCode> {
    match a001_post::service::delete(id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub field: String,
    pub value: String,
}

/// PATCH /api/post/:id/field — inline-редактирование одного поля
pub async fn set_field(
    Path(id): Path<i64>,
    Json(req): Json<SetFieldRequest>,
) -> Result<(), (StatusCode, String)> {
    let Some(field) = PostEditableField::from_code(&req.field) else {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Поле недоступно для inline-редактирования: {}", req.field),
        ));
    };
    a001_post::service::set_field(id, field, &req.value)
        .await
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}")))
}

fn check_limit(ids: &[i64]) -> Result<(), (StatusCode, String)> {
    bulk::check_limit(ids.len(), config::max_bulk_selection())
        .map_err(|msg| (StatusCode::UNPROCESSABLE_ENTITY, msg))
}

/// POST /api/post/bulk/publish
pub async fn bulk_publish(
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkReport>, (StatusCode, String)> {
    check_limit(&req.ids)?;
    match a001_post::service::bulk_publish(req.ids).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}

/// POST /api/post/bulk/unpublish
pub async fn bulk_unpublish(
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkReport>, (StatusCode, String)> {
    check_limit(&req.ids)?;
    match a001_post::service::bulk_unpublish(req.ids).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}

/// POST /api/post/bulk/delete
pub async fn bulk_delete(
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkReport>, (StatusCode, String)> {
    check_limit(&req.ids)?;
    match a001_post::service::bulk_delete(req.ids).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}

/// POST /api/post/testdata
pub async fn insert_test_data() -> StatusCode {
    match a001_post::service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("post testdata failed: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
