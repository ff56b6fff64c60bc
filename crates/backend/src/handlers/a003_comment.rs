use axum::{extract::Path, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;

use crate::domain::a003_comment;
use crate::shared::config;
use contracts::domain::a003_comment::aggregate::{Comment, CommentDto, CommentStatus};
use contracts::shared::list_state::{bulk, BulkReport, BulkRequest};

/// GET /api/comment
pub async fn list_all() -> Result<Json<Vec<Comment>>, StatusCode> {
    match a003_comment::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/comment/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Comment>, StatusCode> {
    match a003_comment::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/comment — форма комментария на сайте
pub async fn submit(Json(dto): Json<CommentDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    match a003_comment::service::submit(dto).await {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            tracing::warn!("comment submit failed: {e:#}");
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// POST /api/comment/:id/status — ручное действие модератора
pub async fn set_status(
    Path(id): Path<i64>,
    Json(req): Json<SetStatusRequest>,
) -> Result<(), StatusCode> {
    let status = CommentStatus::from_code(&req.status);
    match a003_comment::service::set_status(id, status).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// DELETE /api/comment/:id
pub async fn delete(Path(id): Path<i64>) -> Result<(), StatusCode> {
    match a003_comment::service::delete(id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

fn check_limit(ids: &[i64]) -> Result<(), (StatusCode, String)> {
    bulk::check_limit(ids.len(), config::max_bulk_selection())
        .map_err(|msg| (StatusCode::UNPROCESSABLE_ENTITY, msg))
}

/// POST /api/comment/bulk/approve
pub async fn bulk_approve(
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkReport>, (StatusCode, String)> {
    check_limit(&req.ids)?;
    match a003_comment::service::bulk_approve(req.ids).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}

/// POST /api/comment/bulk/spam
pub async fn bulk_mark_spam(
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkReport>, (StatusCode, String)> {
    check_limit(&req.ids)?;
    match a003_comment::service::bulk_mark_spam(req.ids).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}

/// POST /api/comment/bulk/delete
pub async fn bulk_delete(
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkReport>, (StatusCode, String)> {
    check_limit(&req.ids)?;
    match a003_comment::service::bulk_delete(req.ids).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}

/// POST /api/comment/testdata
pub async fn insert_test_data() -> StatusCode {
    match a003_comment::service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("comment testdata failed: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
