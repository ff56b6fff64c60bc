use axum::{extract::Path, http::StatusCode, Json};
use serde_json::json;

use crate::domain::a002_category;
use crate::shared::config;
use contracts::domain::a002_category::aggregate::{Category, CategoryDto};
use contracts::shared::list_state::{bulk, BulkReport, BulkRequest};

/// GET /api/category
pub async fn list_all() -> Result<Json<Vec<Category>>, StatusCode> {
    match a002_category::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/category/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Category>, StatusCode> {
    match a002_category::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/category
pub async fn upsert(Json(dto): Json<CategoryDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a002_category::service::update(dto).await.map(|_| 0)
    } else {
        a002_category::service::create(dto).await
    };
    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            tracing::warn!("category upsert failed: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/category/:id
pub async fn delete(Path(id): Path<i64>) -> Result<(), (StatusCode, String)> {
    match a002_category::service::delete(id).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(reason)) => Err((StatusCode::CONFLICT, reason)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}

/// POST /api/category/bulk/delete
pub async fn bulk_delete(
    Json(req): Json<BulkRequest>,
) -> Result<Json<BulkReport>, (StatusCode, String)> {
    bulk::check_limit(req.ids.len(), config::max_bulk_selection())
        .map_err(|msg| (StatusCode::UNPROCESSABLE_ENTITY, msg))?;
    match a002_category::service::bulk_delete(req.ids).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}

/// POST /api/category/testdata
pub async fn insert_test_data() -> StatusCode {
    match a002_category::service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("category testdata failed: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
