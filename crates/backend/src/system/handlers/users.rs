use axum::{extract::Path, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::shared::config;
use crate::system::users::service;
use contracts::shared::list_state::{bulk, BulkReport};
use contracts::system::auth::TokenClaims;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};

fn actor_id(claims: &TokenClaims) -> Result<i64, StatusCode> {
    claims.sub.parse().map_err(|_| StatusCode::UNAUTHORIZED)
}

/// GET /api/system/users
pub async fn list() -> Result<Json<Vec<User>>, StatusCode> {
    match service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/system/users/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    match service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/system/users
pub async fn create(
    Extension(claims): Extension<TokenClaims>,
    Json(dto): Json<CreateUserDto>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let actor = actor_id(&claims).map_err(|s| (s, String::new()))?;
    match service::create(dto, Some(actor)).await {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => Err((StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}"))),
    }
}

/// PUT /api/system/users/:id
pub async fn update(
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<i64>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<(), (StatusCode, String)> {
    let actor = actor_id(&claims).map_err(|s| (s, String::new()))?;
    dto.id = id;
    service::update(dto, actor)
        .await
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}")))
}

/// DELETE /api/system/users/:id
pub async fn delete(
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<i64>,
) -> Result<(), (StatusCode, String)> {
    let actor = actor_id(&claims).map_err(|s| (s, String::new()))?;
    match service::delete(id, actor).await {
        Ok(true) => Ok(()),
        Ok(false) => Err((StatusCode::NOT_FOUND, String::new())),
        Err(e) => Err((StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}"))),
    }
}

/// POST /api/system/users/:id/change-password
pub async fn change_password(
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<i64>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> Result<(), (StatusCode, String)> {
    let actor = actor_id(&claims).map_err(|s| (s, String::new()))?;
    dto.user_id = id;
    service::change_password(dto, actor, claims.is_admin)
        .await
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}")))
}

#[derive(Debug, Deserialize)]
pub struct BulkActiveRequest {
    pub ids: Vec<i64>,
    pub active: bool,
}

/// POST /api/system/users/bulk/active — массовая блокировка/разблокировка
pub async fn bulk_active(
    Extension(claims): Extension<TokenClaims>,
    Json(req): Json<BulkActiveRequest>,
) -> Result<Json<BulkReport>, (StatusCode, String)> {
    let actor = actor_id(&claims).map_err(|s| (s, String::new()))?;
    bulk::check_limit(req.ids.len(), config::max_bulk_selection())
        .map_err(|msg| (StatusCode::UNPROCESSABLE_ENTITY, msg))?;
    match service::bulk_set_active(req.ids, req.active, actor).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}
