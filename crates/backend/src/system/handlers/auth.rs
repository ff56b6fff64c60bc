use axum::{http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};

use crate::system::auth::jwt;
use crate::system::users::{repository, service};
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, TokenClaims, UserInfo,
};
use contracts::system::users::User;

fn to_user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        is_admin: user.is_admin,
    }
}

/// POST /api/system/auth/login
pub async fn login(Json(req): Json<LoginRequest>) -> Result<Json<LoginResponse>, StatusCode> {
    let user = repository::get_by_username(req.username.trim())
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !user.is_active {
        return Err(StatusCode::FORBIDDEN);
    }

    let hash = repository::get_password_hash(user.id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if !service::verify_password(&req.password, &hash) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let access_token = jwt::generate_access_token(user.id, &user.username, user.is_admin)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let refresh_token = jwt::generate_refresh_token();
    repository::store_refresh_token(
        &jwt::hash_refresh_token(&refresh_token),
        user.id,
        &jwt::calculate_refresh_token_expiration(),
    )
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let _ = repository::update_last_login(user.id).await;

    tracing::info!(user_id = user.id, "login ok");

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        user: to_user_info(&user),
    }))
}

/// POST /api/system/auth/refresh — ротация refresh-токена
pub async fn refresh(Json(req): Json<RefreshRequest>) -> Result<Json<RefreshResponse>, StatusCode> {
    let hash = jwt::hash_refresh_token(&req.refresh_token);

    let (user_id, expires_at) = repository::find_refresh_token(&hash)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let expired = DateTime::parse_from_rfc3339(&expires_at)
        .map(|exp| exp < Utc::now())
        .unwrap_or(true);
    if expired {
        let _ = repository::delete_refresh_token(&hash).await;
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = repository::get_by_id(user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if !user.is_active {
        return Err(StatusCode::FORBIDDEN);
    }

    let access_token = jwt::generate_access_token(user.id, &user.username, user.is_admin)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/system/auth/logout
pub async fn logout(Json(req): Json<RefreshRequest>) -> StatusCode {
    let hash = jwt::hash_refresh_token(&req.refresh_token);
    match repository::delete_refresh_token(&hash).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /api/system/auth/me
pub async fn current_user(
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<UserInfo>, StatusCode> {
    let id: i64 = claims.sub.parse().map_err(|_| StatusCode::UNAUTHORIZED)?;
    let user = repository::get_by_id(id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(to_user_info(&user)))
}
