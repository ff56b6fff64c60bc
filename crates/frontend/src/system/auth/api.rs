use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::Request;

use crate::shared::api_utils::api_base;

/// POST /api/system/auth/login
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let response = Request::post(&format!("{}/api/system/auth/login", api_base()))
        .json(&LoginRequest { username, password })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => response
            .json::<LoginResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e)),
        401 => Err("Неверный логин или пароль".to_string()),
        403 => Err("Учётная запись заблокирована".to_string()),
        status => Err(format!("Ошибка входа: HTTP {}", status)),
    }
}

/// POST /api/system/auth/refresh
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let response = Request::post(&format!("{}/api/system/auth/refresh", api_base()))
        .json(&RefreshRequest { refresh_token })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to refresh token: {}", response.status()));
    }

    response
        .json::<RefreshResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// POST /api/system/auth/logout
pub async fn logout(refresh_token: &str) -> Result<(), String> {
    let response = Request::post(&format!("{}/api/system/auth/logout", api_base()))
        .json(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to logout: {}", response.status()));
    }
    Ok(())
}

/// GET /api/system/auth/me
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&format!("{}/api/system/auth/me", api_base()))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch current user: {}", response.status()));
    }

    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
