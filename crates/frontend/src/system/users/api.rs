use contracts::shared::list_state::BulkReport;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};
use gloo_net::http::Request;
use serde::Serialize;

use crate::shared::api_utils::api_base;
use crate::system::auth::storage;

fn get_auth_header() -> Option<String> {
    storage::get_access_token().map(|token| format!("Bearer {}", token))
}

/// Fetch all users
pub async fn fetch_users() -> Result<Vec<User>, String> {
    let auth_header = get_auth_header().ok_or("Not authenticated")?;

    let response = Request::get(&format!("{}/api/system/users", api_base()))
        .header("Authorization", &auth_header)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch users: {}", response.status()));
    }

    response
        .json::<Vec<User>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Create new user
pub async fn create_user(dto: CreateUserDto) -> Result<(), String> {
    let auth_header = get_auth_header().ok_or("Not authenticated")?;

    let response = Request::post(&format!("{}/api/system/users", api_base()))
        .header("Authorization", &auth_header)
        .json(&dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(if text.is_empty() {
            format!("Failed to create user: {}", response.status())
        } else {
            text
        });
    }
    Ok(())
}

/// Update user
pub async fn update_user(dto: UpdateUserDto) -> Result<(), String> {
    let auth_header = get_auth_header().ok_or("Not authenticated")?;

    let response = Request::put(&format!("{}/api/system/users/{}", api_base(), dto.id))
        .header("Authorization", &auth_header)
        .json(&dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(if text.is_empty() {
            format!("Failed to update user: {}", response.status())
        } else {
            text
        });
    }
    Ok(())
}

/// Delete user
pub async fn delete_user(id: i64) -> Result<(), String> {
    let auth_header = get_auth_header().ok_or("Not authenticated")?;

    let response = Request::delete(&format!("{}/api/system/users/{}", api_base(), id))
        .header("Authorization", &auth_header)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(if text.is_empty() {
            format!("Failed to delete user: {}", response.status())
        } else {
            text
        });
    }
    Ok(())
}

/// Change password
pub async fn change_password(dto: ChangePasswordDto) -> Result<(), String> {
    let auth_header = get_auth_header().ok_or("Not authenticated")?;

    let response = Request::post(&format!(
        "{}/api/system/users/{}/change-password",
        api_base(),
        dto.user_id
    ))
    .header("Authorization", &auth_header)
    .json(&dto)
    .map_err(|e| format!("Failed to serialize request: {}", e))?
    .send()
    .await
    .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(if text.is_empty() {
            format!("Failed to change password: {}", response.status())
        } else {
            text
        });
    }
    Ok(())
}

#[derive(Serialize)]
struct BulkActiveRequest {
    ids: Vec<i64>,
    active: bool,
}

/// Массовая блокировка/разблокировка
pub async fn bulk_set_active(ids: Vec<i64>, active: bool) -> Result<BulkReport, String> {
    let auth_header = get_auth_header().ok_or("Not authenticated")?;

    let response = Request::post(&format!("{}/api/system/users/bulk/active", api_base()))
        .header("Authorization", &auth_header)
        .json(&BulkActiveRequest { ids, active })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(if text.is_empty() {
            format!("HTTP {}", response.status())
        } else {
            text
        });
    }

    response
        .json::<BulkReport>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
