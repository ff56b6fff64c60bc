use contracts::domain::a001_post::aggregate::{Post, PostDto};
use contracts::shared::list_state::{BulkReport, BulkRequest};
use gloo_net::http::Request;
use serde::Serialize;

use crate::shared::api_utils::api_base;

/// Fetch all posts
pub async fn fetch_posts() -> Result<Vec<Post>, String> {
    let response = Request::get(&format!("{}/api/post", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Vec<Post>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Fetch single post by id
pub async fn fetch_post(id: i64) -> Result<Post, String> {
    let response = Request::get(&format!("{}/api/post/{}", api_base(), id))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Post>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Create or update post
pub async fn upsert_post(dto: PostDto) -> Result<(), String> {
    let response = Request::post(&format!("{}/api/post", api_base()))
        .json(&dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Delete post
pub async fn delete_post(id: i64) -> Result<(), String> {
    let response = Request::delete(&format!("{}/api/post/{}", api_base(), id))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

#[derive(Serialize)]
struct SetFieldRequest<'a> {
    field: &'a str,
    value: &'a str,
}

/// Inline-редактирование одного поля
pub async fn set_post_field(id: i64, field: &str, value: &str) -> Result<(), String> {
    let response = Request::patch(&format!("{}/api/post/{}/field", api_base(), id))
        .json(&SetFieldRequest { field, value })
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
    Ok(())
}

/// Массовая операция: action — publish | unpublish | delete
pub async fn bulk_action(action: &str, ids: Vec<i64>) -> Result<BulkReport, String> {
    let response = Request::post(&format!("{}/api/post/bulk/{}", api_base(), action))
        .json(&BulkRequest { ids })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        // 422 несёт человекочитаемое сообщение (например, превышен
        // лимит выбора)
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

/// Заполнить тестовыми данными
pub async fn fill_test_data() -> Result<(), String> {
    let response = Request::post(&format!("{}/api/post/testdata", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}
