use contracts::domain::a003_comment::aggregate::Comment;
use contracts::shared::list_state::{BulkReport, BulkRequest};
use gloo_net::http::Request;
use serde::Serialize;

use crate::shared::api_utils::api_base;

/// Fetch all comments
pub async fn fetch_comments() -> Result<Vec<Comment>, String> {
    let response = Request::get(&format!("{}/api/comment", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Vec<Comment>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[derive(Serialize)]
struct SetStatusRequest<'a> {
    status: &'a str,
}

/// Сменить статус модерации одного комментария
pub async fn set_status(id: i64, status: &str) -> Result<(), String> {
    let response = Request::post(&format!("{}/api/comment/{}/status", api_base(), id))
        .json(&SetStatusRequest { status })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Массовая операция: action — approve | spam | delete
pub async fn bulk_action(action: &str, ids: Vec<i64>) -> Result<BulkReport, String> {
    let response = Request::post(&format!("{}/api/comment/bulk/{}", api_base(), action))
        .json(&BulkRequest { ids })
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

/// Заполнить тестовыми данными
pub async fn fill_test_data() -> Result<(), String> {
    let response = Request::post(&format!("{}/api/comment/testdata", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}
