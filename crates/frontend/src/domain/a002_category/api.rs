use contracts::domain::a002_category::aggregate::{Category, CategoryDto};
use contracts::shared::list_state::{BulkReport, BulkRequest};
use gloo_net::http::Request;

use crate::shared::api_utils::api_base;

/// Fetch all categories
pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    let response = Request::get(&format!("{}/api/category", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Vec<Category>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Create or update category
pub async fn upsert_category(dto: CategoryDto) -> Result<(), String> {
    let response = Request::post(&format!("{}/api/category", api_base()))
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

/// Delete category (409 — рубрика используется)
pub async fn delete_category(id: i64) -> Result<(), String> {
    let response = Request::delete(&format!("{}/api/category/{}", api_base(), id))
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

/// Массовое удаление рубрик
pub async fn bulk_delete(ids: Vec<i64>) -> Result<BulkReport, String> {
    let response = Request::post(&format!("{}/api/category/bulk/delete", api_base()))
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
    let response = Request::post(&format!("{}/api/category/testdata", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}
