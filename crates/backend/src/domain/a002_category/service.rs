use super::repository;
use crate::domain::a001_post;
use contracts::domain::a001_post::aggregate::slugify;
use contracts::domain::a002_category::aggregate::{Category, CategoryDto, CategoryId};
use contracts::shared::list_state::{BulkReport, SelectionState};

/// Создание новой рубрики
pub async fn create(dto: CategoryDto) -> anyhow::Result<i64> {
    let slug = dto
        .slug
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| slugify(&dto.title));

    if repository::get_by_slug(&slug).await?.is_some() {
        anyhow::bail!("Slug уже занят: {}", slug);
    }

    let mut aggregate = Category::new_for_insert(
        slug,
        dto.title,
        dto.parent_ref.map(CategoryId::new),
        dto.color,
        dto.position.unwrap_or(0),
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующей рубрики
pub async fn update(dto: CategoryDto) -> anyhow::Result<()> {
    let id = dto.id.ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    if let Some(other) = repository::get_by_slug(&aggregate.base.slug).await? {
        if other.base.id != aggregate.base.id {
            anyhow::bail!("Slug уже занят: {}", aggregate.base.slug);
        }
    }

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Удаление одной рубрики с теми же проверками, что и в массовой
/// операции
pub async fn delete(id: i64) -> anyhow::Result<Result<(), String>> {
    match deletable_reason(id).await? {
        Some(reason) => Ok(Err(reason)),
        None => {
            repository::soft_delete(id).await?;
            Ok(Ok(()))
        }
    }
}

/// Получение рубрики по ID
pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Category>> {
    repository::get_by_id(id).await
}

/// Получение списка всех рубрик
pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    repository::list_all().await
}

/// Причина, по которой рубрику нельзя удалить, либо `None`
async fn deletable_reason(id: i64) -> anyhow::Result<Option<String>> {
    if repository::get_by_id(id).await?.is_none() {
        return Ok(Some("Рубрика не найдена".into()));
    }
    let posts = a001_post::repository::count_by_category(id).await?;
    if posts > 0 {
        return Ok(Some(format!("В рубрике есть записи: {}", posts)));
    }
    let children = repository::count_children(id).await?;
    if children > 0 {
        return Ok(Some(format!("У рубрики есть подрубрики: {}", children)));
    }
    Ok(None)
}

/// Массовое удаление: рубрика с записями или подрубриками остаётся и
/// попадает в отчёт с причиной
pub async fn bulk_delete(ids: Vec<i64>) -> anyhow::Result<BulkReport> {
    let mut report = BulkReport::new();
    for id in SelectionState::normalize(ids) {
        match deletable_reason(id).await? {
            Some(reason) => report.record_failure(id, reason),
            None => {
                repository::soft_delete(id).await?;
                report.record_ok(id);
            }
        }
    }
    Ok(report)
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> anyhow::Result<()> {
    let data = vec![
        CategoryDto {
            id: None,
            slug: Some("rust".into()),
            title: "Rust".into(),
            parent_ref: None,
            color: Some("#ce422b".into()),
            position: Some(1),
            comment: None,
        },
        CategoryDto {
            id: None,
            slug: None,
            title: "Новости проекта".into(),
            parent_ref: None,
            color: Some("#1976d2".into()),
            position: Some(2),
            comment: None,
        },
        CategoryDto {
            id: None,
            slug: None,
            title: "Заметки".into(),
            parent_ref: None,
            color: None,
            position: Some(3),
            comment: Some("черновики и мелочи".into()),
        },
    ];

    for dto in data {
        create(dto).await?;
    }

    Ok(())
}
