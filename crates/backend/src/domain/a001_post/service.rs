use super::repository;
use contracts::domain::a001_post::aggregate::{
    slugify, Post, PostDto, PostEditableField, PostKind,
};
use contracts::domain::a002_category::aggregate::CategoryId;
use contracts::shared::list_state::{BulkReport, SelectionState};

/// Создание новой записи
pub async fn create(dto: PostDto, author_ref: i64) -> anyhow::Result<i64> {
    let slug = dto
        .slug
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| slugify(&dto.title));

    if repository::get_by_slug(&slug).await?.is_some() {
        anyhow::bail!("Slug уже занят: {}", slug);
    }

    let mut aggregate = Post::new_for_insert(
        slug,
        dto.title,
        dto.body_md,
        dto.excerpt,
        dto.category_ref.map(CategoryId::new),
        author_ref,
        dto.kind.unwrap_or(PostKind::Article),
        dto.comment,
    );
    if dto.is_featured == Some(true) {
        aggregate.is_featured = true;
    }

    // Валидация
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    // Before write
    aggregate.before_write();

    // Сохранение через repository
    repository::insert(&aggregate).await
}

/// Обновление существующей записи
pub async fn update(dto: PostDto) -> anyhow::Result<()> {
    let id = dto.id.ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    // Slug не должен увести на чужую запись
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

/// Мягкое удаление записи
pub async fn delete(id: i64) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение записи по ID
pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Post>> {
    repository::get_by_id(id).await
}

/// Получение списка всех записей
pub async fn list_all() -> anyhow::Result<Vec<Post>> {
    repository::list_all().await
}

/// Опубликовать запись. `Err(reason)` — отказ политики, пригодный для
/// построчного отчёта массовой операции.
pub async fn publish(id: i64) -> anyhow::Result<Result<(), String>> {
    let Some(mut aggregate) = repository::get_by_id(id).await? else {
        return Ok(Err("Запись не найдена".into()));
    };
    if let Err(reason) = aggregate.publish() {
        return Ok(Err(reason));
    }
    aggregate.before_write();
    repository::update(&aggregate).await?;
    Ok(Ok(()))
}

/// Снять запись с публикации
pub async fn unpublish(id: i64) -> anyhow::Result<Result<(), String>> {
    let Some(mut aggregate) = repository::get_by_id(id).await? else {
        return Ok(Err("Запись не найдена".into()));
    };
    aggregate.unpublish();
    aggregate.before_write();
    repository::update(&aggregate).await?;
    Ok(Ok(()))
}

/// Inline-редактирование одного поля из списка
pub async fn set_field(id: i64, field: PostEditableField, value: &str) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    field
        .apply(&mut aggregate, value)
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    if field == PostEditableField::Slug {
        if let Some(other) = repository::get_by_slug(&aggregate.base.slug).await? {
            if other.base.id != aggregate.base.id {
                anyhow::bail!("Slug уже занят: {}", aggregate.base.slug);
            }
        }
    }

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();
    repository::update(&aggregate).await
}

/// Массовая публикация. Идём по строкам последовательно: отказ по одной
/// записи попадает в отчёт и не прерывает остальных.
pub async fn bulk_publish(ids: Vec<i64>) -> anyhow::Result<BulkReport> {
    let mut report = BulkReport::new();
    for id in SelectionState::normalize(ids) {
        match publish(id).await? {
            Ok(()) => report.record_ok(id),
            Err(reason) => report.record_failure(id, reason),
        }
    }
    Ok(report)
}

/// Массовое снятие с публикации
pub async fn bulk_unpublish(ids: Vec<i64>) -> anyhow::Result<BulkReport> {
    let mut report = BulkReport::new();
    for id in SelectionState::normalize(ids) {
        match unpublish(id).await? {
            Ok(()) => report.record_ok(id),
            Err(reason) => report.record_failure(id, reason),
        }
    }
    Ok(report)
}

/// Массовое удаление. Закреплённые записи защищены: сначала снимите
/// отметку "в подборке".
pub async fn bulk_delete(ids: Vec<i64>) -> anyhow::Result<BulkReport> {
    let mut report = BulkReport::new();
    for id in SelectionState::normalize(ids) {
        match repository::get_by_id(id).await? {
            None => report.record_failure(id, "Запись не найдена"),
            Some(post) if post.is_featured => {
                report.record_failure(id, "Запись в подборке, снимите отметку перед удалением")
            }
            Some(_) => {
                if repository::soft_delete(id).await? {
                    report.record_ok(id);
                } else {
                    report.record_failure(id, "Запись не найдена");
                }
            }
        }
    }
    Ok(report)
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> anyhow::Result<()> {
    let data = vec![
        PostDto {
            id: None,
            slug: Some("privet-mir".into()),
            title: "Привет, мир".into(),
            body_md: "Первая запись блога. **Markdown** работает.".into(),
            excerpt: Some("Первая запись блога".into()),
            category_ref: None,
            kind: Some(PostKind::Article),
            is_featured: Some(true),
            comment: None,
        },
        PostDto {
            id: None,
            slug: None,
            title: "Релиз платформы".into(),
            body_md: "Сегодня мы открылись.".into(),
            excerpt: None,
            category_ref: None,
            kind: Some(PostKind::News),
            is_featured: None,
            comment: Some("не забыть добавить скриншоты".into()),
        },
        PostDto {
            id: None,
            slug: None,
            title: "Планы на осень".into(),
            body_md: "Дорожная карта на ближайшие месяцы.".into(),
            excerpt: None,
            category_ref: None,
            kind: Some(PostKind::Article),
            is_featured: None,
            comment: None,
        },
    ];

    for dto in data {
        // тестовые записи создаются от имени первого администратора
        create(dto, 1).await?;
    }

    Ok(())
}
