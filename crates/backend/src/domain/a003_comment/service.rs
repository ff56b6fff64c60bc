use super::{repository, spam};
use crate::domain::a001_post;
use contracts::domain::a001_post::aggregate::PostId;
use contracts::domain::a003_comment::aggregate::{Comment, CommentDto, CommentStatus};
use contracts::shared::list_state::{BulkReport, SelectionState};

/// Приём комментария с формы на сайте: санитизация HTML, спам-оценка,
/// сохранение
pub async fn submit(dto: CommentDto) -> anyhow::Result<i64> {
    if a001_post::repository::get_by_id(dto.post_ref).await?.is_none() {
        anyhow::bail!("Запись не найдена");
    }

    // Пользовательский HTML обезвреживаем до сохранения
    let body = ammonia::clean(&dto.body);

    let mut aggregate = Comment::new_for_insert(
        PostId::new(dto.post_ref),
        dto.author_name.trim().to_string(),
        dto.author_email.filter(|e| !e.trim().is_empty()),
        body,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.spam_score = spam::score(&aggregate.body, &aggregate.author_name);
    if spam::is_spam(aggregate.spam_score) {
        aggregate.status = CommentStatus::Spam;
        tracing::warn!(
            score = aggregate.spam_score,
            "Comment routed to spam by heuristic"
        );
    }

    aggregate.before_write();
    repository::insert(&aggregate).await
}

/// Получение комментария по ID
pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Comment>> {
    repository::get_by_id(id).await
}

/// Список всех комментариев (фильтрация по статусу — на клиенте)
pub async fn list_all() -> anyhow::Result<Vec<Comment>> {
    repository::list_all().await
}

/// Сменить статус модерации одного комментария (ручное действие
/// модератора, допустимо из любого статуса)
pub async fn set_status(id: i64, status: CommentStatus) -> anyhow::Result<bool> {
    repository::set_status(id, status).await
}

/// Удаление комментария
pub async fn delete(id: i64) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Массовое одобрение. Комментарии, ушедшие в спам по эвристике,
/// массово не одобряются — только вручную по одному.
pub async fn bulk_approve(ids: Vec<i64>) -> anyhow::Result<BulkReport> {
    let mut report = BulkReport::new();
    for id in SelectionState::normalize(ids) {
        match repository::get_by_id(id).await? {
            None => report.record_failure(id, "Комментарий не найден"),
            Some(c) if c.status == CommentStatus::Spam => {
                report.record_failure(id, "Помечен как спам, одобряйте вручную")
            }
            Some(_) => {
                repository::set_status(id, CommentStatus::Approved).await?;
                report.record_ok(id);
            }
        }
    }
    Ok(report)
}

/// Массовая пометка спамом
pub async fn bulk_mark_spam(ids: Vec<i64>) -> anyhow::Result<BulkReport> {
    let mut report = BulkReport::new();
    for id in SelectionState::normalize(ids) {
        if repository::set_status(id, CommentStatus::Spam).await? {
            report.record_ok(id);
        } else {
            report.record_failure(id, "Комментарий не найден");
        }
    }
    Ok(report)
}

/// Массовое удаление
pub async fn bulk_delete(ids: Vec<i64>) -> anyhow::Result<BulkReport> {
    let mut report = BulkReport::new();
    for id in SelectionState::normalize(ids) {
        if repository::soft_delete(id).await? {
            report.record_ok(id);
        } else {
            report.record_failure(id, "Комментарий не найден");
        }
    }
    Ok(report)
}

/// Вставка тестовых данных: комментарии цепляются к первой живой записи
pub async fn insert_test_data() -> anyhow::Result<()> {
    let posts = a001_post::repository::list_all().await?;
    let Some(post) = posts.first() else {
        anyhow::bail!("Сначала создайте хотя бы одну запись");
    };
    let post_ref = post.base.id.value();

    let data = vec![
        CommentDto {
            post_ref,
            author_name: "Ира".into(),
            author_email: Some("ira@example.com".into()),
            body: "Отличная статья, спасибо!".into(),
        },
        CommentDto {
            post_ref,
            author_name: "Гость".into(),
            author_email: None,
            body: "А будет продолжение?".into(),
        },
        CommentDto {
            post_ref,
            author_name: "Гость".into(),
            author_email: None,
            body: "Заработок без вложений: https://a.example https://b.example".into(),
        },
    ];

    for dto in data {
        submit(dto).await?;
    }

    Ok(())
}
