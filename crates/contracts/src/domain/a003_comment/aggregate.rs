use crate::domain::a001_post::aggregate::PostId;
use crate::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор комментария
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub i64);

impl CommentId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for CommentId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.parse::<i64>()
            .map(CommentId::new)
            .map_err(|e| format!("Invalid comment id: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================

/// Статус модерации комментария
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[default]
    Pending,
    Approved,
    Spam,
}

impl CommentStatus {
    pub fn code(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "pending",
            CommentStatus::Approved => "approved",
            CommentStatus::Spam => "spam",
        }
    }

    /// Незнакомый код из БД или URL трактуем как "на модерации"
    pub fn from_code(code: &str) -> Self {
        match code {
            "approved" => CommentStatus::Approved,
            "spam" => CommentStatus::Spam,
            _ => CommentStatus::Pending,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "На модерации",
            CommentStatus::Approved => "Одобрен",
            CommentStatus::Spam => "Спам",
        }
    }
}

// ============================================================================
// Comment
// ============================================================================

/// Комментарий читателя к записи.
///
/// Не справочная сущность, поэтому без BaseAggregate: у комментария нет
/// ни slug, ни заголовка, а автор — произвольный посетитель сайта.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,

    #[serde(rename = "postRef")]
    pub post_ref: PostId,

    #[serde(rename = "authorName")]
    pub author_name: String,

    #[serde(rename = "authorEmail")]
    pub author_email: Option<String>,

    pub body: String,

    pub status: CommentStatus,

    /// Оценка спам-эвристики, 0.0 — чистый, 1.0 — точно спам
    #[serde(rename = "spamScore")]
    pub spam_score: f32,

    pub metadata: EntityMetadata,
}

impl Comment {
    /// Создать новый комментарий для вставки в БД (id присвоит БД)
    pub fn new_for_insert(
        post_ref: PostId,
        author_name: String,
        author_email: Option<String>,
        body: String,
    ) -> Self {
        Self {
            id: CommentId::new(0),
            post_ref,
            author_name,
            author_email,
            body,
            status: CommentStatus::Pending,
            spam_score: 0.0,
            metadata: EntityMetadata::new(),
        }
    }

    /// Первые символы текста для отображения в списке
    pub fn excerpt(&self, max_chars: usize) -> String {
        let trimmed = self.body.trim();
        if trimmed.chars().count() <= max_chars {
            return trimmed.to_string();
        }
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.author_name.trim().is_empty() {
            return Err("Имя автора не может быть пустым".into());
        }
        if self.body.trim().is_empty() {
            return Err("Текст комментария не может быть пустым".into());
        }
        if let Some(email) = &self.author_email {
            if !email.contains('@') {
                return Err("Некорректный email".into());
            }
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.metadata.touch();
        self.metadata.increment_version();
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания комментария (форма на сайте)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommentDto {
    #[serde(rename = "postRef")]
    pub post_ref: i64,
    #[serde(rename = "authorName")]
    pub author_name: String,
    #[serde(rename = "authorEmail")]
    pub author_email: Option<String>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            CommentStatus::Pending,
            CommentStatus::Approved,
            CommentStatus::Spam,
        ] {
            assert_eq!(CommentStatus::from_code(status.code()), status);
        }
        // мусор из URL не должен ломать разбор
        assert_eq!(CommentStatus::from_code("banana"), CommentStatus::Pending);
    }

    #[test]
    fn test_excerpt() {
        let comment = Comment::new_for_insert(
            PostId::new(1),
            "Ира".into(),
            None,
            "Отличная статья, спасибо!".into(),
        );
        assert_eq!(comment.excerpt(100), "Отличная статья, спасибо!");
        assert_eq!(comment.excerpt(8), "Отличная…");
    }
}
