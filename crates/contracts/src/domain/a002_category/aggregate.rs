use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор рубрики
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.parse::<i64>()
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid category id: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Рубрика блога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub base: BaseAggregate<CategoryId>,

    // Специфичные поля агрегата
    #[serde(rename = "parentRef")]
    pub parent_ref: Option<CategoryId>,

    /// Цвет метки в админке (hex, например "#ff9800")
    pub color: Option<String>,

    /// Порядок в меню сайта
    pub position: i32,
}

impl Category {
    /// Создать новую рубрику для вставки в БД (id присвоит БД)
    pub fn new_for_insert(
        slug: String,
        title: String,
        parent_ref: Option<CategoryId>,
        color: Option<String>,
        position: i32,
        comment: Option<String>,
    ) -> Self {
        let slug = if slug.trim().is_empty() {
            crate::domain::a001_post::aggregate::slugify(&title)
        } else {
            slug
        };
        let mut base = BaseAggregate::new(CategoryId::new(0), slug, title);
        base.comment = comment;
        // Рубрика видна сразу, у неё нет черновиков
        base.metadata.is_published = true;

        Self {
            base,
            parent_ref,
            color,
            position,
        }
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &CategoryDto) {
        if let Some(slug) = &dto.slug {
            if !slug.trim().is_empty() {
                self.base.slug = slug.trim().to_string();
            }
        }
        self.base.title = dto.title.clone();
        self.base.comment = dto.comment.clone();
        self.parent_ref = dto.parent_ref.map(CategoryId::new);
        self.color = dto.color.clone();
        self.position = dto.position.unwrap_or(self.position);
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.title.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.base.slug.trim().is_empty() {
            return Err("Slug не может быть пустым".into());
        }
        if let Some(color) = &self.color {
            let ok = color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !ok {
                return Err("Цвет задаётся в формате #rrggbb".into());
            }
        }
        if self.parent_ref == Some(self.base.id) && self.base.id.value() > 0 {
            return Err("Рубрика не может быть родителем самой себя".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn slug(&self) -> &str {
        &self.base.slug
    }

    fn title(&self) -> &str {
        &self.base.title
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "category"
    }

    fn element_name() -> &'static str {
        "Рубрика"
    }

    fn list_name() -> &'static str {
        "Рубрики"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления рубрики
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoryDto {
    pub id: Option<i64>,
    pub slug: Option<String>,
    pub title: String,
    #[serde(rename = "parentRef")]
    pub parent_ref: Option<i64>,
    pub color: Option<String>,
    pub position: Option<i32>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_validation() {
        let mut cat = Category::new_for_insert(
            "rust".into(),
            "Rust".into(),
            None,
            Some("#ff9800".into()),
            0,
            None,
        );
        assert!(cat.validate().is_ok());

        cat.color = Some("orange".into());
        assert!(cat.validate().is_err());

        cat.color = None;
        assert!(cat.validate().is_ok());
    }
}
