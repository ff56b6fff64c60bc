use crate::domain::a002_category::aggregate::CategoryId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор записи блога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub i64);

impl PostId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for PostId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.parse::<i64>()
            .map(PostId::new)
            .map_err(|e| format!("Invalid post id: {}", e))
    }
}

// ============================================================================
// Post kind
// ============================================================================

/// Тип публикации: обычная статья или новость.
/// Новости живут в отдельной ленте и фильтруются в админке отдельно.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Article,
    News,
}

impl PostKind {
    pub fn code(&self) -> &'static str {
        match self {
            PostKind::Article => "article",
            PostKind::News => "news",
        }
    }

    /// Незнакомый код трактуем как статью, а не как ошибку
    pub fn from_code(code: &str) -> Self {
        match code {
            "news" => PostKind::News,
            _ => PostKind::Article,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PostKind::Article => "Статья",
            PostKind::News => "Новость",
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Запись блога (статья или новость)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub base: BaseAggregate<PostId>,

    // Специфичные поля агрегата
    #[serde(rename = "bodyMd")]
    pub body_md: String,

    pub excerpt: Option<String>,

    #[serde(rename = "categoryRef")]
    pub category_ref: Option<CategoryId>,

    #[serde(rename = "authorRef")]
    pub author_ref: i64,

    pub kind: PostKind,

    #[serde(rename = "isFeatured")]
    pub is_featured: bool,

    #[serde(rename = "publishedAt")]
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(rename = "viewCount")]
    pub view_count: i64,
}

impl Post {
    /// Создать новую запись для вставки в БД (id присвоит БД)
    pub fn new_for_insert(
        slug: String,
        title: String,
        body_md: String,
        excerpt: Option<String>,
        category_ref: Option<CategoryId>,
        author_ref: i64,
        kind: PostKind,
        comment: Option<String>,
    ) -> Self {
        let slug = if slug.trim().is_empty() {
            slugify(&title)
        } else {
            slug
        };
        let mut base = BaseAggregate::new(PostId::new(0), slug, title);
        base.comment = comment;

        Self {
            base,
            body_md,
            excerpt,
            category_ref,
            author_ref,
            kind,
            is_featured: false,
            published_at: None,
            view_count: 0,
        }
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &PostDto) {
        if let Some(slug) = &dto.slug {
            if !slug.trim().is_empty() {
                self.base.slug = slug.trim().to_string();
            }
        }
        self.base.title = dto.title.clone();
        self.base.comment = dto.comment.clone();
        self.body_md = dto.body_md.clone();
        self.excerpt = dto.excerpt.clone();
        self.category_ref = dto.category_ref.map(CategoryId::new);
        self.kind = dto.kind.unwrap_or(self.kind);
        self.is_featured = dto.is_featured.unwrap_or(self.is_featured);
    }

    /// Опубликовать запись. Для публикации нужна рубрика.
    pub fn publish(&mut self) -> Result<(), String> {
        if self.category_ref.is_none() {
            return Err("Нельзя опубликовать запись без рубрики".into());
        }
        if !self.base.metadata.is_published {
            self.base.metadata.is_published = true;
            self.published_at = Some(chrono::Utc::now());
        }
        Ok(())
    }

    /// Снять запись с публикации
    pub fn unpublish(&mut self) {
        self.base.metadata.is_published = false;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.title.trim().is_empty() {
            return Err("Заголовок не может быть пустым".into());
        }
        if self.base.slug.trim().is_empty() {
            return Err("Slug не может быть пустым".into());
        }
        if !self
            .base
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err("Slug может содержать только a-z, 0-9 и дефис".into());
        }
        if self.body_md.trim().is_empty() {
            return Err("Текст записи не может быть пустым".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Post {
    type Id = PostId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "post"
    }

    fn element_name() -> &'static str {
        "Запись"
    }

    fn list_name() -> &'static str {
        "Записи"
    }
}

// ============================================================================
// Inline-редактируемые поля
// ============================================================================

/// Закрытый набор полей записи, доступных для inline-редактирования из
/// списка. Набор фиксирован на этапе компиляции: строка с именем поля
/// превращается в вариант enum один раз, на границе API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostEditableField {
    Title,
    Slug,
    Excerpt,
    Featured,
}

impl PostEditableField {
    pub fn code(&self) -> &'static str {
        match self {
            PostEditableField::Title => "title",
            PostEditableField::Slug => "slug",
            PostEditableField::Excerpt => "excerpt",
            PostEditableField::Featured => "featured",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "title" => Some(PostEditableField::Title),
            "slug" => Some(PostEditableField::Slug),
            "excerpt" => Some(PostEditableField::Excerpt),
            "featured" => Some(PostEditableField::Featured),
            _ => None,
        }
    }

    /// Применить новое значение поля к записи
    pub fn apply(&self, post: &mut Post, raw: &str) -> Result<(), String> {
        match self {
            PostEditableField::Title => {
                if raw.trim().is_empty() {
                    return Err("Заголовок не может быть пустым".into());
                }
                post.base.title = raw.trim().to_string();
            }
            PostEditableField::Slug => {
                let slug = raw.trim().to_string();
                if slug.is_empty() {
                    return Err("Slug не может быть пустым".into());
                }
                post.base.slug = slug;
            }
            PostEditableField::Excerpt => {
                let excerpt = raw.trim();
                post.excerpt = if excerpt.is_empty() {
                    None
                } else {
                    Some(excerpt.to_string())
                };
            }
            PostEditableField::Featured => {
                post.is_featured = matches!(raw.trim(), "true" | "1");
            }
        }
        Ok(())
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления записи
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostDto {
    pub id: Option<i64>,
    pub slug: Option<String>,
    pub title: String,
    #[serde(rename = "bodyMd")]
    pub body_md: String,
    pub excerpt: Option<String>,
    #[serde(rename = "categoryRef")]
    pub category_ref: Option<i64>,
    pub kind: Option<PostKind>,
    #[serde(rename = "isFeatured")]
    pub is_featured: Option<bool>,
    pub comment: Option<String>,
}

// ============================================================================
// Slug
// ============================================================================

/// Сформировать slug из заголовка: транслитерация кириллицы,
/// строчные латинские буквы и цифры, всё остальное схлопывается в дефис.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut prev_dash = true; // подавляем дефис в начале

    for ch in title.chars() {
        let mapped: &str = match ch.to_lowercase().next().unwrap_or(ch) {
            c @ 'a'..='z' | c @ '0'..='9' => {
                out.push(c);
                prev_dash = false;
                continue;
            }
            'а' => "a",
            'б' => "b",
            'в' => "v",
            'г' => "g",
            'д' => "d",
            'е' | 'ё' => "e",
            'ж' => "zh",
            'з' => "z",
            'и' | 'й' => "i",
            'к' => "k",
            'л' => "l",
            'м' => "m",
            'н' => "n",
            'о' => "o",
            'п' => "p",
            'р' => "r",
            'с' => "s",
            'т' => "t",
            'у' => "u",
            'ф' => "f",
            'х' => "h",
            'ц' => "ts",
            'ч' => "ch",
            'ш' => "sh",
            'щ' => "sch",
            'ъ' | 'ь' => "",
            'ы' => "y",
            'э' => "e",
            'ю' => "yu",
            'я' => "ya",
            _ => {
                if !prev_dash {
                    out.push('-');
                    prev_dash = true;
                }
                continue;
            }
        };
        out.push_str(mapped);
        prev_dash = mapped.is_empty() && prev_dash;
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Первая запись"), "pervaya-zapis");
        assert_eq!(slugify("  Rust 2024  "), "rust-2024");
        assert_eq!(slugify("Ёжик в тумане"), "ezhik-v-tumane");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_publish_requires_category() {
        let mut post = Post::new_for_insert(
            String::new(),
            "Черновик".into(),
            "текст".into(),
            None,
            None,
            1,
            PostKind::Article,
            None,
        );
        assert!(post.publish().is_err());
        assert!(!post.base.metadata.is_published);

        post.category_ref = Some(CategoryId::new(7));
        assert!(post.publish().is_ok());
        assert!(post.base.metadata.is_published);
        assert!(post.published_at.is_some());
    }

    #[test]
    fn test_editable_field_round_trip() {
        for field in [
            PostEditableField::Title,
            PostEditableField::Slug,
            PostEditableField::Excerpt,
            PostEditableField::Featured,
        ] {
            assert_eq!(PostEditableField::from_code(field.code()), Some(field));
        }
        assert_eq!(PostEditableField::from_code("body_md"), None);
    }

    #[test]
    fn test_editable_field_apply() {
        let mut post = Post::new_for_insert(
            "post".into(),
            "Запись".into(),
            "текст".into(),
            None,
            None,
            1,
            PostKind::Article,
            None,
        );

        PostEditableField::Featured.apply(&mut post, "true").unwrap();
        assert!(post.is_featured);
        PostEditableField::Featured.apply(&mut post, "false").unwrap();
        assert!(!post.is_featured);

        PostEditableField::Excerpt.apply(&mut post, "  ").unwrap();
        assert_eq!(post.excerpt, None);

        assert!(PostEditableField::Title.apply(&mut post, "   ").is_err());
    }

    #[test]
    fn test_validate_slug_charset() {
        let mut post = Post::new_for_insert(
            "valid-slug-1".into(),
            "Запись".into(),
            "текст".into(),
            None,
            None,
            1,
            PostKind::Article,
            None,
        );
        assert!(post.validate().is_ok());

        post.base.slug = "Плохой slug".into();
        assert!(post.validate().is_err());
    }
}
