use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Незнакомый текст нормализуется в `Asc`, а не в ошибку
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Trait для типов данных, поддерживающих сортировку по имени поля
pub trait SortableBy {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Состояние сортировки списка.
///
/// Весь автомат: клик по активной колонке переворачивает направление,
/// клик по новой колонке включает её с `Asc`, `clear` возвращает
/// сортировку по умолчанию.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortState {
    field: Option<String>,
    direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Восстановить состояние (из URL); поле нормализуется: пустая
    /// строка означает "нет сортировки"
    pub fn restore(field: Option<String>, direction: SortDirection) -> Self {
        let field = field.filter(|f| !f.trim().is_empty());
        Self { field, direction }
    }

    /// Клик по заголовку колонки
    pub fn sort_by(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    /// Сбросить к сортировке по умолчанию
    pub fn clear(&mut self) {
        self.field = None;
        self.direction = SortDirection::Asc;
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_sorted_by(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }

    /// Направление для конкретной колонки; `None`, если колонка не активна
    pub fn direction_for(&self, field: &str) -> Option<SortDirection> {
        if self.is_sorted_by(field) {
            Some(self.direction)
        } else {
            None
        }
    }

    /// Применить сортировку к набору строк.
    ///
    /// Без активного поля порядок не меняется. Если передан непустой
    /// allow-list и активное поле в него не входит (устаревший или
    /// подделанный URL), сортировка — no-op, не ошибка.
    pub fn apply<T: SortableBy>(&self, items: &mut [T], allowed_fields: &[&str]) {
        let Some(field) = self.field.as_deref() else {
            return;
        };
        if !allowed_fields.is_empty() && !allowed_fields.contains(&field) {
            return;
        }
        let descending = self.direction == SortDirection::Desc;
        items.sort_by(|a, b| {
            let cmp = a.compare_by_field(b, field);
            if descending {
                cmp.reverse()
            } else {
                cmp
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        views: i64,
    }

    impl SortableBy for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.name.cmp(other.name),
                "views" => self.views.cmp(&other.views),
                _ => Ordering::Equal,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "b", views: 2 },
            Row { name: "a", views: 9 },
            Row { name: "c", views: 5 },
        ]
    }

    #[test]
    fn test_three_click_cycle() {
        let mut sort = SortState::new();
        sort.sort_by("title");
        assert_eq!(sort.direction_for("title"), Some(SortDirection::Asc));
        sort.sort_by("title");
        assert_eq!(sort.direction_for("title"), Some(SortDirection::Desc));
        sort.sort_by("title");
        assert_eq!(sort.direction_for("title"), Some(SortDirection::Asc));
    }

    #[test]
    fn test_switching_field_resets_to_asc() {
        let mut sort = SortState::new();
        sort.sort_by("title");
        sort.sort_by("title");
        assert_eq!(sort.direction(), SortDirection::Desc);
        sort.sort_by("views");
        assert_eq!(sort.field(), Some("views"));
        assert_eq!(sort.direction(), SortDirection::Asc);
        assert_eq!(sort.direction_for("title"), None);
    }

    #[test]
    fn test_parse_direction_normalizes_junk() {
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
        assert_eq!(SortDirection::parse(""), SortDirection::Asc);
    }

    #[test]
    fn test_apply_sorts_and_reverses() {
        let mut sort = SortState::new();
        sort.sort_by("views");
        let mut items = rows();
        sort.apply(&mut items, &["name", "views"]);
        assert_eq!(
            items.iter().map(|r| r.views).collect::<Vec<_>>(),
            vec![2, 5, 9]
        );

        sort.sort_by("views");
        sort.apply(&mut items, &["name", "views"]);
        assert_eq!(
            items.iter().map(|r| r.views).collect::<Vec<_>>(),
            vec![9, 5, 2]
        );
    }

    #[test]
    fn test_apply_ignores_field_outside_allow_list() {
        let restored = SortState::restore(Some("password_hash".into()), SortDirection::Desc);
        let mut items = rows();
        restored.apply(&mut items, &["name", "views"]);
        // порядок не изменился
        assert_eq!(
            items.iter().map(|r| r.name).collect::<Vec<_>>(),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_no_field_is_noop() {
        let sort = SortState::new();
        let mut items = rows();
        sort.apply(&mut items, &["name"]);
        assert_eq!(items[0].name, "b");
    }

    #[test]
    fn test_restore_empty_field_means_none() {
        let restored = SortState::restore(Some("   ".into()), SortDirection::Desc);
        assert_eq!(restored.field(), None);
    }
}
