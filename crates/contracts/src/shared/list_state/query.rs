use serde::{Deserialize, Serialize};

use super::selection::SelectionState;
use super::sort::{SortDirection, SortState};
use super::table::{TableState, DEFAULT_PAGE_SIZE};

/// Верхняя граница page_size при восстановлении из URL
const MAX_PAGE_SIZE: usize = 500;

/// Явная (де)сериализация состояния списка в параметры query-строки.
///
/// Никакой магии двусторонней привязки: владелец формы сам зовёт
/// [`ListQueryParams::from_table`] при изменении состояния и
/// [`ListQueryParams::apply_to`] при входе на страницу. Значения по
/// умолчанию в строку не попадают, чтобы URL оставался коротким.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    /// Выбранные id через запятую ("3,17,42")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

impl ListQueryParams {
    /// Снять сериализуемую часть состояния списка
    pub fn from_table(table: &TableState) -> Self {
        let selection = table.selection.selected_ids();
        Self {
            q: if table.search.is_active() {
                Some(table.search.term().to_string())
            } else {
                None
            },
            sort: table.sort.field().map(|f| f.to_string()),
            dir: match table.sort.direction() {
                SortDirection::Asc => None,
                SortDirection::Desc => Some("desc".to_string()),
            },
            page: if table.page > 0 { Some(table.page) } else { None },
            per_page: if table.page_size != DEFAULT_PAGE_SIZE {
                Some(table.page_size)
            } else {
                None
            },
            selected: if selection.is_empty() {
                None
            } else {
                Some(
                    selection
                        .iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(","),
                )
            },
        }
    }

    /// Пары ключ-значение для построения query-строки
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q".to_string(), q.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(dir) = &self.dir {
            pairs.push(("dir".to_string(), dir.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(selected) = &self.selected {
            pairs.push(("selected".to_string(), selected.clone()));
        }
        pairs
    }

    /// Собрать из пар ключ-значение. Неизвестные ключи и мусорные
    /// значения молча пропускаются.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "q" => params.q = Some(value.to_string()),
                "sort" => params.sort = Some(value.to_string()),
                "dir" => params.dir = Some(value.to_string()),
                "page" => params.page = value.trim().parse().ok(),
                "per_page" => params.per_page = value.trim().parse().ok(),
                "selected" => params.selected = Some(value.to_string()),
                _ => {}
            }
        }
        params
    }

    /// Установить восстановленные значения в состояние списка.
    /// Каждое поле проходит нормализацию: URL — недоверенный вход.
    pub fn apply_to(&self, table: &mut TableState) {
        table.search.set_term(self.q.as_deref());

        let direction = self
            .dir
            .as_deref()
            .map(SortDirection::parse)
            .unwrap_or_default();
        table.sort = SortState::restore(self.sort.clone(), direction);

        table.page_size = self
            .per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        // страница будет окончательно зажата при первом rebuild
        table.page = self.page.unwrap_or(0);

        if let Some(selected) = &self.selected {
            table
                .selection
                .set_selected(SelectionState::parse_id_list(selected));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_omitted() {
        let table = TableState::new();
        let params = ListQueryParams::from_table(&table);
        assert_eq!(params, ListQueryParams::default());
        assert!(params.to_pairs().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut table = TableState::new();
        table.set_search(Some("rust"));
        table.toggle_sort("title");
        table.toggle_sort("title"); // desc
        table.go_to_page(3);
        table.set_page_size(25);
        table.go_to_page(3);
        table.selection.set_selected([5, 9]);

        let pairs = ListQueryParams::from_table(&table).to_pairs();
        let restored = ListQueryParams::from_pairs(
            pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );

        let mut fresh = TableState::new();
        restored.apply_to(&mut fresh);
        assert_eq!(fresh.search.term(), "rust");
        assert_eq!(fresh.sort.field(), Some("title"));
        assert_eq!(fresh.sort.direction(), SortDirection::Desc);
        assert_eq!(fresh.page, 3);
        assert_eq!(fresh.page_size, 25);
        assert_eq!(fresh.selection.selected_ids(), &[5, 9]);
    }

    #[test]
    fn test_junk_restore_degrades_to_defaults() {
        let params = ListQueryParams::from_pairs([
            ("q", "  hi  "),
            ("dir", "sideways"),
            ("page", "not-a-number"),
            ("per_page", "99999"),
            ("selected", "7,junk,-2,7,0"),
            ("utm_source", "newsletter"),
        ]);
        let mut table = TableState::new();
        params.apply_to(&mut table);

        assert_eq!(table.search.term(), "hi");
        assert_eq!(table.sort.field(), None);
        assert_eq!(table.sort.direction(), SortDirection::Asc);
        assert_eq!(table.page, 0);
        assert_eq!(table.page_size, MAX_PAGE_SIZE);
        assert_eq!(table.selection.selected_ids(), &[7]);
    }

    #[test]
    fn test_asc_direction_not_serialized() {
        let mut table = TableState::new();
        table.toggle_sort("views");
        let params = ListQueryParams::from_table(&table);
        assert_eq!(params.sort.as_deref(), Some("views"));
        assert_eq!(params.dir, None);
    }
}
