use serde::{Deserialize, Serialize};

use super::search::{SearchState, Searchable};
use super::selection::SelectionState;
use super::sort::{SortDirection, SortState, SortableBy};

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Композиция состояния одной списковой формы: поиск + сортировка +
/// пагинация + выбор строк.
///
/// После каждой мутации владелец зовёт [`TableState::rebuild`] с полным
/// набором строк: фильтр → сортировка → пересчёт пагинации → срез
/// текущей страницы → обновление `current_page_ids` выбора.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub selection: SelectionState,
    pub sort: SortState,
    pub search: SearchState,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            selection: SelectionState::new(),
            sort: SortState::new(),
            search: SearchState::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Новый поисковый запрос: страница сбрасывается на первую
    pub fn set_search(&mut self, raw: Option<&str>) {
        self.search.set_term(raw);
        self.page = 0;
    }

    /// Клик по заголовку колонки
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.sort_by(field);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 0;
    }

    /// Чекбокс в шапке таблицы. Булево значение — намерение
    /// пользователя, а не истина: реальное значение `select_all`
    /// пересчитывается внутри выбора.
    pub fn header_checkbox(&mut self, checked: bool) {
        if checked {
            self.selection.select_all_on_page();
        } else {
            self.selection.deselect_all_on_page();
        }
    }

    /// Пересобрать видимую страницу из полного набора строк.
    ///
    /// `id_of` выдаёт идентификатор строки для синхронизации выбора;
    /// `allowed_sort_fields` защищает от сортировки по полю, которого
    /// нет среди колонок (см. [`SortState::apply`]).
    pub fn rebuild<T, F>(&mut self, rows: Vec<T>, allowed_sort_fields: &[&str], id_of: F) -> Vec<T>
    where
        T: Searchable + SortableBy,
        F: Fn(&T) -> i64,
    {
        let mut filtered: Vec<T> = if self.search.is_active() {
            let term = self.search.term().to_string();
            rows.into_iter()
                .filter(|row| row.matches_term(&term))
                .collect()
        } else {
            rows
        };

        self.sort.apply(&mut filtered, allowed_sort_fields);

        self.total_count = filtered.len();
        self.total_pages = if self.total_count == 0 {
            1
        } else {
            (self.total_count + self.page_size - 1) / self.page_size
        };
        if self.page >= self.total_pages {
            self.page = self.total_pages.saturating_sub(1);
        }

        let start = self.page * self.page_size;
        let page_rows: Vec<T> = filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();

        self.selection.set_current_page(page_rows.iter().map(&id_of));

        page_rows
    }

    /// Read-only снимок для слоя отображения
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            selected_ids: self.selection.selected_ids().to_vec(),
            select_all: self.selection.select_all(),
            selected_count: self.selection.selected_count(),
            sort_field: self.sort.field().map(|f| f.to_string()),
            sort_direction: self.sort.direction(),
            search_term: self.search.term().to_string(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Снимок состояния списка, который потребляет слой отображения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub selected_ids: Vec<i64>,
    pub select_all: bool,
    pub selected_count: usize,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub search_term: String,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        title: String,
    }

    impl Row {
        fn new(id: i64, title: &str) -> Self {
            Self {
                id,
                title: title.to_string(),
            }
        }
    }

    impl Searchable for Row {
        fn matches_term(&self, term: &str) -> bool {
            self.title.to_lowercase().contains(&term.to_lowercase())
        }
    }

    impl SortableBy for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "title" => self.title.cmp(&other.title),
                "id" => self.id.cmp(&other.id),
                _ => Ordering::Equal,
            }
        }
    }

    const FIELDS: &[&str] = &["title", "id"];

    fn rows(count: i64) -> Vec<Row> {
        (1..=count)
            .map(|i| Row::new(i, &format!("post {:02}", i)))
            .collect()
    }

    #[test]
    fn test_rebuild_pipeline_updates_selection_page() {
        let mut table = TableState::new();
        table.set_page_size(3);
        let page = table.rebuild(rows(7), FIELDS, |r| r.id);
        assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(table.selection.current_page_ids(), &[1, 2, 3]);
        assert_eq!(table.total_count, 7);
        assert_eq!(table.total_pages, 3);

        table.go_to_page(2);
        let page = table.rebuild(rows(7), FIELDS, |r| r.id);
        assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![7]);
        assert_eq!(table.selection.current_page_ids(), &[7]);
    }

    #[test]
    fn test_selection_survives_page_change() {
        let mut table = TableState::new();
        table.set_page_size(3);
        table.rebuild(rows(7), FIELDS, |r| r.id);
        table.selection.select_all_on_page();
        assert!(table.selection.select_all());

        table.go_to_page(1);
        table.rebuild(rows(7), FIELDS, |r| r.id);
        assert!(!table.selection.select_all());
        assert_eq!(table.selection.selected_ids(), &[1, 2, 3]);
    }

    #[test]
    fn test_search_filters_and_resets_page() {
        let mut table = TableState::new();
        table.set_page_size(3);
        table.go_to_page(2);
        table.set_search(Some("post 05"));
        assert_eq!(table.page, 0);
        let page = table.rebuild(rows(7), FIELDS, |r| r.id);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 5);
        assert_eq!(table.total_count, 1);
    }

    #[test]
    fn test_page_clamped_when_results_shrink() {
        let mut table = TableState::new();
        table.set_page_size(2);
        table.go_to_page(10);
        table.rebuild(rows(3), FIELDS, |r| r.id);
        assert_eq!(table.page, 1); // последняя реальная страница
        assert_eq!(table.total_pages, 2);
    }

    #[test]
    fn test_empty_result_keeps_one_page() {
        let mut table = TableState::new();
        table.set_search(Some("нет такого"));
        let page = table.rebuild(rows(3), FIELDS, |r| r.id);
        assert!(page.is_empty());
        assert_eq!(table.total_pages, 1);
        assert_eq!(table.page, 0);
        assert!(!table.selection.select_all());
    }

    #[test]
    fn test_header_checkbox_drives_page_selection() {
        let mut table = TableState::new();
        table.set_page_size(2);
        table.rebuild(rows(4), FIELDS, |r| r.id);

        table.header_checkbox(true);
        assert!(table.selection.select_all());
        assert_eq!(table.selection.selected_ids(), &[1, 2]);

        table.header_checkbox(false);
        assert!(!table.selection.select_all());
        assert_eq!(table.selection.selected_count(), 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut table = TableState::new();
        table.toggle_sort("title");
        table.toggle_sort("title");
        table.set_search(Some(" post "));
        table.rebuild(rows(2), FIELDS, |r| r.id);
        table.selection.toggle(1);

        let snap = table.snapshot();
        assert_eq!(snap.sort_field.as_deref(), Some("title"));
        assert_eq!(snap.sort_direction, SortDirection::Desc);
        assert_eq!(snap.search_term, "post");
        assert_eq!(snap.selected_ids, vec![1]);
        assert_eq!(snap.selected_count, 1);
        assert!(!snap.select_all);
    }
}
