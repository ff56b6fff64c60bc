use serde::{Deserialize, Serialize};

/// Выбор строк спискового представления.
///
/// `selected_ids` живёт дольше текущей страницы: выбор сохраняется при
/// листании, поиске и смене фильтров, пока его явно не очистят (кнопкой
/// или успешной массовой операцией). `select_all` — всегда производное
/// значение: пересчитывается после каждой мутации и не хранится как
/// самостоятельная истина.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    selected_ids: Vec<i64>,
    current_page_ids: Vec<i64>,
    select_all: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Каноническая нормализация списка идентификаторов: только
    /// положительные значения, без дубликатов, в порядке первого
    /// появления. Применяется ко всем внешним входам.
    pub fn normalize<I>(values: I) -> Vec<i64>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut out: Vec<i64> = Vec::new();
        for id in values {
            if id > 0 && !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }

    /// Разобрать список id из строки вида "3,17,42".
    /// Мусорные токены молча отбрасываются.
    pub fn parse_id_list(raw: &str) -> Vec<i64> {
        Self::normalize(
            raw.split(',')
                .filter_map(|token| token.trim().parse::<i64>().ok()),
        )
    }

    /// Переключить членство id в выборе. Повторное переключение
    /// возвращает исходное состояние; неположительные id игнорируются.
    pub fn toggle(&mut self, id: i64) {
        if id <= 0 {
            return;
        }
        if let Some(pos) = self.selected_ids.iter().position(|&x| x == id) {
            self.selected_ids.remove(pos);
        } else {
            self.selected_ids.push(id);
        }
        self.recompute_select_all();
    }

    /// Заменить список id текущей страницы. Вызывается при каждой смене
    /// страницы, фильтра или сортировки.
    pub fn set_current_page<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.current_page_ids = Self::normalize(ids);
        self.recompute_select_all();
    }

    /// Добавить в выбор все строки текущей страницы
    pub fn select_all_on_page(&mut self) {
        for &id in &self.current_page_ids {
            if !self.selected_ids.contains(&id) {
                self.selected_ids.push(id);
            }
        }
        self.recompute_select_all();
    }

    /// Убрать из выбора строки текущей страницы; выбор на других
    /// страницах не трогаем
    pub fn deselect_all_on_page(&mut self) {
        self.selected_ids
            .retain(|id| !self.current_page_ids.contains(id));
        self.recompute_select_all();
    }

    /// Полностью очистить выбор
    pub fn clear(&mut self) {
        self.selected_ids.clear();
        self.recompute_select_all();
    }

    /// Заменить выбор целиком (восстановление из URL, retry после
    /// частично неудачной массовой операции)
    pub fn set_selected<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.selected_ids = Self::normalize(ids);
        self.recompute_select_all();
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn selected_ids(&self) -> &[i64] {
        &self.selected_ids
    }

    pub fn select_all(&self) -> bool {
        self.select_all
    }

    pub fn current_page_ids(&self) -> &[i64] {
        &self.current_page_ids
    }

    /// Есть ли на текущей странице хотя бы одна выбранная строка
    /// (для indeterminate-состояния чекбокса в шапке)
    pub fn any_selected_on_page(&self) -> bool {
        self.current_page_ids
            .iter()
            .any(|id| self.selected_ids.contains(id))
    }

    fn recompute_select_all(&mut self) {
        self.select_all = !self.current_page_ids.is_empty()
            && self
                .current_page_ids
                .iter()
                .all(|id| self.selected_ids.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_invalid_and_duplicates() {
        assert_eq!(
            SelectionState::normalize([3, 0, -5, 3, 7, 7, 1]),
            vec![3, 7, 1]
        );
        assert_eq!(SelectionState::normalize([]), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_id_list_tolerates_junk() {
        assert_eq!(
            SelectionState::parse_id_list("3, 17,abc,42,,-1,17"),
            vec![3, 17, 42]
        );
        assert_eq!(SelectionState::parse_id_list(""), Vec::<i64>::new());
    }

    #[test]
    fn test_double_toggle_is_idempotent() {
        let mut sel = SelectionState::new();
        sel.set_selected([4, 5]);
        let before = sel.selected_ids().to_vec();

        sel.toggle(9);
        sel.toggle(9);
        assert_eq!(sel.selected_ids(), before.as_slice());

        sel.toggle(4);
        sel.toggle(4);
        assert_eq!(sel.selected_ids(), before.as_slice());
    }

    #[test]
    fn test_toggle_ignores_non_positive() {
        let mut sel = SelectionState::new();
        sel.toggle(0);
        sel.toggle(-3);
        assert_eq!(sel.selected_count(), 0);
    }

    #[test]
    fn test_select_all_is_derived() {
        // Страница [3,4,5]: выбраны 4 и 5 — select_all ещё false
        let mut sel = SelectionState::new();
        sel.set_current_page([3, 4, 5]);
        sel.toggle(4);
        sel.toggle(5);
        assert!(!sel.select_all());

        // "выбрать всё на странице" — теперь true
        sel.select_all_on_page();
        assert_eq!(sel.selected_ids(), &[4, 5, 3]);
        assert!(sel.select_all());

        // Переход на страницу [6,7]: выбор остаётся, флаг пересчитан
        sel.set_current_page([6, 7]);
        assert!(!sel.select_all());
        assert_eq!(sel.selected_ids(), &[4, 5, 3]);
    }

    #[test]
    fn test_deselect_page_keeps_other_pages() {
        let mut sel = SelectionState::new();
        sel.set_selected([3, 4, 5]);
        sel.set_current_page([4, 5]);
        sel.deselect_all_on_page();
        assert!(!sel.select_all());
        assert_eq!(sel.selected_ids(), &[3]);
    }

    #[test]
    fn test_select_all_false_on_empty_page() {
        let mut sel = SelectionState::new();
        sel.set_current_page(Vec::<i64>::new());
        sel.select_all_on_page();
        assert!(!sel.select_all());
        assert_eq!(sel.selected_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut sel = SelectionState::new();
        sel.set_current_page([1, 2]);
        sel.select_all_on_page();
        sel.clear();
        assert_eq!(sel.selected_count(), 0);
        assert!(!sel.select_all());
    }

    #[test]
    fn test_current_page_input_is_normalized() {
        let mut sel = SelectionState::new();
        sel.set_current_page([5, 5, 0, -2, 6]);
        assert_eq!(sel.current_page_ids(), &[5, 6]);
    }
}
