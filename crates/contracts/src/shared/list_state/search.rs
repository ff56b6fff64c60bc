use serde::{Deserialize, Serialize};

/// Trait для типов данных, поддерживающих текстовый поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу
    /// (запрос приходит уже нормализованным)
    fn matches_term(&self, term: &str) -> bool;
}

/// Текстовый фильтр списка.
///
/// Терм всегда хранится без окружающих пробелов; пустая строка означает
/// "фильтра нет". Любой вход, включая `None`, вырождается в пустую
/// строку — ошибок здесь не бывает.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    term: String,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сохранить новый запрос. Сброс страницы на первую — обязанность
    /// владеющего TableState.
    pub fn set_term(&mut self, raw: Option<&str>) {
        self.term = raw.unwrap_or("").trim().to_string();
    }

    /// Нормализованное значение запроса
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_and_whitespace_become_empty() {
        let mut search = SearchState::new();
        search.set_term(None);
        assert_eq!(search.term(), "");
        assert!(!search.is_active());

        search.set_term(Some("   "));
        assert_eq!(search.term(), "");
        assert!(!search.is_active());
    }

    #[test]
    fn test_term_is_trimmed() {
        let mut search = SearchState::new();
        search.set_term(Some("  rust 2024  "));
        assert_eq!(search.term(), "rust 2024");
        assert!(search.is_active());
    }
}
