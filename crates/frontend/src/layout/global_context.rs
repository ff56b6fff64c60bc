use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Раздел админки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Posts,
    Categories,
    Comments,
    Users,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::Posts => "posts",
            Section::Categories => "categories",
            Section::Comments => "comments",
            Section::Users => "users",
        }
    }

    /// Незнакомый ключ из URL — просто записи
    pub fn from_key(key: &str) -> Self {
        match key {
            "categories" => Section::Categories,
            "comments" => Section::Comments,
            "users" => Section::Users,
            _ => Section::Posts,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Posts => "Записи",
            Section::Categories => "Рубрики",
            Section::Comments => "Комментарии",
            Section::Users => "Пользователи",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Section>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Section::default()),
        }
    }

    /// Восстановить активный раздел из query-строки и дальше зеркалить
    /// его обратно в URL. Параметры самих списков пишет каждый список.
    pub fn init_router_integration(&self) {
        let params = read_query_map();
        if let Some(section) = params.get("section") {
            self.active.set(Section::from_key(section));
        }
    }

    pub fn activate(&self, section: Section) {
        self.active.set(section);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Текущие параметры query-строки
pub fn read_query_map() -> HashMap<String, String> {
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

/// Записать параметры раздела в URL через history.replace_state.
/// Сортированная map — чтобы строка была стабильной и URL не "дрожал".
pub fn write_query_map(pairs: &[(String, String)]) {
    let map: std::collections::BTreeMap<&str, &str> = pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let query_string = serde_qs::to_string(&map).unwrap_or_default();
    let new_url = if query_string.is_empty() {
        window()
            .map(|w| w.location().pathname().unwrap_or_else(|_| "/".into()))
            .unwrap_or_else(|| "/".into())
    } else {
        format!("?{}", query_string)
    };

    let current_search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();

    // Only update URL if it actually changed
    if current_search != new_url {
        if let Some(w) = window() {
            if let Ok(history) = w.history() {
                let _ = history.replace_state_with_url(
                    &wasm_bindgen::JsValue::NULL,
                    "",
                    Some(&new_url),
                );
            }
        }
    }
}
