use contracts::domain::a001_post::aggregate::PostKind;
use contracts::shared::list_state::TableState;
use leptos::prelude::*;

use super::PostRow;

#[derive(Clone, Debug, Default)]
pub struct PostListState {
    // Поиск, сортировка, пагинация, выбор
    pub table: TableState,

    // Дополнительные фильтры
    pub category_filter: Option<i64>,
    pub kind_filter: Option<PostKind>,

    // Видимая страница
    pub items: Vec<PostRow>,

    // Флаг загрузки
    pub is_loaded: bool,
}

// Create state within component scope instead of thread-local
// This ensures state is properly disposed when component unmounts
pub fn create_state() -> RwSignal<PostListState> {
    RwSignal::new(PostListState::default())
}
