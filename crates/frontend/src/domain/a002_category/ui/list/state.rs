use contracts::shared::list_state::TableState;
use leptos::prelude::*;

use super::CategoryRow;

#[derive(Clone, Debug, Default)]
pub struct CategoryListState {
    pub table: TableState,
    pub items: Vec<CategoryRow>,
    pub is_loaded: bool,
}

pub fn create_state() -> RwSignal<CategoryListState> {
    RwSignal::new(CategoryListState::default())
}
