use contracts::domain::a003_comment::aggregate::CommentStatus;
use contracts::shared::list_state::TableState;
use leptos::prelude::*;

use super::CommentRow;

#[derive(Clone, Debug, Default)]
pub struct CommentListState {
    pub table: TableState,

    /// Фильтр по статусу модерации
    pub status_filter: Option<CommentStatus>,

    pub items: Vec<CommentRow>,
    pub is_loaded: bool,
}

pub fn create_state() -> RwSignal<CommentListState> {
    RwSignal::new(CommentListState::default())
}
