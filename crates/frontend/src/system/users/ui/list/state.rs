use contracts::shared::list_state::TableState;
use contracts::system::users::User;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct UsersListState {
    pub table: TableState,
    pub items: Vec<User>,
    pub is_loaded: bool,
}

// Create state within component scope instead of thread-local
// This ensures state is properly disposed when component unmounts
pub fn create_state() -> RwSignal<UsersListState> {
    RwSignal::new(UsersListState::default())
}
