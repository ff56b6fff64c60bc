//! Состояние списковых форм админки: выбор строк, сортировка, поиск,
//! пагинация, массовые операции и оптимистичные переключатели.
//!
//! Чистая логика без web-зависимостей. Каждая списковая форма владеет
//! собственным экземпляром [`table::TableState`]; все внешние данные
//! (URL, payload событий) проходят нормализацию до того, как им начинают
//! доверять.

pub mod bulk;
pub mod query;
pub mod search;
pub mod selection;
pub mod sort;
pub mod table;
pub mod toggle_queue;

// Re-exports
pub use bulk::{BulkFailure, BulkReport, BulkRequest};
pub use query::ListQueryParams;
pub use search::{SearchState, Searchable};
pub use selection::SelectionState;
pub use sort::{SortDirection, SortState, SortableBy};
pub use table::{TableSnapshot, TableState, DEFAULT_PAGE_SIZE};
pub use toggle_queue::ToggleQueue;
