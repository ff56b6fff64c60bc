//! Сортируемая ячейка заголовка таблицы

use contracts::shared::list_state::SortState;
use crate::shared::list_utils::{sort_class, sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Заголовок с индикатором сортировки (▲▼) и обработчиком клика
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    #[prop(into)]
    sort_field: String,

    /// Текущее состояние сортировки из state
    #[prop(into)]
    sort: Signal<SortState>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field.clone();

    let handle_click = move |_| {
        on_sort.run(sort_field_for_click.clone());
    };

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=handle_click
            >
                {label}
                <span class=move || {
                    sort.with(|s| sort_class(s, &sort_field_for_class))
                }>
                    {move || sort.with(|s| sort_indicator(s, &sort_field_for_indicator))}
                </span>
            </div>
        </TableHeaderCell>
    }
}
