//! Чекбокс в ячейке таблицы для выбора отдельной строки

use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TableCellCheckbox(
    /// ID текущей строки
    item_id: i64,

    /// Выбрана ли строка
    #[prop(into)]
    checked: Signal<bool>,

    /// Callback при клике (id строки)
    on_toggle: Callback<i64>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || checked.get()
                on:change=move |_| {
                    on_toggle.run(item_id);
                }
            />
        </TableCell>
    }
}
