//! Чекбокс в заголовке таблицы для выбора всех строк страницы
//!
//! Булево из чекбокса — намерение пользователя ("выбрать всё на
//! странице" / "снять всё на странице"), истинное значение select_all
//! всегда пересчитывается в состоянии выбора.

use leptos::prelude::*;
use leptos::prelude::event_target_checked;
use thaw::*;
use wasm_bindgen::JsCast;

/// Три состояния: unchecked, checked, indeterminate (часть страницы)
#[component]
pub fn TableHeaderCheckbox(
    /// Все ли строки страницы выбраны
    #[prop(into)]
    checked: Signal<bool>,

    /// Выбрана ли хотя бы одна строка страницы
    #[prop(into)]
    any_selected: Signal<bool>,

    /// Callback при изменении (true = выбрать всё, false = снять всё)
    on_change: Callback<bool>,
) -> impl IntoView {
    // NodeRef для установки indeterminate через DOM
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let indeterminate = any_selected.get() && !checked.get();
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </TableHeaderCell>
    }
}
