use crate::shared::icons::icon;
use leptos::prelude::*;

/// Панель пагинации списка: первая/предыдущая/следующая/последняя
/// страница плюс выбор размера страницы. Страницы нумеруются с нуля,
/// пользователю показываются с единицы.
#[component]
pub fn PaginationControls(
    #[prop(into)] current_page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] total_count: Signal<usize>,
    #[prop(into)] page_size: Signal<usize>,
    on_page_change: Callback<usize>,
    on_page_size_change: Callback<usize>,
    /// Варианты размера страницы
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![25, 50, 100, 200]);

    let at_first = Signal::derive(move || current_page.get() == 0);
    let at_last = Signal::derive(move || current_page.get() + 1 >= total_pages.get());

    let last_page = move || total_pages.get().saturating_sub(1);
    let prev_page = move || current_page.get().saturating_sub(1);
    let next_page = move || (current_page.get() + 1).min(last_page());

    let info = move || {
        format!(
            "{} / {} ({})",
            current_page.get() + 1,
            total_pages.get().max(1),
            total_count.get()
        )
    };

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=move || at_first.get()
                title="Первая страница"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(prev_page())
                disabled=move || at_first.get()
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">{info}</span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(next_page())
                disabled=move || at_last.get()
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(last_page())
                disabled=move || at_last.get()
                title="Последняя страница"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
