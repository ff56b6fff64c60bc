mod state;

use contracts::domain::a002_category::aggregate::Category;
use contracts::shared::list_state::{ListQueryParams, Searchable, SortableBy};
use leptos::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use wasm_bindgen_futures::spawn_local;

use crate::domain::a002_category::api;
use crate::domain::a002_category::ui::details::CategoryDetails;
use crate::layout::global_context::{read_query_map, write_query_map};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, sort_indicator, SearchInput};
use state::create_state;
pub use state::CategoryListState;

const SORT_FIELDS: &[&str] = &["title", "slug", "position", "parent_name"];

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryRow {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub parent_name: String,
    pub color: Option<String>,
    pub position: i32,
}

impl CategoryRow {
    fn from_category(c: Category, titles: &HashMap<i64, String>) -> Self {
        let parent_name = c
            .parent_ref
            .and_then(|p| titles.get(&p.value()).cloned())
            .unwrap_or_else(|| "—".to_string());
        Self {
            id: c.base.id.value(),
            slug: c.base.slug,
            title: c.base.title,
            parent_name,
            color: c.color,
            position: c.position,
        }
    }
}

impl Searchable for CategoryRow {
    fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.slug.to_lowercase().contains(&term)
    }
}

impl SortableBy for CategoryRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            "slug" => self.slug.cmp(&other.slug),
            "position" => self.position.cmp(&other.position),
            "parent_name" => self
                .parent_name
                .to_lowercase()
                .cmp(&other.parent_name.to_lowercase()),
            _ => Ordering::Equal,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn CategoryList() -> impl IntoView {
    let state = create_state();
    let all_rows: RwSignal<Vec<CategoryRow>> = RwSignal::new(Vec::new());
    let categories: RwSignal<Vec<Category>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<i64>>(None);

    let sync_url = move || {
        let mut pairs = vec![("section".to_string(), "categories".to_string())];
        state.with_untracked(|s| {
            pairs.extend(ListQueryParams::from_table(&s.table).to_pairs());
        });
        write_query_map(&pairs);
    };

    let refresh_view = move || {
        state.update(|s| {
            let rows = all_rows.get_untracked();
            s.items = s.table.rebuild(rows, SORT_FIELDS, |r| r.id);
        });
        sync_url();
    };

    let load_data = move || {
        spawn_local(async move {
            match api::fetch_categories().await {
                Ok(list) => {
                    let titles: HashMap<i64, String> = list
                        .iter()
                        .map(|c| (c.base.id.value(), c.base.title.clone()))
                        .collect();
                    let rows: Vec<CategoryRow> = list
                        .iter()
                        .cloned()
                        .map(|c| CategoryRow::from_category(c, &titles))
                        .collect();
                    categories.set(list);
                    all_rows.set(rows);
                    state.update(|s| s.is_loaded = true);
                    set_error.set(None);
                    refresh_view();
                }
                Err(e) => set_error.set(Some(format!("Ошибка загрузки рубрик: {}", e))),
            }
        });
    };

    let params = read_query_map();
    if params.get("section").map(|s| s.as_str()) == Some("categories") {
        state.update(|s| {
            ListQueryParams::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .apply_to(&mut s.table);
        });
    }
    load_data();

    let toggle_selection = move |id: i64| {
        state.update(|s| s.table.selection.toggle(id));
        sync_url();
    };

    let toggle_all = move |checked: bool| {
        state.update(|s| s.table.header_checkbox(checked));
        sync_url();
    };

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| s.table.toggle_sort(field));
            refresh_view();
        }
    };

    let apply_search = move |term: String| {
        state.update(|s| s.table.set_search(Some(&term)));
        refresh_view();
    };

    // Удаление выбранного: рубрики с записями остаются выбранными для
    // повтора после разбора
    let delete_selected = move || {
        let ids = state.with_untracked(|s| s.table.selection.selected_ids().to_vec());
        if ids.is_empty() {
            return;
        }

        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!(
                    "Удалить выбранные рубрики? Количество: {}",
                    ids.len()
                ))
                .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        spawn_local(async move {
            match api::bulk_delete(ids).await {
                Ok(report) => {
                    set_notice.set(Some(report.summary()));
                    state.update(|s| {
                        if report.all_succeeded() {
                            s.table.selection.clear();
                        } else {
                            s.table.selection.set_selected(report.failed_ids());
                        }
                    });
                    load_data();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let handle_edit = move |id: i64| {
        set_editing_id.set(Some(id));
        set_show_modal.set(true);
    };

    view! {
        <div class="content">
            <div class="header">
                <div class="header-actions">
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.table.search.term().to_string()))
                        on_change=Callback::new(apply_search)
                        placeholder="Поиск по рубрикам...".to_string()
                    />
                    <button class="btn btn-primary" on:click=move |_| {
                        set_editing_id.set(None);
                        set_show_modal.set(true);
                    }>
                        {icon("plus")}
                        {" Новая рубрика"}
                    </button>
                    <button class="btn btn-success" on:click=move |_| {
                        spawn_local(async move {
                            match api::fill_test_data().await {
                                Ok(_) => load_data(),
                                Err(e) => set_error.set(Some(format!("Ошибка заполнения: {}", e))),
                            }
                        });
                    }>
                        {" Заполнить"}
                    </button>
                    <button class="btn btn-secondary" on:click=move |_| load_data()>
                        {icon("refresh")}
                        {" Обновить"}
                    </button>
                    <button
                        class="btn btn-danger"
                        on:click=move |_| delete_selected()
                        disabled={move || state.with(|s| s.table.selection.selected_count() == 0)}
                    >
                        {icon("delete")}
                        {move || format!(" Удалить ({})", state.with(|s| s.table.selection.selected_count()))}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || notice.get().map(|n| view! { <div class="alert alert--info">{n}</div> })}

            <div class="table-container">
                <table>
                    <thead>
                        <tr>
                            <th>
                                <input
                                    type="checkbox"
                                    class="table__checkbox"
                                    prop:checked=move || state.with(|s| s.table.selection.select_all())
                                    on:change=move |ev| toggle_all(event_target_checked(&ev))
                                />
                            </th>
                            <th class="cursor-pointer user-select-none" on:click=toggle_sort("title") title="Сортировать">
                                {move || format!("Название{}", state.with(|s| sort_indicator(&s.table.sort, "title")))}
                            </th>
                            <th class="cursor-pointer user-select-none" on:click=toggle_sort("slug") title="Сортировать">
                                {move || format!("Slug{}", state.with(|s| sort_indicator(&s.table.sort, "slug")))}
                            </th>
                            <th class="cursor-pointer user-select-none" on:click=toggle_sort("parent_name") title="Сортировать">
                                {move || format!("Родитель{}", state.with(|s| sort_indicator(&s.table.sort, "parent_name")))}
                            </th>
                            <th>{"Цвет"}</th>
                            <th class="cursor-pointer user-select-none" on:click=toggle_sort("position") title="Сортировать">
                                {move || format!("Порядок{}", state.with(|s| sort_indicator(&s.table.sort, "position")))}
                            </th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let current_filter = state.with(|s| s.table.search.term().to_string());
                            state.get().items.into_iter().map(|row| {
                                let id = row.id;
                                let title_view = highlight_matches(&row.title, &current_filter);
                                let slug_view = highlight_matches(&row.slug, &current_filter);
                                let color_view = match row.color.clone() {
                                    Some(color) => view! {
                                        <span
                                            class="color-dot"
                                            style=format!("background-color: {};", color)
                                            title=color.clone()
                                        ></span>
                                    }.into_any(),
                                    None => view! { <span>{"—"}</span> }.into_any(),
                                };
                                view! {
                                    <tr on:click=move |_| handle_edit(id)>
                                        <td>
                                            <input
                                                type="checkbox"
                                                class="table__checkbox"
                                                prop:checked=move || state.with(|s| s.table.selection.is_selected(id))
                                                on:click=move |ev| ev.stop_propagation()
                                                on:change=move |_| toggle_selection(id)
                                            />
                                        </td>
                                        <td>{title_view}</td>
                                        <td><code>{slug_view}</code></td>
                                        <td>{row.parent_name.clone()}</td>
                                        <td>{color_view}</td>
                                        <td>{row.position}</td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            {move || if show_modal.get() {
                view! {
                    <CategoryDetails
                        id=editing_id.get()
                        categories=categories
                        on_saved=Callback::new(move |_| {
                            set_show_modal.set(false);
                            set_editing_id.set(None);
                            load_data();
                        })
                        on_cancel=Callback::new(move |_| {
                            set_show_modal.set(false);
                            set_editing_id.set(None);
                        })
                    />
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
