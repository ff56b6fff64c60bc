mod state;

use contracts::domain::a001_post::aggregate::{Post, PostKind};
use contracts::domain::a002_category::aggregate::Category;
use contracts::shared::list_state::{ListQueryParams, Searchable, SortableBy, ToggleQueue};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use std::collections::HashMap;
use thaw::*;

use crate::domain::a001_post::api;
use crate::domain::a001_post::ui::details::PostDetails;
use crate::domain::a002_category::api as category_api;
use crate::layout::global_context::{read_query_map, write_query_map};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::date_utils::format_datetime;
use crate::shared::export::{export_to_csv, export_to_json, CsvExport};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use state::create_state;
pub use state::PostListState;

/// Колонки, по которым разрешена сортировка
const SORT_FIELDS: &[&str] = &[
    "title",
    "slug",
    "category_name",
    "kind",
    "published",
    "views",
    "updated_at",
];

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PostRow {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub category_ref: Option<i64>,
    pub category_name: String,
    pub kind: PostKind,
    pub published: bool,
    pub featured: bool,
    pub views: i64,
    pub updated_at: String,
}

impl PostRow {
    fn from_post(p: Post, category_map: &HashMap<i64, String>) -> Self {
        let category_ref = p.category_ref.map(|c| c.value());
        let category_name = category_ref
            .and_then(|id| category_map.get(&id).cloned())
            .unwrap_or_else(|| "—".to_string());

        Self {
            id: p.base.id.value(),
            slug: p.base.slug,
            title: p.base.title,
            category_ref,
            category_name,
            kind: p.kind,
            published: p.base.metadata.is_published,
            featured: p.is_featured,
            views: p.view_count,
            updated_at: p.base.metadata.updated_at.to_rfc3339(),
        }
    }
}

impl Searchable for PostRow {
    fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.slug.to_lowercase().contains(&term)
            || self.category_name.to_lowercase().contains(&term)
    }
}

impl SortableBy for PostRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            "slug" => self.slug.cmp(&other.slug),
            "category_name" => self
                .category_name
                .to_lowercase()
                .cmp(&other.category_name.to_lowercase()),
            "kind" => self.kind.code().cmp(other.kind.code()),
            "published" => self.published.cmp(&other.published),
            "views" => self.views.cmp(&other.views),
            "updated_at" => self.updated_at.cmp(&other.updated_at),
            _ => Ordering::Equal,
        }
    }
}

impl CsvExport for PostRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Заголовок",
            "Slug",
            "Рубрика",
            "Тип",
            "Статус",
            "В подборке",
            "Просмотры",
            "Обновлено",
        ]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.slug.clone(),
            self.category_name.clone(),
            self.kind.display_name().to_string(),
            if self.published {
                "Опубликовано"
            } else {
                "Черновик"
            }
            .to_string(),
            if self.featured { "Да" } else { "Нет" }.to_string(),
            self.views.to_string(),
            format_datetime(&self.updated_at),
        ]
    }
}

#[component]
#[allow(non_snake_case)]
pub fn PostList() -> impl IntoView {
    let state = create_state();
    let all_rows: RwSignal<Vec<PostRow>> = RwSignal::new(Vec::new());
    let categories: RwSignal<Vec<Category>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<i64>>(None);
    let toggle_queue = StoredValue::new(ToggleQueue::new());

    // Состояние списка зеркалится в query-строку, чтобы вид был
    // bookmarkable (см. ListQueryParams)
    let sync_url = move || {
        let mut pairs = vec![("section".to_string(), "posts".to_string())];
        state.with_untracked(|s| {
            pairs.extend(ListQueryParams::from_table(&s.table).to_pairs());
            if let Some(kind) = s.kind_filter {
                pairs.push(("kind".to_string(), kind.code().to_string()));
            }
            if let Some(category) = s.category_filter {
                pairs.push(("category".to_string(), category.to_string()));
            }
        });
        write_query_map(&pairs);
    };

    // Пересборка видимой страницы: фильтры -> поиск -> сортировка ->
    // пагинация -> синхронизация выбора
    let refresh_view = move || {
        state.update(|s| {
            let rows: Vec<PostRow> = all_rows
                .get_untracked()
                .into_iter()
                .filter(|row| s.kind_filter.map_or(true, |k| row.kind == k))
                .filter(|row| {
                    s.category_filter
                        .map_or(true, |c| row.category_ref == Some(c))
                })
                .collect();
            s.items = s.table.rebuild(rows, SORT_FIELDS, |r| r.id);
        });
        sync_url();
    };

    let load_data = move || {
        spawn_local(async move {
            let category_map: HashMap<i64, String> = match category_api::fetch_categories().await {
                Ok(list) => {
                    let map = list
                        .iter()
                        .map(|c| (c.base.id.value(), c.base.title.clone()))
                        .collect();
                    categories.set(list);
                    map
                }
                Err(e) => {
                    set_error.set(Some(format!("Ошибка загрузки рубрик: {}", e)));
                    HashMap::new()
                }
            };

            match api::fetch_posts().await {
                Ok(posts) => {
                    let rows: Vec<PostRow> = posts
                        .into_iter()
                        .map(|p| PostRow::from_post(p, &category_map))
                        .collect();
                    all_rows.set(rows);
                    state.update(|s| s.is_loaded = true);
                    set_error.set(None);
                    refresh_view();
                }
                Err(e) => set_error.set(Some(format!("Ошибка загрузки записей: {}", e))),
            }
        });
    };

    // Восстановление состояния из URL — один раз при монтировании.
    // Параметры чужого раздела не трогаем.
    let params = read_query_map();
    if params.get("section").map(|s| s.as_str()).unwrap_or("posts") == "posts" {
        state.update(|s| {
            let restored =
                ListQueryParams::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            restored.apply_to(&mut s.table);
            s.kind_filter = params.get("kind").map(|v| PostKind::from_code(v));
            s.category_filter = params.get("category").and_then(|v| v.parse().ok());
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

    let clear_selection = move |_| {
        state.update(|s| s.table.selection.clear());
        sync_url();
    };

    let toggle_sort = move |field: String| {
        state.update(|s| s.table.toggle_sort(&field));
        refresh_view();
    };

    let apply_search = move |term: String| {
        state.update(|s| s.table.set_search(Some(&term)));
        refresh_view();
    };

    let go_to_page = move |page: usize| {
        state.update(|s| s.table.go_to_page(page));
        refresh_view();
    };

    let change_page_size = move |size: usize| {
        state.update(|s| s.table.set_page_size(size));
        refresh_view();
    };

    // Все строки после фильтров/поиска/сортировки (для экспорта)
    let filtered_sorted_rows = move || -> Vec<PostRow> {
        let (kind_filter, category_filter, term, sort) = state.with_untracked(|s| {
            (
                s.kind_filter,
                s.category_filter,
                s.table.search.term().to_string(),
                s.table.sort.clone(),
            )
        });
        let mut rows: Vec<PostRow> = all_rows
            .get_untracked()
            .into_iter()
            .filter(|row| kind_filter.map_or(true, |k| row.kind == k))
            .filter(|row| category_filter.map_or(true, |c| row.category_ref == Some(c)))
            .filter(|row| term.is_empty() || row.matches_term(&term))
            .collect();
        sort.apply(&mut rows, SORT_FIELDS);
        rows
    };

    let handle_export_csv = move |_| {
        let rows = filtered_sorted_rows();
        if let Err(e) = export_to_csv(&rows, "записи.csv") {
            set_error.set(Some(format!("Ошибка экспорта: {}", e)));
        }
    };

    let handle_export_json = move |_| {
        let rows = filtered_sorted_rows();
        if let Err(e) = export_to_json(&rows, "записи.json") {
            set_error.set(Some(format!("Ошибка экспорта: {}", e)));
        }
    };

    // Массовая операция: успех очищает выбор, частичный отказ оставляет
    // выбранными только строки с ошибками — для повтора
    let run_bulk = move |action: &'static str| {
        let ids = state.with_untracked(|s| s.table.selection.selected_ids().to_vec());
        if ids.is_empty() {
            return;
        }

        if action == "delete" {
            let confirmed = web_sys::window()
                .map(|w| {
                    w.confirm_with_message(&format!("Удалить выбранные записи? Количество: {}", ids.len()))
                        .unwrap_or(false)
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }
        }

        spawn_local(async move {
            match api::bulk_action(action, ids).await {
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

    // Оптимистичный переключатель "в подборке": локальный флип сразу,
    // подтверждение после round-trip; очередь — не более одного запроса
    // в полёте на запись
    let toggle_featured = move |id: i64| {
        let desired = {
            let mut desired = None;
            all_rows.update(|rows| {
                if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
                    row.featured = !row.featured;
                    desired = Some(row.featured);
                }
            });
            match desired {
                Some(v) => v,
                None => return,
            }
        };
        refresh_view();

        let send_now = toggle_queue
            .try_update_value(|q| q.request(id, desired))
            .flatten();
        let Some(first) = send_now else {
            return;
        };

        spawn_local(async move {
            let mut value = first;
            loop {
                match api::set_post_field(id, "featured", if value { "true" } else { "false" })
                    .await
                {
                    Ok(()) => {
                        let next = toggle_queue.try_update_value(|q| q.settle(id)).flatten();
                        match next {
                            Some(v) => value = v,
                            None => break,
                        }
                    }
                    Err(e) => {
                        // Откат: перезагружаем данные с сервера
                        toggle_queue.update_value(|q| q.fail(id));
                        set_error.set(Some(format!("Не удалось обновить подборку: {}", e)));
                        load_data();
                        break;
                    }
                }
            }
        });
    };

    let handle_create_new = move |_| {
        set_editing_id.set(None);
        set_show_modal.set(true);
    };

    let handle_edit = move |id: i64| {
        set_editing_id.set(Some(id));
        set_show_modal.set(true);
    };

    let sort_signal = Signal::derive(move || state.with(|s| s.table.sort.clone()));
    // Read-only снимок состояния — всё, что нужно слою отображения
    let snapshot = Signal::derive(move || state.with(|s| s.table.snapshot()));
    let selected_count = move || snapshot.with(|s| s.selected_count);

    view! {
        <div class="content">
            <div class="header">
                <div class="header-actions">
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.table.search.term().to_string()))
                        on_change=Callback::new(apply_search)
                        placeholder="Поиск по записям...".to_string()
                    />
                    <select
                        class="form-control"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| {
                                s.kind_filter = match value.as_str() {
                                    "article" => Some(PostKind::Article),
                                    "news" => Some(PostKind::News),
                                    _ => None,
                                };
                                s.table.page = 0;
                            });
                            refresh_view();
                        }
                    >
                        <option value="">{"Все типы"}</option>
                        <option value="article">{"Статьи"}</option>
                        <option value="news">{"Новости"}</option>
                    </select>
                    <select
                        class="form-control"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| {
                                s.category_filter = value.parse::<i64>().ok();
                                s.table.page = 0;
                            });
                            refresh_view();
                        }
                    >
                        <option value="">{"Все рубрики"}</option>
                        {move || categories.get().into_iter().map(|c| {
                            let id = c.base.id.value();
                            view! {
                                <option value={id.to_string()}>{c.base.title.clone()}</option>
                            }
                        }).collect_view()}
                    </select>
                    <Button appearance=ButtonAppearance::Primary on_click=handle_create_new>
                        {icon("plus")}
                        " Новая запись"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_data()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=handle_export_csv>
                        {icon("excel")}
                        " CSV"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=handle_export_json>
                        {icon("json")}
                        " JSON"
                    </Button>
                </div>
            </div>

            <div class="bulk-bar">
                <span class="bulk-bar__count">
                    {move || format!("Выбрано: {}", selected_count())}
                </span>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| run_bulk("publish")
                    disabled=Signal::derive(move || selected_count() == 0)
                >
                    {icon("check")}
                    " Опубликовать"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| run_bulk("unpublish")
                    disabled=Signal::derive(move || selected_count() == 0)
                >
                    " Снять с публикации"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| run_bulk("delete")
                    disabled=Signal::derive(move || selected_count() == 0)
                >
                    {icon("delete")}
                    {move || format!(" Удалить ({})", selected_count())}
                </Button>
                <Button appearance=ButtonAppearance::Subtle on_click=clear_selection>
                    " Сбросить выбор"
                </Button>
                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.table.page))
                    total_pages=Signal::derive(move || state.with(|s| s.table.total_pages))
                    total_count=Signal::derive(move || state.with(|s| s.table.total_count))
                    page_size=Signal::derive(move || state.with(|s| s.table.page_size))
                    on_page_change=Callback::new(go_to_page)
                    on_page_size_change=Callback::new(change_page_size)
                />
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || notice.get().map(|n| view! { <div class="alert alert--info">{n}</div> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox
                                checked=Signal::derive(move || snapshot.with(|s| s.select_all))
                                any_selected=Signal::derive(move || state.with(|s| s.table.selection.any_selected_on_page()))
                                on_change=Callback::new(toggle_all)
                            />
                            <SortableHeaderCell
                                label="Заголовок"
                                sort_field="title"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=200.0
                            />
                            <SortableHeaderCell
                                label="Slug"
                                sort_field="slug"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                            />
                            <SortableHeaderCell
                                label="Рубрика"
                                sort_field="category_name"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                            />
                            <SortableHeaderCell
                                label="Тип"
                                sort_field="kind"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=80.0
                            />
                            <SortableHeaderCell
                                label="Статус"
                                sort_field="published"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=90.0
                            />
                            <TableHeaderCell resizable=false min_width=60.0>
                                {"Подборка"}
                            </TableHeaderCell>
                            <SortableHeaderCell
                                label="Просмотры"
                                sort_field="views"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=80.0
                            />
                            <SortableHeaderCell
                                label="Обновлено"
                                sort_field="updated_at"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=120.0
                            />
                            <TableHeaderCell resizable=false min_width=60.0>
                            </TableHeaderCell>
                        </TableRow>
                    </TableHeader>

                    <TableBody>
                        <For
                            each=move || state.get().items
                            key=|row| (row.id, row.featured, row.published)
                            children=move |row| {
                                let id = row.id;
                                let title = row.title.clone();
                                let slug = row.slug.clone();
                                let category_name = row.category_name.clone();
                                let updated = format_datetime(&row.updated_at);
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox
                                            item_id=id
                                            checked=Signal::derive(move || {
                                                state.with(|s| s.table.selection.is_selected(id))
                                            })
                                            on_toggle=Callback::new(toggle_selection)
                                        />
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {move || {
                                                    let term = state.with(|s| s.table.search.term().to_string());
                                                    highlight_matches(&title, &term)
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <code>{slug.clone()}</code>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {category_name.clone()}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {row.kind.display_name()}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if row.published {
                                                    view! { <span class="badge badge--success">{"Опубликовано"}</span> }.into_any()
                                                } else {
                                                    view! { <span class="badge badge--neutral">{"Черновик"}</span> }.into_any()
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell on:click=|e| e.stop_propagation()>
                                            <button
                                                class=move || {
                                                    if row.featured {
                                                        "star-toggle star-toggle--on"
                                                    } else {
                                                        "star-toggle"
                                                    }
                                                }
                                                title="В подборке"
                                                on:click=move |_| toggle_featured(id)
                                            >
                                                {icon("star")}
                                            </button>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{row.views}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{updated}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| handle_edit(id)
                                                attr:title="Редактировать"
                                            >
                                                {icon("edit")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>

            {move || if show_modal.get() {
                view! {
                    <PostDetails
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
