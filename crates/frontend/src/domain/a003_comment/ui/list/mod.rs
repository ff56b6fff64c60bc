mod state;

use contracts::domain::a003_comment::aggregate::{Comment, CommentStatus};
use contracts::shared::list_state::{
    ListQueryParams, Searchable, SortableBy, ToggleQueue,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a003_comment::api;
use crate::layout::global_context::{read_query_map, write_query_map};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use state::create_state;
pub use state::CommentListState;

const SORT_FIELDS: &[&str] = &["author_name", "status", "spam_score", "created_at"];

#[derive(Clone, Debug, PartialEq)]
pub struct CommentRow {
    pub id: i64,
    pub post_ref: i64,
    pub author_name: String,
    pub excerpt: String,
    pub status: CommentStatus,
    pub spam_score: f32,
    pub created_at: String,
}

impl CommentRow {
    fn from_comment(c: &Comment) -> Self {
        Self {
            id: c.id.value(),
            post_ref: c.post_ref.value(),
            author_name: c.author_name.clone(),
            excerpt: c.excerpt(120),
            status: c.status,
            spam_score: c.spam_score,
            created_at: c.metadata.created_at.to_rfc3339(),
        }
    }
}

impl Searchable for CommentRow {
    fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.author_name.to_lowercase().contains(&term)
            || self.excerpt.to_lowercase().contains(&term)
    }
}

impl SortableBy for CommentRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "author_name" => self
                .author_name
                .to_lowercase()
                .cmp(&other.author_name.to_lowercase()),
            "status" => self.status.code().cmp(other.status.code()),
            "spam_score" => self
                .spam_score
                .partial_cmp(&other.spam_score)
                .unwrap_or(Ordering::Equal),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }
}

fn status_badge(status: CommentStatus) -> AnyView {
    let class = match status {
        CommentStatus::Pending => "badge badge--warning",
        CommentStatus::Approved => "badge badge--success",
        CommentStatus::Spam => "badge badge--error",
    };
    view! { <span class={class}>{status.display_name()}</span> }.into_any()
}

#[component]
#[allow(non_snake_case)]
pub fn CommentList() -> impl IntoView {
    let state = create_state();
    let all_rows: RwSignal<Vec<CommentRow>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let toggle_queue = StoredValue::new(ToggleQueue::new());

    let sync_url = move || {
        let mut pairs = vec![("section".to_string(), "comments".to_string())];
        state.with_untracked(|s| {
            pairs.extend(ListQueryParams::from_table(&s.table).to_pairs());
            if let Some(status) = s.status_filter {
                pairs.push(("status".to_string(), status.code().to_string()));
            }
        });
        write_query_map(&pairs);
    };

    let refresh_view = move || {
        state.update(|s| {
            let rows: Vec<CommentRow> = all_rows
                .get_untracked()
                .into_iter()
                .filter(|row| s.status_filter.map_or(true, |f| row.status == f))
                .collect();
            s.items = s.table.rebuild(rows, SORT_FIELDS, |r| r.id);
        });
        sync_url();
    };

    let load_data = move || {
        spawn_local(async move {
            match api::fetch_comments().await {
                Ok(comments) => {
                    let rows: Vec<CommentRow> =
                        comments.iter().map(CommentRow::from_comment).collect();
                    all_rows.set(rows);
                    state.update(|s| s.is_loaded = true);
                    set_error.set(None);
                    refresh_view();
                }
                Err(e) => set_error.set(Some(format!("Ошибка загрузки комментариев: {}", e))),
            }
        });
    };

    let params = read_query_map();
    if params.get("section").map(|s| s.as_str()) == Some("comments") {
        state.update(|s| {
            ListQueryParams::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .apply_to(&mut s.table);
            s.status_filter = params.get("status").map(|v| CommentStatus::from_code(v));
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

    let run_bulk = move |action: &'static str| {
        let ids = state.with_untracked(|s| s.table.selection.selected_ids().to_vec());
        if ids.is_empty() {
            return;
        }

        if action == "delete" {
            let confirmed = web_sys::window()
                .map(|w| {
                    w.confirm_with_message(&format!(
                        "Удалить выбранные комментарии? Количество: {}",
                        ids.len()
                    ))
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

    // Оптимистичный переключатель "одобрен": повторные клики по той же
    // строке выстраиваются в очередь и уходят по порядку
    let toggle_approved = move |id: i64| {
        let desired_status = {
            let mut desired = None;
            all_rows.update(|rows| {
                if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
                    row.status = if row.status == CommentStatus::Approved {
                        CommentStatus::Pending
                    } else {
                        CommentStatus::Approved
                    };
                    desired = Some(row.status);
                }
            });
            match desired {
                Some(v) => v,
                None => return,
            }
        };
        refresh_view();

        let send_now = toggle_queue
            .try_update_value(|q| q.request(id, desired_status == CommentStatus::Approved))
            .flatten();
        let Some(first) = send_now else {
            return;
        };

        spawn_local(async move {
            let mut approve = first;
            loop {
                let status = if approve { "approved" } else { "pending" };
                match api::set_status(id, status).await {
                    Ok(()) => {
                        let next = toggle_queue.try_update_value(|q| q.settle(id)).flatten();
                        match next {
                            Some(v) => approve = v,
                            None => break,
                        }
                    }
                    Err(e) => {
                        toggle_queue.update_value(|q| q.fail(id));
                        set_error.set(Some(format!("Не удалось обновить статус: {}", e)));
                        load_data();
                        break;
                    }
                }
            }
        });
    };

    let sort_signal = Signal::derive(move || state.with(|s| s.table.sort.clone()));
    let selected_count = move || state.with(|s| s.table.selection.selected_count());

    view! {
        <div class="content">
            <div class="header">
                <div class="header-actions">
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.table.search.term().to_string()))
                        on_change=Callback::new(apply_search)
                        placeholder="Поиск по комментариям...".to_string()
                    />
                    <select
                        class="form-control"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| {
                                s.status_filter = if value.is_empty() {
                                    None
                                } else {
                                    Some(CommentStatus::from_code(&value))
                                };
                                s.table.page = 0;
                            });
                            refresh_view();
                        }
                    >
                        <option value="">{"Все статусы"}</option>
                        <option value="pending">{"На модерации"}</option>
                        <option value="approved">{"Одобренные"}</option>
                        <option value="spam">{"Спам"}</option>
                    </select>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_data()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| {
                        spawn_local(async move {
                            match api::fill_test_data().await {
                                Ok(_) => load_data(),
                                Err(e) => set_error.set(Some(format!("Ошибка заполнения: {}", e))),
                            }
                        });
                    }>
                        " Заполнить"
                    </Button>
                </div>
            </div>

            <div class="bulk-bar">
                <span class="bulk-bar__count">
                    {move || format!("Выбрано: {}", selected_count())}
                </span>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| run_bulk("approve")
                    disabled=Signal::derive(move || selected_count() == 0)
                >
                    {icon("check")}
                    " Одобрить"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| run_bulk("spam")
                    disabled=Signal::derive(move || selected_count() == 0)
                >
                    " В спам"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| run_bulk("delete")
                    disabled=Signal::derive(move || selected_count() == 0)
                >
                    {icon("delete")}
                    {move || format!(" Удалить ({})", selected_count())}
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
                                checked=Signal::derive(move || state.with(|s| s.table.selection.select_all()))
                                any_selected=Signal::derive(move || state.with(|s| s.table.selection.any_selected_on_page()))
                                on_change=Callback::new(toggle_all)
                            />
                            <SortableHeaderCell
                                label="Автор"
                                sort_field="author_name"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=140.0
                            />
                            <TableHeaderCell resizable=false min_width=280.0>
                                {"Текст"}
                            </TableHeaderCell>
                            <SortableHeaderCell
                                label="Статус"
                                sort_field="status"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=110.0
                            />
                            <SortableHeaderCell
                                label="Спам-оценка"
                                sort_field="spam_score"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=90.0
                            />
                            <SortableHeaderCell
                                label="Создан"
                                sort_field="created_at"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=120.0
                            />
                            <TableHeaderCell resizable=false min_width=80.0>
                                {"Одобрен"}
                            </TableHeaderCell>
                        </TableRow>
                    </TableHeader>

                    <TableBody>
                        <For
                            each=move || state.get().items
                            key=|row| (row.id, row.status)
                            children=move |row| {
                                let id = row.id;
                                let author = row.author_name.clone();
                                let excerpt = row.excerpt.clone();
                                let created = format_datetime(&row.created_at);
                                let approved = row.status == CommentStatus::Approved;
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
                                                    highlight_matches(&author, &term)
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {move || {
                                                    let term = state.with(|s| s.table.search.term().to_string());
                                                    highlight_matches(&excerpt, &term)
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {status_badge(row.status)}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {format!("{:.2}", row.spam_score)}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{created}</TableCellLayout>
                                        </TableCell>
                                        <TableCell on:click=|e| e.stop_propagation()>
                                            <input
                                                type="checkbox"
                                                class="table__checkbox"
                                                prop:checked=approved
                                                on:change=move |_| toggle_approved(id)
                                            />
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}
