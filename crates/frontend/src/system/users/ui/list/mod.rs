mod state;

use contracts::shared::list_state::ListQueryParams;
use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::{read_query_map, write_query_map};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::system::auth::guard::RequireAdmin;
use crate::system::users::api;
use crate::system::users::ui::details::{CreateUserForm, EditUserForm};
use state::create_state;
pub use state::UsersListState;

const SORT_FIELDS: &[&str] = &[
    "username",
    "full_name",
    "email",
    "is_admin",
    "is_active",
    "created_at",
    "last_login_at",
];

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <UsersList />
        </RequireAdmin>
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let state = create_state();
    let all_users: RwSignal<Vec<User>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_create_form, set_show_create_form) = signal(false);
    let editing_user: RwSignal<Option<User>> = RwSignal::new(None);

    let sync_url = move || {
        let mut pairs = vec![("section".to_string(), "users".to_string())];
        state.with_untracked(|s| {
            pairs.extend(ListQueryParams::from_table(&s.table).to_pairs());
        });
        write_query_map(&pairs);
    };

    let refresh_view = move || {
        state.update(|s| {
            let users = all_users.get_untracked();
            s.items = s.table.rebuild(users, SORT_FIELDS, |u| u.id);
        });
        sync_url();
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(data) => {
                    all_users.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                    set_loading.set(false);
                }
                Err(e) => {
                    set_error.set(Some(format!("Не удалось загрузить пользователей: {}", e)));
                    set_loading.set(false);
                }
            }
        });
    };

    let params = read_query_map();
    if params.get("section").map(|s| s.as_str()) == Some("users") {
        state.update(|s| {
            ListQueryParams::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .apply_to(&mut s.table);
        });
    }
    load_data();

    let search_signal = RwSignal::new(state.with_untracked(|s| s.table.search.term().to_string()));

    let apply_search = move || {
        state.update(|s| {
            let term = search_signal.get_untracked();
            s.table.set_search(Some(&term));
        });
        refresh_view();
    };

    let toggle_sort = move |field: String| {
        state.update(|s| s.table.toggle_sort(&field));
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

    let toggle_selection = move |id: i64| {
        state.update(|s| s.table.selection.toggle(id));
        sync_url();
    };

    let toggle_all = move |checked: bool| {
        state.update(|s| s.table.header_checkbox(checked));
        sync_url();
    };

    // Массовая блокировка/разблокировка: отказ по строке (сам себя,
    // последний администратор) не прерывает пакет
    let run_bulk_active = move |active: bool| {
        let ids = state.with_untracked(|s| s.table.selection.selected_ids().to_vec());
        if ids.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::bulk_set_active(ids, active).await {
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

    let format_ts = |value: &str| format_datetime(value);
    let format_ts_opt = |value: &Option<String>| {
        value
            .as_deref()
            .map(format_datetime)
            .unwrap_or_else(|| "-".to_string())
    };

    let sort_signal = Signal::derive(move || state.with(|s| s.table.sort.clone()));
    let selected_count = move || state.with(|s| s.table.selection.selected_count());

    view! {
        <div class="content">
            <div class="header">
                <div class="header-left">
                    <h2>{"Пользователи"}</h2>
                    <Badge>
                        {move || state.with(|s| s.table.total_count.to_string())}
                    </Badge>
                </div>
                <div class="header-actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_create_form.set(true)
                    >
                        {icon("plus")}
                        " Новый"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div style="flex: 1; max-width: 320px;">
                        <Input
                            value=search_signal
                            placeholder="Логин, ФИО или Email..."
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| apply_search()
                        disabled=Signal::derive(move || loading.get())
                    >
                        "Найти"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            search_signal.set(String::new());
                            apply_search();
                        }
                    >
                        "Сбросить"
                    </Button>
                    <PaginationControls
                        current_page=Signal::derive(move || state.with(|s| s.table.page))
                        total_pages=Signal::derive(move || state.with(|s| s.table.total_pages))
                        total_count=Signal::derive(move || state.with(|s| s.table.total_count))
                        page_size=Signal::derive(move || state.with(|s| s.table.page_size))
                        on_page_change=Callback::new(go_to_page)
                        on_page_size_change=Callback::new(change_page_size)
                        page_size_options=vec![25, 50, 100]
                    />
                </Flex>
            </div>

            <div class="bulk-bar">
                <span class="bulk-bar__count">
                    {move || format!("Выбрано: {}", selected_count())}
                </span>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| run_bulk_active(true)
                    disabled=Signal::derive(move || selected_count() == 0)
                >
                    {icon("check")}
                    " Разблокировать"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| run_bulk_active(false)
                    disabled=Signal::derive(move || selected_count() == 0)
                >
                    " Заблокировать"
                </Button>
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
                                label="Логин"
                                sort_field="username"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=140.0
                            />
                            <SortableHeaderCell
                                label="ФИО"
                                sort_field="full_name"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=160.0
                            />
                            <SortableHeaderCell
                                label="Email"
                                sort_field="email"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=160.0
                            />
                            <SortableHeaderCell
                                label="Роль"
                                sort_field="is_admin"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=80.0
                            />
                            <SortableHeaderCell
                                label="Статус"
                                sort_field="is_active"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=90.0
                            />
                            <SortableHeaderCell
                                label="Создан"
                                sort_field="created_at"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=130.0
                            />
                            <SortableHeaderCell
                                label="Последний вход"
                                sort_field="last_login_at"
                                sort=sort_signal
                                on_sort=Callback::new(toggle_sort)
                                min_width=130.0
                            />
                            <TableHeaderCell resizable=false min_width=60.0>
                            </TableHeaderCell>
                        </TableRow>
                    </TableHeader>

                    <TableBody>
                        <For
                            each=move || state.get().items
                            key=|u| (u.id, u.is_active, u.is_admin)
                            children=move |user| {
                                let user_id = user.id;
                                let user_for_edit = user.clone();
                                let created = format_ts(&user.created_at);
                                let last_login = format_ts_opt(&user.last_login_at);
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox
                                            item_id=user_id
                                            checked=Signal::derive(move || {
                                                state.with(|s| s.table.selection.is_selected(user_id))
                                            })
                                            on_toggle=Callback::new(toggle_selection)
                                        />
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <span style="font-weight: 500;">{user.username.clone()}</span>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {user.full_name.clone().unwrap_or_default()}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {user.email.clone().unwrap_or_default()}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if user.is_admin {
                                                    view! { <span class="badge badge--warning">{"Админ"}</span> }.into_any()
                                                } else {
                                                    view! { <span class="badge badge--neutral">{"Редактор"}</span> }.into_any()
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if user.is_active {
                                                    view! { <span class="badge badge--success">{"Активен"}</span> }.into_any()
                                                } else {
                                                    view! { <span class="badge badge--error">{"Заблок."}</span> }.into_any()
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{created}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{last_login}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| editing_user.set(Some(user_for_edit.clone()))
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

            {move || if show_create_form.get() {
                view! {
                    <CreateUserForm
                        on_close=Callback::new(move |_| set_show_create_form.set(false))
                        on_created=Callback::new(move |_| {
                            set_show_create_form.set(false);
                            load_data();
                        })
                    />
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}

            {move || editing_user.get().map(|user| view! {
                <EditUserForm
                    user=user
                    on_close=Callback::new(move |_| editing_user.set(None))
                    on_saved=Callback::new(move |_| {
                        editing_user.set(None);
                        load_data();
                    })
                />
            })}
        </div>
    }
}
