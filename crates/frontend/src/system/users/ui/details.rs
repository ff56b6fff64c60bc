use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::system::users::api;

/// Форма создания пользователя
#[component]
pub fn CreateUserForm(on_close: Callback<()>, on_created: Callback<()>) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let is_admin = RwSignal::new(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        if username.get_untracked().trim().is_empty() {
            set_error.set(Some("Введите логин".into()));
            return;
        }
        if password.get_untracked().len() < 6 {
            set_error.set(Some("Пароль должен быть не короче 6 символов".into()));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let dto = CreateUserDto {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            email: Some(email.get_untracked()).filter(|e| !e.trim().is_empty()),
            full_name: Some(full_name.get_untracked()).filter(|n| !n.trim().is_empty()),
            is_admin: is_admin.get_untracked(),
        };

        spawn_local(async move {
            match api::create_user(dto).await {
                Ok(_) => on_created.run(()),
                Err(e) => {
                    set_error.set(Some(format!("Ошибка создания: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{"Новый пользователь"}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </div>

                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="modal-body">
                    <label class="form-field">
                        {"Логин"}
                        <input
                            type="text"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        {"Пароль"}
                        <input
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        {"ФИО"}
                        <input
                            type="text"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        {"Email"}
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field form-field--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || is_admin.get()
                            on:change=move |ev| is_admin.set(event_target_checked(&ev))
                        />
                        {"Администратор"}
                    </label>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Создание..." } else { "Создать" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {"Отмена"}
                    </Button>
                </div>
            </div>
        </div>
    }
}

/// Форма редактирования пользователя
#[component]
pub fn EditUserForm(user: User, on_close: Callback<()>, on_saved: Callback<()>) -> impl IntoView {
    let email = RwSignal::new(user.email.clone().unwrap_or_default());
    let full_name = RwSignal::new(user.full_name.clone().unwrap_or_default());
    let is_admin = RwSignal::new(user.is_admin);
    let is_active = RwSignal::new(user.is_active);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let username_display = user.username.clone();
    let user_id = user.id;

    let on_save = move |_| {
        set_saving.set(true);
        set_error.set(None);

        let dto = UpdateUserDto {
            id: user_id,
            email: Some(email.get_untracked()).filter(|e| !e.trim().is_empty()),
            full_name: Some(full_name.get_untracked()).filter(|n| !n.trim().is_empty()),
            is_active: is_active.get_untracked(),
            is_admin: is_admin.get_untracked(),
        };

        spawn_local(async move {
            match api::update_user(dto).await {
                Ok(_) => on_saved.run(()),
                Err(e) => {
                    set_error.set(Some(format!("Ошибка сохранения: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{format!("Редактирование: {}", username_display)}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </div>

                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="modal-body">
                    <label class="form-field">
                        {"ФИО"}
                        <input
                            type="text"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        {"Email"}
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field form-field--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || is_admin.get()
                            on:change=move |ev| is_admin.set(event_target_checked(&ev))
                        />
                        {"Администратор"}
                    </label>
                    <label class="form-field form-field--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || is_active.get()
                            on:change=move |ev| is_active.set(event_target_checked(&ev))
                        />
                        {"Активен"}
                    </label>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {"Отмена"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
