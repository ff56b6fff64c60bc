use contracts::domain::a002_category::aggregate::{Category, CategoryDto};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_category::api;
use crate::shared::icons::icon;

/// Модальная форма создания/редактирования рубрики
#[component]
pub fn CategoryDetails(
    /// None — новая рубрика
    id: Option<i64>,
    #[prop(into)] categories: Signal<Vec<Category>>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let slug = RwSignal::new(String::new());
    let parent_ref = RwSignal::new(String::new());
    let color = RwSignal::new(String::new());
    let position = RwSignal::new("0".to_string());
    let comment = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    // Для редактирования берём данные из уже загруженного списка
    if let Some(id) = id {
        if let Some(c) = categories
            .get_untracked()
            .into_iter()
            .find(|c| c.base.id.value() == id)
        {
            title.set(c.base.title);
            slug.set(c.base.slug);
            parent_ref.set(
                c.parent_ref
                    .map(|p| p.value().to_string())
                    .unwrap_or_default(),
            );
            color.set(c.color.unwrap_or_default());
            position.set(c.position.to_string());
            comment.set(c.base.comment.unwrap_or_default());
        }
    }

    let on_save = move |_| {
        if title.get_untracked().trim().is_empty() {
            set_error.set(Some("Название не может быть пустым".into()));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let dto = CategoryDto {
            id,
            slug: Some(slug.get_untracked()).filter(|s| !s.trim().is_empty()),
            title: title.get_untracked(),
            parent_ref: parent_ref.get_untracked().parse::<i64>().ok(),
            color: Some(color.get_untracked()).filter(|c| !c.trim().is_empty()),
            position: position.get_untracked().parse::<i32>().ok(),
            comment: Some(comment.get_untracked()).filter(|c| !c.trim().is_empty()),
        };

        spawn_local(async move {
            match api::upsert_category(dto).await {
                Ok(_) => on_saved.run(()),
                Err(e) => {
                    set_error.set(Some(format!("Ошибка сохранения: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_cancel.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">
                        {if id.is_some() { "Редактирование рубрики" } else { "Новая рубрика" }}
                    </h2>
                    <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                        {icon("x")}
                    </button>
                </div>

                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="modal-body">
                    <label class="form-field">
                        {"Название"}
                        <input
                            type="text"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        {"Slug (пусто — из названия)"}
                        <input
                            type="text"
                            prop:value=move || slug.get()
                            on:input=move |ev| slug.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        {"Родительская рубрика"}
                        <select
                            prop:value=move || parent_ref.get()
                            on:change=move |ev| parent_ref.set(event_target_value(&ev))
                        >
                            <option value="">{"Нет"}</option>
                            {move || categories.get().into_iter()
                                .filter(|c| Some(c.base.id.value()) != id)
                                .map(|c| {
                                    let value = c.base.id.value().to_string();
                                    view! {
                                        <option value={value}>{c.base.title.clone()}</option>
                                    }
                                }).collect_view()}
                        </select>
                    </label>
                    <label class="form-field">
                        {"Цвет (#rrggbb)"}
                        <input
                            type="text"
                            prop:value=move || color.get()
                            on:input=move |ev| color.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        {"Порядок в меню"}
                        <input
                            type="number"
                            prop:value=move || position.get()
                            on:input=move |ev| position.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="form-field">
                        {"Служебный комментарий"}
                        <input
                            type="text"
                            prop:value=move || comment.get()
                            on:input=move |ev| comment.set(event_target_value(&ev))
                        />
                    </label>
                </div>

                <div class="modal-footer">
                    <button
                        class="btn btn-primary"
                        on:click=on_save
                        disabled=move || saving.get()
                    >
                        {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                    </button>
                    <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                        {"Отмена"}
                    </button>
                </div>
            </div>
        </div>
    }
}
