use contracts::domain::a001_post::aggregate::{PostDto, PostKind};
use contracts::domain::a002_category::aggregate::Category;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_post::api;
use crate::shared::icons::icon;

/// Модальная форма создания/редактирования записи
#[component]
pub fn PostDetails(
    /// None — новая запись
    id: Option<i64>,
    #[prop(into)] categories: Signal<Vec<Category>>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let slug = RwSignal::new(String::new());
    let excerpt = RwSignal::new(String::new());
    let body_md = RwSignal::new(String::new());
    let category_ref = RwSignal::new(String::new());
    let kind = RwSignal::new("article".to_string());
    let is_featured = RwSignal::new(false);
    let comment = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let (loaded, set_loaded) = signal(id.is_none());

    // Для редактирования подтягиваем запись с сервера
    if let Some(id) = id {
        spawn_local(async move {
            match api::fetch_post(id).await {
                Ok(p) => {
                    title.set(p.base.title);
                    slug.set(p.base.slug);
                    excerpt.set(p.excerpt.unwrap_or_default());
                    body_md.set(p.body_md);
                    category_ref.set(
                        p.category_ref
                            .map(|c| c.value().to_string())
                            .unwrap_or_default(),
                    );
                    kind.set(p.kind.code().to_string());
                    is_featured.set(p.is_featured);
                    comment.set(p.base.comment.unwrap_or_default());
                    set_loaded.set(true);
                }
                Err(e) => set_error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    }

    let on_save = move |_| {
        if title.get_untracked().trim().is_empty() {
            set_error.set(Some("Заголовок не может быть пустым".into()));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let dto = PostDto {
            id,
            slug: Some(slug.get_untracked()).filter(|s| !s.trim().is_empty()),
            title: title.get_untracked(),
            body_md: body_md.get_untracked(),
            excerpt: Some(excerpt.get_untracked()).filter(|e| !e.trim().is_empty()),
            category_ref: category_ref.get_untracked().parse::<i64>().ok(),
            kind: Some(PostKind::from_code(&kind.get_untracked())),
            is_featured: Some(is_featured.get_untracked()),
            comment: Some(comment.get_untracked()).filter(|c| !c.trim().is_empty()),
        };

        spawn_local(async move {
            match api::upsert_post(dto).await {
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
                        {if id.is_some() { "Редактирование записи" } else { "Новая запись" }}
                    </h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_cancel.run(())>
                        {icon("x")}
                    </Button>
                </div>

                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <Show when=move || loaded.get() fallback=|| view! { <div>{"Загрузка..."}</div> }>
                    <div class="modal-body">
                        <label class="form-field">
                            {"Заголовок"}
                            <input
                                type="text"
                                prop:value=move || title.get()
                                on:input=move |ev| title.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="form-field">
                            {"Slug (пусто — из заголовка)"}
                            <input
                                type="text"
                                prop:value=move || slug.get()
                                on:input=move |ev| slug.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="form-field">
                            {"Рубрика"}
                            <select
                                prop:value=move || category_ref.get()
                                on:change=move |ev| category_ref.set(event_target_value(&ev))
                            >
                                <option value="">{"Без рубрики"}</option>
                                {move || categories.get().into_iter().map(|c| {
                                    let value = c.base.id.value().to_string();
                                    view! {
                                        <option value={value}>{c.base.title.clone()}</option>
                                    }
                                }).collect_view()}
                            </select>
                        </label>
                        <label class="form-field">
                            {"Тип"}
                            <select
                                prop:value=move || kind.get()
                                on:change=move |ev| kind.set(event_target_value(&ev))
                            >
                                <option value="article">{"Статья"}</option>
                                <option value="news">{"Новость"}</option>
                            </select>
                        </label>
                        <label class="form-field form-field--inline">
                            <input
                                type="checkbox"
                                prop:checked=move || is_featured.get()
                                on:change=move |ev| is_featured.set(event_target_checked(&ev))
                            />
                            {"В подборке на главной"}
                        </label>
                        <label class="form-field">
                            {"Анонс"}
                            <textarea
                                rows=2
                                prop:value=move || excerpt.get()
                                on:input=move |ev| excerpt.set(event_target_value(&ev))
                            ></textarea>
                        </label>
                        <label class="form-field">
                            {"Текст (markdown)"}
                            <textarea
                                rows=12
                                prop:value=move || body_md.get()
                                on:input=move |ev| body_md.set(event_target_value(&ev))
                            ></textarea>
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
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=on_save
                            disabled=Signal::derive(move || saving.get())
                        >
                            {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                            {"Отмена"}
                        </Button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
