use leptos::prelude::*;

use super::context::use_auth;

/// Показывает содержимое только администраторам
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || {
                auth_state
                    .get()
                    .user_info
                    .map(|u| u.is_admin)
                    .unwrap_or(false)
            }
            fallback=|| view! {
                <div class="alert alert--error">
                    {"Раздел доступен только администраторам"}
                </div>
            }
        >
            {children()}
        </Show>
    }
}
