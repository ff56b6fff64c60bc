use leptos::prelude::*;

use super::global_context::{AppGlobalContext, Section};
use super::sidebar::Sidebar;
use crate::domain::a001_post::ui::list::PostList;
use crate::domain::a002_category::ui::list::CategoryList;
use crate::domain::a003_comment::ui::list::CommentList;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::auth::{api as auth_api, storage};
use crate::system::users::ui::list::UsersListPage;
use leptos::task::spawn_local;

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    // Восстановление активного раздела из URL — один раз при монтировании
    ctx.init_router_integration();

    let username = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.username)
            .unwrap_or_default()
    };

    let logout = move |_| {
        spawn_local(async move {
            if let Some(refresh_token) = storage::get_refresh_token() {
                let _ = auth_api::logout(&refresh_token).await;
            }
            storage::clear_tokens();
            set_auth_state.set(Default::default());
        });
    };

    view! {
        <div class="shell">
            <Sidebar />
            <div class="shell__main">
                <header class="shell__header">
                    <span class="shell__section-title">
                        {move || ctx.active.get().title()}
                    </span>
                    <div class="shell__user">
                        <span>{username}</span>
                        <button class="btn btn-secondary" on:click=logout title="Выйти">
                            {icon("logout")}
                        </button>
                    </div>
                </header>
                <main class="shell__content">
                    {move || match ctx.active.get() {
                        Section::Posts => view! { <PostList /> }.into_any(),
                        Section::Categories => view! { <CategoryList /> }.into_any(),
                        Section::Comments => view! { <CommentList /> }.into_any(),
                        Section::Users => view! { <UsersListPage /> }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}
