use leptos::prelude::*;

use super::global_context::{AppGlobalContext, Section};
use crate::shared::icons::icon;

const SECTIONS: &[(Section, &str)] = &[
    (Section::Posts, "posts"),
    (Section::Categories, "categories"),
    (Section::Comments, "comments"),
    (Section::Users, "users"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <nav class="sidebar">
            <div class="sidebar__logo">{"Блог-админка"}</div>
            {SECTIONS
                .iter()
                .map(|&(section, icon_name)| {
                    view! {
                        <button
                            class=move || {
                                if ctx.active.get() == section {
                                    "sidebar__item sidebar__item--active"
                                } else {
                                    "sidebar__item"
                                }
                            }
                            on:click=move |_| ctx.activate(section)
                        >
                            {icon(icon_name)}
                            <span>{section.title()}</span>
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
