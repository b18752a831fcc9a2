//! TopHeader component - application top navigation bar.

use crate::shared::http::use_api_context;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader(left_open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let api = use_api_context();

    let logout = move |_| {
        let Some(client) = api.and_then(|ctx| ctx.client()) else {
            return;
        };
        spawn_local(async move {
            do_logout(&client, auth).await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| left_open.update(|open| *open = !*open)
                    title=move || if left_open.get() { "Скрыть навигацию" } else { "Показать навигацию" }
                >
                    {move || if left_open.get() { icon("chevrons-left") } else { icon("chevrons-right") }}
                </button>
                <span class="top-header__title">"Склад и производство"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("users")}
                    <span>
                        {move || {
                            let name = auth.with(|s| s.display_name());
                            if name.is_empty() { "Гость".to_string() } else { name }
                        }}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Выход">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
