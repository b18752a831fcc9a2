use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;

/// Содержимое только для вошедших; иначе переход на страницу входа
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.with(|s| s.is_authenticated())
            fallback=|| view! { <Redirect path="/login"/> }
        >
            {children()}
        </Show>
    }
}
