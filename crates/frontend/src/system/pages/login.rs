use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::shared::http::use_api_context;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let auth = use_auth();
    let api = use_api_context();
    let navigate = use_navigate();

    // Уже вошли: сразу на главную
    Effect::new(move |_| {
        if auth.with(|s| s.is_authenticated()) {
            navigate("/", Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        let Some(client) = api.and_then(|ctx| ctx.client()) else {
            error_message.set(Some("API недоступен".to_string()));
            return;
        };

        let username_val = username.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            let result = do_login(&client, auth, username_val, password_val).await;
            is_loading.try_set(false);
            if let Err(e) = result {
                log::warn!("login failed: {}", e);
                error_message.try_set(Some(e.user_message()));
            }
        });
    };

    view! {
        <PageFrame page_id="sys_login" category=PAGE_CAT_SYSTEM class="login-container">
            <div class="login-box">
                <h1>"Склад и производство"</h1>
                <h2>"Вход в систему"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Логин"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Пароль"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Вход..." } else { "Войти" }}
                    </button>
                </form>
            </div>
        </PageFrame>
    }
}
