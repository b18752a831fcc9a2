//! Application Shell - auth gate вокруг основного layout
//!
//! Вложенные маршруты рендерятся в `<Outlet/>` внутри `Shell`.

use leptos::prelude::*;
use leptos_router::components::Outlet;

use crate::layout::Shell;
use crate::system::auth::RequireAuth;

#[component]
pub fn AppShell() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <Outlet />
            </Shell>
        </RequireAuth>
    }
}
