use crate::shared::icons;
use leptos::prelude::*;
use leptos_router::components::A;

/// Разделы приложения: (маршрут, иконка, заголовок)
pub const SECTIONS: [(&str, &str, &str); 6] = [
    ("/purchases", "purchases", "Закупки"),
    ("/deliveries", "deliveries", "Доставки"),
    ("/disposals", "disposals", "Утилизация"),
    ("/productions", "productions", "Производство"),
    ("/stock-movements", "stock-movements", "Движение товаров"),
    ("/users", "users", "Пользователи"),
];

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav class="main-nav-bar">
            <ul>
                {SECTIONS
                    .into_iter()
                    .map(|(href, icon, title)| {
                        view! {
                            <li>
                                <A href=href>
                                    {icons::icon(icon)}
                                    <span>{title}</span>
                                </A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
