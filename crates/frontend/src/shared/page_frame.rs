//! PageFrame — корневая обёртка каждой страницы.
//!
//! Корневой элемент получает `id` вида `"{entity}--{category}"`
//! (напр. `"a001_purchase--list"`) и `data-page-category`.

use leptos::prelude::*;

/// Страница списка сущности
pub const PAGE_CAT_LIST: &str = "list";
/// Служебная страница (вход, пользователи)
pub const PAGE_CAT_SYSTEM: &str = "system";

#[component]
pub fn PageFrame(
    page_id: &'static str,
    /// PAGE_CAT_LIST или PAGE_CAT_SYSTEM
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let full_class = match (category, class.is_empty()) {
        (PAGE_CAT_SYSTEM, true) => "page page--system".to_string(),
        (PAGE_CAT_SYSTEM, false) => format!("page page--system {class}"),
        (_, true) => "page".to_string(),
        (_, false) => format!("page {class}"),
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
