use contracts::system::users::{User, UserRole};
use leptos::prelude::*;

use crate::shared::collection::page::collection_page;
use crate::shared::collection::view::{badge_class, BadgeTone};
use crate::shared::collection::{Column, FilterSpec, ListView, SortSpec};
use crate::shared::date_utils::format_datetime;
use crate::shared::page_frame::PAGE_CAT_SYSTEM;

fn role_options() -> Vec<(String, String)> {
    UserRole::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect()
}

fn active_options() -> Vec<(String, String)> {
    vec![
        ("true".to_string(), "Активен".to_string()),
        ("false".to_string(), "Заблокирован".to_string()),
    ]
}

fn active_badge(user: &User) -> &'static str {
    badge_class(if user.is_active {
        BadgeTone::Success
    } else {
        BadgeTone::Neutral
    })
}

impl ListView for User {
    const TITLE: &'static str = "Пользователи";
    const PAGE_ID: &'static str = "sys_users--list";
    const PAGE_CATEGORY: &'static str = PAGE_CAT_SYSTEM;
    const SEARCH_PLACEHOLDER: &'static str = "Логин, имя, email...";
    const CREATE_TITLE: &'static str = "Новый пользователь";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Логин", |u: &User| u.username.clone()).sortable("username"),
            Column::new("ФИО", |u: &User| u.full_name.clone().unwrap_or_default()).sortable("fullName"),
            Column::new("Email", |u: &User| u.email.clone().unwrap_or_default()).sortable("email"),
            Column::new("Роль", |u: &User| u.role.label().to_string()).sortable("role"),
            Column::new("Статус", |u: &User| {
                if u.is_active { "Активен" } else { "Заблокирован" }.to_string()
            })
            .sortable("isActive")
            .badge(active_badge),
            Column::new("Последний вход", |u: &User| {
                u.last_login_at
                    .as_deref()
                    .map(format_datetime)
                    .unwrap_or_else(|| "—".into())
            })
            .sortable("lastLoginAt"),
        ]
    }

    fn filters() -> Vec<FilterSpec> {
        vec![
            FilterSpec::fixed("role", "Роль", role_options),
            FilterSpec::fixed("isActive", "Статус", active_options),
        ]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("username"))
    }

    fn edit_title(&self) -> String {
        format!("Пользователь {}", self.username)
    }
}

#[component]
pub fn UsersList() -> impl IntoView {
    collection_page::<User>()
}
