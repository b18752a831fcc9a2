use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use crate::shared::collection::CollectionEntity;
use crate::shared::list_utils::{Searchable, SortValue, Sortable};

impl CollectionEntity for User {
    const PATH: &'static str = "/users";
    const SOFT_DELETE: bool = true;

    type Create = CreateUserDto;
    type Update = UpdateUserDto;

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.full_name.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.role.label().to_string(),
        ]
    }
}

impl Sortable for User {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "username" => SortValue::text(&self.username),
            "fullName" => SortValue::opt_text(self.full_name.as_deref()),
            "email" => SortValue::opt_text(self.email.as_deref()),
            "role" => SortValue::text(self.role.label()),
            "isActive" => SortValue::Number(if self.is_active { 1.0 } else { 0.0 }),
            "createdAt" => SortValue::text(&self.created_at),
            "lastLoginAt" => SortValue::opt_text(self.last_login_at.as_deref()),
            _ => SortValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cmp::Ordering;

    fn user(username: &str, last_login: Option<&str>) -> User {
        serde_json::from_value(json!({
            "id": 1, "username": username, "role": "operator", "isActive": true,
            "createdAt": "2024-01-01T00:00:00Z", "lastLoginAt": last_login
        }))
        .unwrap()
    }

    #[test]
    fn test_never_logged_in_sorts_first() {
        let never = user("bob", None);
        let seen = user("alice", Some("2024-05-01T12:00:00Z"));
        assert_eq!(never.compare_by_field(&seen, "lastLoginAt"), Ordering::Less);
        assert!(never.matches_filter("оператор"));
    }
}
