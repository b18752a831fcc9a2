//! Токены и профиль текущего пользователя в localStorage.

use contracts::system::auth::UserInfo;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "inventory_access_token";
const REFRESH_TOKEN_KEY: &str = "inventory_refresh_token";
const USER_KEY: &str = "inventory_user";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

fn write(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage: failed to write '{}'", key);
        }
    }
}

pub fn get_access_token() -> Option<String> {
    read(ACCESS_TOKEN_KEY)
}

pub fn get_refresh_token() -> Option<String> {
    read(REFRESH_TOKEN_KEY)
}

/// Refresh-токен меняется, только если сервер прислал новый
pub fn save_tokens(access_token: &str, refresh_token: Option<&str>) {
    write(ACCESS_TOKEN_KEY, access_token);
    if let Some(refresh_token) = refresh_token {
        write(REFRESH_TOKEN_KEY, refresh_token);
    }
}

pub fn save_user(user: &UserInfo) {
    match serde_json::to_string(user) {
        Ok(json) => write(USER_KEY, &json),
        Err(e) => log::warn!("failed to serialize user info: {}", e),
    }
}

/// Профиль, сохранённый при входе; испорченная запись игнорируется
pub fn get_user() -> Option<UserInfo> {
    let json = read(USER_KEY)?;
    serde_json::from_str(&json).ok()
}

/// Clear all authentication data
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            let _ = storage.remove_item(key);
        }
    }
}
