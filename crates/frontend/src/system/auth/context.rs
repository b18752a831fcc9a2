use std::rc::Rc;

use contracts::system::auth::UserInfo;
use leptos::prelude::*;

use crate::shared::config::AppConfig;
use crate::shared::http::{provide_api_client, ApiClient, ApiError};
use crate::shared::notifications::{use_toasts, Notifier, ToastKind};

use super::session::BrowserSession;
use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    /// Сессия из localStorage, сохранённая при прошлом входе
    pub fn restore() -> Self {
        match storage::get_access_token() {
            Some(token) => Self {
                access_token: Some(token),
                user_info: storage::get_user(),
            },
            None => Self::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn display_name(&self) -> String {
        self.user_info
            .as_ref()
            .map(|u| u.full_name.clone().unwrap_or_else(|| u.username.clone()))
            .unwrap_or_default()
    }
}

/// Auth context provider: состояние входа и API-клиент с сессией браузера
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let auth = RwSignal::new(AuthState::restore());
    let toasts = use_toasts();

    let session = BrowserSession::new(&config.api_base, auth, move || {
        toasts.notify(ToastKind::Info, "Сессия истекла, войдите заново");
    });
    provide_api_client(ApiClient::new(
        config.api_base.clone(),
        Rc::new(session),
        config.request_timeout_ms,
    ));
    provide_context(auth);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().unwrap_or_else(|| {
        log::error!("AuthProvider not found in component tree");
        RwSignal::new(AuthState::default())
    })
}

/// Helper: Perform login
pub async fn do_login(
    client: &ApiClient,
    auth: RwSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), ApiError> {
    let response = api::login(client, username, password).await?;
    storage::save_tokens(&response.access_token, Some(&response.refresh_token));
    storage::save_user(&response.user);
    log::info!("logged in as {}", response.user.username);
    auth.try_set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
    Ok(())
}

/// Helper: Perform logout
pub async fn do_logout(client: &ApiClient, auth: RwSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        api::logout(client, refresh_token).await;
    }
    storage::clear_tokens();
    auth.try_set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::UserRole;

    #[test]
    fn test_display_name_prefers_full_name() {
        let mut state = AuthState {
            access_token: Some("t".into()),
            user_info: Some(UserInfo {
                id: 1,
                username: "admin".into(),
                full_name: None,
                role: UserRole::Admin,
            }),
        };
        assert!(state.is_authenticated());
        assert_eq!(state.display_name(), "admin");
        if let Some(user) = state.user_info.as_mut() {
            user.full_name = Some("Иван Петров".into());
        }
        assert_eq!(state.display_name(), "Иван Петров");
        assert!(!AuthState::default().is_authenticated());
    }
}
