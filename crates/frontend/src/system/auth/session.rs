//! Сессия браузера: токены из localStorage, обновление через `/auth/refresh-token`.

use std::rc::Rc;

use async_trait::async_trait;
use contracts::shared::envelope::RecordEnvelope;
use contracts::system::auth::{RefreshRequest, RefreshResponse};
use gloo_net::http::Request;
use leptos::prelude::*;

use crate::shared::http::client::error_from_status;
use crate::shared::http::{ApiError, Session};

use super::context::AuthState;
use super::storage;

pub const REFRESH_PATH: &str = "/auth/refresh-token";

#[derive(Clone)]
pub struct BrowserSession {
    api_base: Rc<str>,
    auth: RwSignal<AuthState>,
    on_expired: Rc<dyn Fn()>,
}

impl BrowserSession {
    pub fn new(api_base: &str, auth: RwSignal<AuthState>, on_expired: impl Fn() + 'static) -> Self {
        Self {
            api_base: Rc::from(api_base.trim_end_matches('/')),
            auth,
            on_expired: Rc::new(on_expired),
        }
    }
}

#[async_trait(?Send)]
impl Session for BrowserSession {
    fn token(&self) -> Option<String> {
        storage::get_access_token()
    }

    async fn refresh_token(&self) -> Result<String, ApiError> {
        let refresh_token = storage::get_refresh_token().ok_or(ApiError::Unauthorized)?;
        let url = format!("{}{}", self.api_base, REFRESH_PATH);

        let response = Request::post(&url)
            .json(&RefreshRequest { refresh_token })
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let refreshed = read_refresh_response(status, &body)?;

        storage::save_tokens(&refreshed.access_token, refreshed.refresh_token.as_deref());
        self.auth.try_update(|state| {
            state.access_token = Some(refreshed.access_token.clone());
        });
        log::info!("access token refreshed");
        Ok(refreshed.access_token)
    }

    fn clear(&self) {
        log::info!("session cleared");
        storage::clear_tokens();
        self.auth.try_set(AuthState::default());
        (self.on_expired)();
    }
}

/// Разбор ответа на обновление токена (обёрнутого или голого)
fn read_refresh_response(status: u16, body: &str) -> Result<RefreshResponse, ApiError> {
    if !(200..300).contains(&status) {
        return Err(error_from_status(status, body));
    }
    serde_json::from_str::<RecordEnvelope<RefreshResponse>>(body)
        .map(RecordEnvelope::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_response_wrapped_and_bare() {
        let wrapped = read_refresh_response(200, r#"{"data":{"accessToken":"a1","refreshToken":"r1"}}"#).unwrap();
        assert_eq!(wrapped.access_token, "a1");
        assert_eq!(wrapped.refresh_token.as_deref(), Some("r1"));

        let bare = read_refresh_response(200, r#"{"accessToken":"a2"}"#).unwrap();
        assert_eq!(bare.access_token, "a2");
        assert_eq!(bare.refresh_token, None);
    }

    #[test]
    fn test_rejected_refresh_is_unauthorized() {
        assert!(matches!(
            read_refresh_response(401, ""),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            read_refresh_response(500, "oops"),
            Err(ApiError::Server { status: 500, .. })
        ));
    }
}
