use contracts::system::auth::{LoginRequest, LoginResponse, RefreshRequest};
use serde_json::Value;

use crate::shared::http::{ApiClient, ApiError};

const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";

/// Вход по логину и паролю. 401 здесь значит неверные данные, а не истёкшую сессию.
pub async fn login(client: &ApiClient, username: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };
    client
        .post_public(LOGIN_PATH, &request)
        .await
        .map_err(login_error)
}

fn login_error(error: ApiError) -> ApiError {
    match error {
        ApiError::Unauthorized => ApiError::Server {
            status: 401,
            message: Some("Неверный логин или пароль".to_string()),
        },
        other => other,
    }
}

/// Logout (revoke refresh token). Best effort: local tokens are dropped anyway.
pub async fn logout(client: &ApiClient, refresh_token: String) {
    let request = RefreshRequest { refresh_token };
    if let Err(e) = client.post_public::<_, Value>(LOGOUT_PATH, &request).await {
        log::debug!("logout request failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_unauthorized_reads_as_bad_credentials() {
        assert_eq!(
            login_error(ApiError::Unauthorized).user_message(),
            "Неверный логин или пароль"
        );
        assert_eq!(login_error(ApiError::Timeout), ApiError::Timeout);
    }
}
