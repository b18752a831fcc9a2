use thiserror::Error;

/// Ошибка обращения к серверу.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Сетевая ошибка: {0}")]
    Network(String),

    #[error("Сервер не ответил вовремя")]
    Timeout,

    /// Запрос отменён при закрытии страницы; пользователю не показывается
    #[error("Запрос отменён")]
    Aborted,

    #[error("Сессия истекла, войдите заново")]
    Unauthorized,

    #[error("Ошибка сервера (HTTP {status})")]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),

    #[error("Дождитесь завершения предыдущей операции")]
    Busy,

    #[error("Не удалось загрузить справочники: {}", .0.join(", "))]
    Lookups(Vec<String>),
}

impl ApiError {
    /// Текст для пользователя: сообщение сервера как есть, если оно было.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Server { status: 404, .. } => {
                "Запись не найдена: возможно, она уже удалена".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, ApiError::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_verbatim() {
        let err = ApiError::Server {
            status: 422,
            message: Some("Weight exceeds warehouse capacity".into()),
        };
        assert_eq!(err.user_message(), "Weight exceeds warehouse capacity");
    }

    #[test]
    fn test_generic_message_without_body() {
        let err = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), "Ошибка сервера (HTTP 500)");
    }

    #[test]
    fn test_lookup_aggregate_message() {
        let err = ApiError::Lookups(vec!["Склады".into(), "Водители".into()]);
        assert_eq!(
            err.user_message(),
            "Не удалось загрузить справочники: Склады, Водители"
        );
    }
}
