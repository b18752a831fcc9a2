use async_trait::async_trait;

use super::ApiError;

/// Источник токена для запросов.
///
/// Страницы не читают localStorage напрямую: клиент получает сессию через
/// контекст приложения и обращается только к этому интерфейсу.
#[async_trait(?Send)]
pub trait Session {
    /// Текущий access-токен, если пользователь вошёл
    fn token(&self) -> Option<String>;

    /// Обновляет access-токен и возвращает новый
    async fn refresh_token(&self) -> Result<String, ApiError>;

    /// Забывает токены и передаёт управление на экран входа
    fn clear(&self);
}
