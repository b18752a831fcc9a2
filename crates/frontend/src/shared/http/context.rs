use leptos::prelude::*;

use super::ApiClient;

/// Клиент API в контексте приложения.
///
/// `ApiClient` держит `Rc`, поэтому хранится в локальном `StoredValue`.
#[derive(Clone, Copy)]
pub struct ApiContext(StoredValue<ApiClient, LocalStorage>);

impl ApiContext {
    pub fn new(client: ApiClient) -> Self {
        Self(StoredValue::new_local(client))
    }

    pub fn client(&self) -> Option<ApiClient> {
        self.0.try_get_value()
    }
}

pub fn provide_api_client(client: ApiClient) {
    provide_context(ApiContext::new(client));
}

pub fn use_api_client() -> Option<ApiClient> {
    use_context::<ApiContext>().and_then(|ctx| ctx.client())
}

/// Для обработчиков событий: сам контекст `Copy`, клиент берётся в момент вызова
pub fn use_api_context() -> Option<ApiContext> {
    use_context::<ApiContext>()
}
