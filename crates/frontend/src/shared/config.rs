//! Настройки приложения, задаются один раз при монтировании.

use crate::shared::collection::ErrorPolicy;

/// Порт бэкенда, если адрес API не задан при сборке
const BACKEND_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Базовый адрес REST API, без завершающего `/`
    pub api_base: String,
    pub request_timeout_ms: u32,
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub search_debounce_ms: u32,
    pub error_policy: ErrorPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            request_timeout_ms: 15_000,
            default_page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            search_debounce_ms: 300,
            error_policy: ErrorPolicy::RetainStale,
        }
    }
}

impl AppConfig {
    /// `INVENTORY_API_BASE` at build time wins; otherwise the backend is
    /// assumed on port 3000 of the page's host.
    pub fn from_env() -> Self {
        let api_base = match option_env!("INVENTORY_API_BASE") {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => location_api_base(),
        };
        Self {
            api_base,
            ..Self::default()
        }
    }
}

fn location_api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}
