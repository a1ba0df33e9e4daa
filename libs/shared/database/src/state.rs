use shared_config::AppConfig;

use crate::postgrest::PostgrestClient;

/// Process-wide application state. Built once in `main`, wrapped in an
/// `Arc`, and handed to every router; nothing reads configuration or
/// reaches the store through globals.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: PostgrestClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = PostgrestClient::new(&config);
        Self { config, store }
    }
}
