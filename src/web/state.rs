//! Application state for the axum server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::LLMProvider;

/// Shared application state for all handlers.
///
/// The provider is constructed once at startup and shared across requests;
/// configuration is immutable for the lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn LLMProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(provider: Arc<dyn LLMProvider>, config: AppConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }
}
