pub mod base;
pub mod gemini;
pub mod openai;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::Client;

use crate::config::{ApiStyle, AppConfig, NetworkConfig, ProviderConfig};
use crate::error::{RefineError, Result};
use crate::llm::LLMProvider;

/// Process-wide HTTP client (shared connection pool).
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Error message from a failed first-time client build.
///
/// Remembered so later calls fail fast instead of rebuilding.
static HTTP_CLIENT_ERROR: OnceLock<String> = OnceLock::new();

/// Gets or creates the shared HTTP client.
///
/// The first caller's `NetworkConfig` decides the timeout settings.
pub(crate) fn create_http_client(network_config: &NetworkConfig) -> Result<Client> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }

    if let Some(err_msg) = HTTP_CLIENT_ERROR.get() {
        return Err(RefineError::Llm(format!(
            "HTTP client initialization previously failed: {}",
            err_msg
        )));
    }

    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    match Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(network_config.request_timeout))
        .connect_timeout(Duration::from_secs(network_config.connect_timeout))
        .build()
    {
        Ok(client) => {
            let _ = HTTP_CLIENT.set(client.clone());
            Ok(client)
        }
        Err(e) => {
            let err_msg = e.to_string();
            let _ = HTTP_CLIENT_ERROR.set(err_msg.clone());
            Err(RefineError::Llm(format!(
                "Failed to create HTTP client: {}",
                err_msg
            )))
        }
    }
}

/// Creates the LLM provider selected by configuration.
///
/// `provider_name` overrides `llm.default_provider` when given
/// (the `--provider` flag).
pub fn create_provider(
    config: &AppConfig,
    provider_name: Option<&str>,
) -> Result<Arc<dyn LLMProvider>> {
    let name = provider_name.unwrap_or(&config.llm.default_provider);

    let provider_config = config.llm.providers.get(name).ok_or_else(|| {
        RefineError::Config(format!("Provider '{}' not found in config", name))
    })?;

    create_provider_from_config(provider_config, name, &config.network)
}

/// Creates a concrete provider implementation from its configuration.
fn create_provider_from_config(
    provider_config: &ProviderConfig,
    name: &str,
    network_config: &NetworkConfig,
) -> Result<Arc<dyn LLMProvider>> {
    // Prefer the explicit api_style field; fall back to the provider name.
    let api_style = match provider_config.api_style {
        Some(style) => style,
        None => name.parse::<ApiStyle>().map_err(|_| {
            RefineError::Config(format!(
                "Provider '{}' has no api_style and its name matches no built-in style",
                name
            ))
        })?,
    };

    match api_style {
        ApiStyle::Gemini => {
            let provider = gemini::GeminiProvider::new(provider_config, name, network_config)?;
            Ok(Arc::new(provider))
        }
        ApiStyle::OpenAI => {
            let provider = openai::OpenAIProvider::new(provider_config, name, network_config)?;
            Ok(Arc::new(provider))
        }
    }
}
