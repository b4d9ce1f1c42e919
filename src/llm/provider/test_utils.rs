//! Test utilities for provider tests.
//!
//! Common test configuration builders shared across provider test suites.

use crate::config::{NetworkConfig, ProviderConfig};
use std::collections::HashMap;

/// Creates a `NetworkConfig` with max_retries set to 0 (no retry).
///
/// Useful for testing API error responses without waiting for retries.
pub fn test_network_config_no_retry() -> NetworkConfig {
    NetworkConfig {
        max_retries: 0,
        ..Default::default()
    }
}

/// Creates a `ProviderConfig` for testing.
///
/// # Parameters
/// - `base_url` - mock server URL (e.g. from `mockito::Server`)
/// - `api_key` - optional API key
/// - `model` - model name
pub fn test_provider_config(
    base_url: String,
    api_key: Option<String>,
    model: String,
) -> ProviderConfig {
    ProviderConfig {
        api_style: None,
        endpoint: Some(base_url),
        api_key,
        model,
        max_tokens: None,
        temperature: None,
        extra: HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_config_no_retry_has_zero_retries() {
        let config = test_network_config_no_retry();
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_provider_config_builder() {
        let config = test_provider_config(
            "http://test.com".to_string(),
            Some("sk-test".to_string()),
            "test-model".to_string(),
        );

        assert_eq!(config.endpoint, Some("http://test.com".to_string()));
        assert_eq!(config.api_key, Some("sk-test".to_string()));
        assert_eq!(config.model, "test-model");
    }
}
