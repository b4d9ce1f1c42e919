//! Provider validation helpers.
//!
//! Shared API validation logic used by the `config validate` command.

use reqwest::Client;
use serde::Serialize;

use crate::error::{RefineError, Result};

/// Validates that the API key is non-empty.
pub fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.is_empty() {
        return Err(RefineError::Config("API key is empty".to_string()));
    }
    Ok(())
}

/// Sends a minimal test request to verify the API endpoint.
///
/// Checks in one shot:
/// - network connectivity
/// - API key validity
/// - endpoint configuration
///
/// Callers should keep `test_request` as cheap as possible (`max_tokens=1`).
pub async fn validate_http_endpoint<T: Serialize>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    test_request: &T,
    provider_name: &str,
) -> Result<()> {
    tracing::debug!("Validating {} API connection...", provider_name);

    let mut request_builder = client
        .post(endpoint)
        .header("Content-Type", "application/json");

    for (key, value) in headers {
        request_builder = request_builder.header(*key, *value);
    }

    let response = request_builder
        .json(test_request)
        .send()
        .await
        .map_err(RefineError::Network)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RefineError::LlmApi {
            status: status.as_u16(),
            message: format!("{} validation failed: {}", provider_name, body),
        });
    }

    tracing::debug!("{} API connection validated successfully", provider_name);
    Ok(())
}
