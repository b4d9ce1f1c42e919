//! Provider configuration extraction helpers.

use crate::config::ProviderConfig;
use crate::error::{RefineError, Result};

/// Default temperature
const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Extracts the API key from provider configuration.
///
/// By this point credential fallbacks from the environment have already been
/// merged in by the config loader; a missing key is a hard error.
pub fn extract_api_key(config: &ProviderConfig, provider_name: &str) -> Result<String> {
    config.api_key.clone().ok_or_else(|| {
        RefineError::Config(format!(
            "API key not found for {} provider",
            provider_name
        ))
    })
}

/// Extracts a u32 value from the extra configuration map.
pub fn extract_extra_u32(config: &ProviderConfig, key: &str) -> Option<u32> {
    config
        .extra
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v as u32)
}

/// Extracts an f32 value from the extra configuration map.
pub fn extract_extra_f32(config: &ProviderConfig, key: &str) -> Option<f32> {
    config
        .extra
        .get(key)
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
}

/// Gets max_tokens from configuration (explicit field first, then extra).
pub fn get_max_tokens_optional(config: &ProviderConfig) -> Option<u32> {
    config
        .max_tokens
        .or_else(|| extract_extra_u32(config, "max_tokens"))
}

/// Gets temperature from configuration (explicit field first, fallback to
/// extra, lastly the default).
pub fn get_temperature(config: &ProviderConfig) -> f32 {
    config
        .temperature
        .or_else(|| extract_extra_f32(config, "temperature"))
        .unwrap_or(DEFAULT_TEMPERATURE)
}
