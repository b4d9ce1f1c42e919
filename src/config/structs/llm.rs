//! LLM provider configuration structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// LLM API backend type.
///
/// Determines which provider implementation to instantiate.
/// If [`ProviderConfig::api_style`] is `None`, the style is inferred from the provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    /// Google Gemini API.
    Gemini,
    /// OpenAI API (and OpenAI-compatible APIs).
    #[serde(rename = "openai")]
    OpenAI,
}

impl std::fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStyle::Gemini => write!(f, "gemini"),
            ApiStyle::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for ApiStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ApiStyle::Gemini),
            "openai" => Ok(ApiStyle::OpenAI),
            _ => Err(format!("Unknown API style: '{}'", s)),
        }
    }
}

impl ApiStyle {
    /// Returns the default model name for this API style.
    pub fn default_model(&self) -> &'static str {
        match self {
            ApiStyle::Gemini => "gemini-1.5-flash",
            ApiStyle::OpenAI => "gpt-4o-mini",
        }
    }

    /// Environment variable conventionally holding this style's API key.
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            ApiStyle::Gemini => "GEMINI_API_KEY",
            ApiStyle::OpenAI => "OPENAI_API_KEY",
        }
    }
}

/// Provider configuration.
///
/// Settings for one entry under `[llm.providers.<name>]`.
///
/// # Example
/// ```toml
/// [llm.providers.gemini]
/// model = "gemini-1.5-flash"
/// api_key = "AIza..."
/// max_tokens = 4000
/// temperature = 0.3
/// endpoint = "https://generativelanguage.googleapis.com" # optional
/// ```
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// API style used to select the backend implementation.
    ///
    /// If omitted, it is inferred from the provider name.
    #[serde(default)]
    pub api_style: Option<ApiStyle>,

    /// API endpoint override.
    pub endpoint: Option<String>,

    /// API key.
    ///
    /// Falls back to the style's environment variable when unset
    /// (`GEMINI_API_KEY` / `OPENAI_API_KEY`).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name.
    #[serde(default)]
    pub model: String,

    /// Maximum generated token count.
    pub max_tokens: Option<u32>,

    /// Sampling temperature in `0.0..=2.0`.
    pub temperature: Option<f32>,

    /// Additional provider-specific parameters.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::llm::provider::utils::mask_api_key;
        let masked_key = self.api_key.as_deref().map(mask_api_key);
        f.debug_struct("ProviderConfig")
            .field("api_style", &self.api_style)
            .field("endpoint", &self.endpoint)
            .field("api_key", &masked_key)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ProviderConfig {
    /// Validates provider configuration.
    pub fn validate(&self, name: &str) -> Result<()> {
        use crate::error::RefineError;
        if let Some(temp) = self.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(RefineError::Config(format!(
                    "Provider '{}': temperature {} out of range [0.0, 2.0]",
                    name, temp
                )));
            }
        }
        if let Some(ref key) = self.api_key {
            if key.trim().is_empty() {
                return Err(RefineError::Config(format!(
                    "Provider '{}': api_key is empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// LLM configuration.
///
/// Selects the provider used for reviews.
///
/// # Example
/// ```toml
/// [llm]
/// default_provider = "gemini"
///
/// [llm.providers.gemini]
/// api_key = "AIza..."
/// model = "gemini-1.5-flash"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LLMConfig {
    /// Provider name used by default.
    ///
    /// Must match a key under `[llm.providers.<name>]`.
    pub default_provider: String,

    /// Provider settings keyed by provider name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            default_provider: "gemini".to_string(),
            providers: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_api_style_round_trip() {
        assert_eq!(ApiStyle::from_str("gemini").unwrap(), ApiStyle::Gemini);
        assert_eq!(ApiStyle::from_str("OpenAI").unwrap(), ApiStyle::OpenAI);
        assert!(ApiStyle::from_str("claude").is_err());
        assert_eq!(ApiStyle::Gemini.to_string(), "gemini");
        assert_eq!(ApiStyle::OpenAI.to_string(), "openai");
    }

    #[test]
    fn test_default_models() {
        assert!(ApiStyle::Gemini.default_model().starts_with("gemini"));
        assert!(ApiStyle::OpenAI.default_model().starts_with("gpt"));
    }

    #[test]
    fn test_provider_config_temperature_range() {
        let mut config = ProviderConfig {
            temperature: Some(0.5),
            ..Default::default()
        };
        assert!(config.validate("test").is_ok());

        config.temperature = Some(2.5);
        assert!(config.validate("test").is_err());
    }

    #[test]
    fn test_provider_config_empty_api_key() {
        let config = ProviderConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.validate("test").is_err());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = ProviderConfig {
            api_key: Some("AIzaSyD-1234567890abcdef".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("1234567890"));
        assert!(debug.contains("AIza...cdef"));
    }
}
