//! Top-level application configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RefineError, Result};

use super::llm::LLMConfig;
use super::network::NetworkConfig;

/// Application configuration.
///
/// Effective configuration is merged from multiple sources (low to high):
/// 1. Rust defaults (`Default` + `serde(default)`)
/// 2. User-level config file (platform-specific config directory)
/// 3. `CODEREFINE__*` environment variables
/// 4. `GEMINI_API_KEY` / `OPENAI_API_KEY` credential fallbacks
///
/// # Configuration File Locations
/// - Linux: `~/.config/coderefine/config.toml`
/// - macOS: `~/Library/Application Support/coderefine/config.toml`
/// - Windows: `%APPDATA%\coderefine\config\config.toml`
///
/// # Example
/// ```toml
/// [llm]
/// default_provider = "gemini"
///
/// [llm.providers.gemini]
/// api_key = "AIza..."
/// model = "gemini-1.5-flash"
///
/// [review]
/// default_language = "python"
///
/// [server]
/// port = 8787
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// LLM provider settings.
    #[serde(default)]
    pub llm: LLMConfig,

    /// Review behavior.
    #[serde(default)]
    pub review: ReviewConfig,

    /// Web server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Terminal UI behavior.
    #[serde(default)]
    pub ui: UiConfig,

    /// HTTP timeout and retry settings.
    #[serde(default)]
    pub network: NetworkConfig,
}

impl AppConfig {
    /// Validates configuration consistency.
    pub fn validate(&self) -> Result<()> {
        // Ensure the configured default provider exists.
        if !self.llm.providers.is_empty()
            && !self.llm.providers.contains_key(&self.llm.default_provider)
        {
            return Err(RefineError::Config(format!(
                "default_provider '{}' not found in [llm.providers]",
                self.llm.default_provider
            )));
        }

        for (name, provider) in &self.llm.providers {
            provider.validate(name)?;
        }
        self.network.validate()?;
        self.review.validate()?;
        Ok(())
    }
}

/// Review configuration.
///
/// # Example
/// ```toml
/// [review]
/// default_language = "python"
/// max_code_bytes = 262144
/// custom_prompt = "Focus on security issues"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Language hint used when none is given and none can be inferred.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Maximum accepted code size in bytes.
    ///
    /// Oversized submissions are rejected before any network call.
    #[serde(default = "default_max_code_bytes")]
    pub max_code_bytes: usize,

    /// Additional prompt text replacing the base review system prompt.
    ///
    /// The section-format contract is still appended, so the reply stays
    /// parseable.
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl ReviewConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_code_bytes == 0 {
            return Err(RefineError::Config(
                "review.max_code_bytes cannot be 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            max_code_bytes: default_max_code_bytes(),
            custom_prompt: None,
        }
    }
}

/// Web server configuration.
///
/// # Example
/// ```toml
/// [server]
/// bind = "127.0.0.1"
/// port = 8787
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port the server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

/// Terminal UI configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Whether to enable color output.
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { colored: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "python".to_string()
}

fn default_max_code_bytes() -> usize {
    256 * 1024
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}
