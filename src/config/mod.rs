pub mod structs;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Result;
pub use structs::*;

/// Loads the application configuration.
///
/// Priority (low to high):
/// 1. Built-in defaults
/// 2. Config file (`~/.config/coderefine/config.toml`)
/// 3. Environment variables with the `CODEREFINE__*` prefix, double
///    underscore as the nesting separator
///    - e.g. `CODEREFINE__LLM__DEFAULT_PROVIDER=openai`
///    - e.g. `CODEREFINE__SERVER__PORT=9000`
/// 4. Credential fallbacks: `GEMINI_API_KEY` / `OPENAI_API_KEY` fill in
///    `api_key` for matching providers that have none configured
pub fn load_config() -> Result<AppConfig> {
    let mut builder = Config::builder();

    builder = builder
        .set_default("llm.default_provider", "gemini")?
        .set_default("review.default_language", "python")?
        .set_default("review.max_code_bytes", 256 * 1024i64)?
        .set_default("server.bind", "127.0.0.1")?
        .set_default("server.port", 8787i64)?
        .set_default("ui.colored", true)?
        .set_default("network.request_timeout", 120)?
        .set_default("network.connect_timeout", 10)?
        .set_default("network.max_retries", 3)?
        .set_default("network.retry_delay_ms", 1000)?;

    if let Some(config_path) = get_config_path() {
        if config_path.exists() {
            builder = builder.add_source(File::from(config_path));
        }
    }

    // Double underscore separates nesting levels so single underscores in
    // field names stay intact: CODEREFINE__LLM__DEFAULT_PROVIDER.
    builder = builder.add_source(
        Environment::with_prefix("CODEREFINE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let mut app_config: AppConfig = config.try_deserialize()?;

    ensure_builtin_providers(&mut app_config);
    apply_env_api_keys(&mut app_config);

    Ok(app_config)
}

/// Makes sure the built-in provider entries exist so a bare install works
/// with nothing but an API key in the environment.
fn ensure_builtin_providers(config: &mut AppConfig) {
    for name in ["gemini", "openai"] {
        let entry = config
            .llm
            .providers
            .entry(name.to_string())
            .or_insert_with(ProviderConfig::default);
        let style = entry
            .api_style
            .unwrap_or_else(|| ApiStyle::from_str(name).unwrap_or(ApiStyle::Gemini));
        if entry.model.is_empty() {
            entry.model = style.default_model().to_string();
        }
    }
}

/// Fills missing provider credentials from the conventional environment
/// variables. Keys already present in the config file win.
fn apply_env_api_keys(config: &mut AppConfig) {
    for (name, provider) in config.llm.providers.iter_mut() {
        if provider.api_key.is_some() {
            continue;
        }
        let style = provider
            .api_style
            .or_else(|| ApiStyle::from_str(name).ok());
        if let Some(style) = style {
            if let Ok(key) = std::env::var(style.api_key_env_var()) {
                if !key.trim().is_empty() {
                    tracing::debug!("Using {} for provider '{}'", style.api_key_env_var(), name);
                    provider.api_key = Some(key);
                }
            }
        }
    }
}

/// Returns the config file path (`<config dir>/config.toml`).
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Returns the config directory path.
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coderefine").map(|dirs| dirs.config_dir().to_path_buf())
}
