//! # coderefine
//!
//! AI-powered code review: submit source code, get back a list of potential
//! bugs, a list of improvement suggestions, and a corrected version of the
//! code, produced by a hosted LLM and scraped out of its reply.
//!
//! ## Features
//! - **Code review**: bugs, improvements, and a fixed version in one pass
//! - **Two surfaces**: a terminal flow (`coderefine review`) and a
//!   single-page browser UI (`coderefine serve`)
//! - **Multi-provider**: Google Gemini (default) and OpenAI-compatible APIs
//! - **Best-effort parsing**: missing reply sections degrade to empty
//!   results instead of failing
//!
//! ## Quick start
//!
//! ```bash
//! # Initialize configuration
//! coderefine init
//!
//! # Review a file in the terminal
//! coderefine review src/main.py
//!
//! # Or pipe code on stdin
//! cat script.py | coderefine review
//!
//! # Or open the browser UI
//! coderefine serve --port 8787
//! ```
//!
//! ## As a library
//! ```ignore
//! use coderefine::config::{NetworkConfig, ProviderConfig};
//! use coderefine::llm::provider::gemini::GeminiProvider;
//! use coderefine::llm::LLMProvider;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ProviderConfig {
//!     api_key: Some("AIza...".to_string()),
//!     model: "gemini-1.5-flash".to_string(),
//!     ..Default::default()
//! };
//! let provider = GeminiProvider::new(&config, "gemini", &NetworkConfig::default())?;
//! let report = provider
//!     .review_code("def f(x):\n    return x / 0\n", Some("python"), None, None)
//!     .await?;
//! println!("{} bugs found", report.bugs.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core modules
//! - [`llm`] - LLM provider interface and implementations
//! - [`commands`] - CLI command implementations
//! - [`web`] - single-page browser UI and HTTP API
//! - [`config`] - configuration management
//! - [`error`] - unified error type
//! - [`ui`] - terminal output helpers
//!
//! ## Configuration
//! Config file locations:
//! - Linux: `~/.config/coderefine/config.toml`
//! - macOS: `~/Library/Application Support/coderefine/config.toml`
//! - Windows: `%APPDATA%\coderefine\config\config.toml`
//!
//! Example:
//! ```toml
//! [llm]
//! default_provider = "gemini"
//!
//! [llm.providers.gemini]
//! api_key = "AIza..."
//! model = "gemini-1.5-flash"
//!
//! [review]
//! default_language = "python"
//! ```
//! API keys may also come from `GEMINI_API_KEY` / `OPENAI_API_KEY`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod llm;
pub mod ui;
pub mod web;
