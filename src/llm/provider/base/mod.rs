//! Shared provider abstractions and helpers.
//!
//! Module structure:
//! - `config` - configuration extraction helpers
//! - `response` - reply scraping into review sections
//! - `retry` - HTTP request sending with retry logic
//! - `validation` - API validation helpers
//! - `ApiBackend` trait - each provider implements only its own API shape;
//!   the shared review flow comes from a blanket impl

pub mod config;
pub mod response;
pub mod retry;
pub mod validation;

pub use config::*;
pub use response::{parse_review_sections, process_review_response};
pub use retry::send_llm_request;
pub use validation::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::{LLMProvider, ProgressReporter, ReviewReport};

/// Internal trait: each provider implements only its API-specific parts.
///
/// A blanket impl provides [`LLMProvider`] for every `ApiBackend`
/// implementer, so the prompt-build → call → scrape pipeline lives in one
/// place.
#[async_trait]
pub(crate) trait ApiBackend: Send + Sync {
    /// Provider name.
    fn name(&self) -> &str;

    /// Sends a `(system, user)` prompt pair and returns the raw reply text.
    async fn call_api(
        &self,
        system: &str,
        user_message: &str,
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<String>;

    /// Validates configuration with a minimal live request.
    async fn validate(&self) -> Result<()>;
}

#[async_trait]
impl<T: ApiBackend + std::fmt::Debug> LLMProvider for T {
    async fn review_code(
        &self,
        code: &str,
        language: Option<&str>,
        custom_prompt: Option<&str>,
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<ReviewReport> {
        let language = language.unwrap_or("python");
        let (system, user) = crate::llm::prompt::build_review_prompt_split(
            code,
            language,
            custom_prompt,
        );
        tracing::debug!(
            "Review prompt split - system ({} chars), user ({} chars)",
            system.len(),
            user.len()
        );
        let response = self.call_api(&system, &user, progress).await?;
        Ok(process_review_response(&response))
    }

    fn name(&self) -> &str {
        ApiBackend::name(self)
    }

    async fn validate(&self) -> Result<()> {
        ApiBackend::validate(self).await
    }
}
