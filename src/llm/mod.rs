//! LLM abstractions, shared types, and provider traits.
//!
//! This module defines the provider interface used by the review flow on
//! both the CLI and the web surface.

/// Prompt-building utilities for the review flow.
pub mod prompt;
/// Built-in provider implementations and factory helpers.
pub mod provider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Progress reporting interface for LLM operations.
///
/// The LLM layer reports status changes (retries, backoff waits) through this
/// trait instead of depending on a concrete UI implementation.
pub trait ProgressReporter: Send + Sync {
    /// Appends an informative suffix to a progress message (for retries).
    fn append_suffix(&self, suffix: &str);
}

/// Unified interface implemented by all LLM providers.
///
/// # Architecture
///
/// Every built-in backend implements the internal `ApiBackend` trait and
/// receives this trait through a blanket impl: [`review_code`] builds the
/// prompt via [`prompt`](crate::llm::prompt), sends it, and scrapes the
/// reply into a [`ReviewReport`]. Test doubles implement `LLMProvider`
/// directly.
///
/// # Implementer Notes
/// 1. Implement `Send + Sync` (required in async contexts).
/// 2. Handle network failures, timeouts, and rate limits inside the call.
///
/// [`review_code`]: LLMProvider::review_code
#[async_trait]
pub trait LLMProvider: Send + Sync + std::fmt::Debug {
    /// Runs a code review.
    ///
    /// # Parameters
    /// - `code`: source code to review
    /// - `language`: language hint embedded in the prompt's code fence
    /// - `custom_prompt`: optional system-prompt override (the section-format
    ///   contract is still appended)
    /// - `progress`: optional progress reporter for retry feedback
    async fn review_code(
        &self,
        code: &str,
        language: Option<&str>,
        custom_prompt: Option<&str>,
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<ReviewReport>;

    /// Provider name (used for logs and error messages).
    fn name(&self) -> &str;

    /// Validates provider configuration with a minimal live request.
    async fn validate(&self) -> Result<()>;
}

/// Structured result scraped from an LLM review reply.
///
/// All fields default to empty; a reply with missing sections yields a
/// partially (or fully) empty report rather than an error.
///
/// # Example
/// ```
/// use coderefine::llm::ReviewReport;
///
/// let report = ReviewReport {
///     bugs: vec!["Division by zero when `count` is 0".to_string()],
///     improvements: vec!["Use a context manager for the file handle".to_string()],
///     fixed_code: "def mean(xs):\n    return sum(xs) / len(xs) if xs else 0.0".to_string(),
/// };
/// assert_eq!(report.bugs.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReport {
    /// Potential bugs and issues found in the submitted code.
    #[serde(default)]
    pub bugs: Vec<String>,

    /// Code-quality improvement suggestions.
    #[serde(default)]
    pub improvements: Vec<String>,

    /// Corrected version of the submitted code (empty when the model
    /// produced no fenced code block).
    #[serde(default)]
    pub fixed_code: String,
}

impl ReviewReport {
    /// Whether nothing at all could be scraped out of the reply.
    pub fn is_empty(&self) -> bool {
        self.bugs.is_empty() && self.improvements.is_empty() && self.fixed_code.is_empty()
    }
}
