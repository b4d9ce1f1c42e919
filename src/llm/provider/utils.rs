//! Provider utility functions.
//!
//! URL handling, endpoint completion, and API key masking.

/// OpenAI API endpoint suffix
pub const OPENAI_API_SUFFIX: &str = "/v1/chat/completions";

/// OpenAI default base URL
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";

/// Gemini default base URL
pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";

/// Completes an API endpoint.
///
/// # Behavior
/// 1. Strip trailing slashes
/// 2. Return as-is when the URL already carries the full suffix
/// 3. Complete partially-present suffixes segment by segment
/// 4. Leave user-supplied full custom paths alone
///
/// # Example
/// ```
/// use coderefine::llm::provider::utils::complete_endpoint;
///
/// assert_eq!(
///     complete_endpoint("https://api.deepseek.com", "/v1/chat/completions"),
///     "https://api.deepseek.com/v1/chat/completions"
/// );
///
/// assert_eq!(
///     complete_endpoint("https://api.deepseek.com/v1/chat/completions", "/v1/chat/completions"),
///     "https://api.deepseek.com/v1/chat/completions"
/// );
/// ```
pub fn complete_endpoint(base_url: &str, expected_suffix: &str) -> String {
    let url = base_url.trim_end_matches('/');
    let suffix = expected_suffix.trim_start_matches('/');

    if url.ends_with(suffix) {
        return url.to_string();
    }

    // The URL may already carry a prefix of the suffix, e.g. base
    // "https://api.com/v1" with suffix "v1/chat/completions" only needs
    // "/chat/completions" appended.
    let suffix_parts: Vec<&str> = suffix.split('/').collect();

    for i in 0..suffix_parts.len() {
        let partial_suffix = suffix_parts[..=i].join("/");
        if url.ends_with(&partial_suffix) {
            let remaining_suffix = &suffix_parts[i + 1..].join("/");
            if remaining_suffix.is_empty() {
                return url.to_string();
            }
            return format!("{}/{}", url, remaining_suffix);
        }
    }

    if is_complete_api_path(url) {
        return url.to_string();
    }

    format!("{}/{}", url, suffix)
}

/// Whether the URL already looks like a full API path.
///
/// Heuristic: a path depth >= 2 (such as `/v1/chat`) is treated as a
/// user-supplied complete endpoint.
fn is_complete_api_path(url: &str) -> bool {
    let path = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, path)| path)
        .unwrap_or("");

    if path.is_empty() {
        return false;
    }

    let segment_count = path.split('/').filter(|s| !s.is_empty()).count();

    segment_count >= 2
}

/// Masks an API key for logs.
///
/// # Rules
/// - length > 8: first 4 characters + `...` + last 4 characters
/// - length <= 8: `****`
///
/// # Example
/// ```
/// use coderefine::llm::provider::utils::mask_api_key;
///
/// assert_eq!(mask_api_key("AIzaSyD-1234567890abcdef"), "AIza...cdef");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
pub fn mask_api_key(key: &str) -> String {
    if key.len() > 8 {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "****".to_string()
    }
}
