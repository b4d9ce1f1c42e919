//! HTTP request sending with retry logic.
//!
//! Provides the shared LLM API request function, including bounded retries,
//! 429 rate-limit handling, and exponential backoff.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, SystemTime};

use super::response::truncate_for_preview;
use crate::error::{RefineError, Result};
use crate::llm::ProgressReporter;

/// Whether an error is worth retrying (currently only connection failures).
fn is_retryable_error(error: &RefineError) -> bool {
    match error {
        RefineError::Llm(msg) => msg.to_lowercase().contains("connection failed"),
        _ => false,
    }
}

/// Parses a `Retry-After` header value.
///
/// Accepts both forms:
/// - seconds: `120`
/// - HTTP date: `Wed, 21 Oct 2015 07:28:00 GMT`
///
/// Returns `None` when the value is unparseable; dates in the past yield 0.
fn parse_retry_after(value: &str) -> Option<u64> {
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }

    if let Ok(date) = httpdate::parse_http_date(value) {
        let now = SystemTime::now();
        return Some(date.duration_since(now).map(|d| d.as_secs()).unwrap_or(0));
    }

    None
}

/// Sends one HTTP request attempt (handles transport-level errors only).
async fn try_send_request<Req: Serialize>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    request_body: &Req,
    provider_name: &str,
) -> Result<reqwest::Response> {
    let mut req = client
        .post(endpoint)
        .header("Content-Type", "application/json");

    for (key, value) in headers {
        req = req.header(*key, *value);
    }

    tracing::debug!("Sending request to: {}", endpoint);

    req.json(request_body).send().await.map_err(|e| {
        let detail = format!("{}", e);

        if e.is_timeout() {
            RefineError::Llm(format!(
                "{} API request timeout: {}",
                provider_name, detail
            ))
        } else if e.is_connect() {
            RefineError::Llm(format!(
                "{} API connection failed: {}",
                provider_name, detail
            ))
        } else {
            RefineError::Network(e)
        }
    })
}

/// Sends an LLM API request with retries.
///
/// # Arguments
/// * `client` - HTTP client
/// * `endpoint` - API endpoint
/// * `headers` - extra request headers
/// * `request_body` - request body
/// * `provider_name` - provider name (for logs and error messages)
/// * `progress` - optional progress reporter (shows retry progress)
/// * `max_retries` - maximum retry count
/// * `retry_delay_ms` - initial retry delay in milliseconds
/// * `max_retry_delay_ms` - maximum retry delay in milliseconds
#[allow(clippy::too_many_arguments)]
pub async fn send_llm_request<Req, Resp>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    request_body: &Req,
    provider_name: &str,
    progress: Option<&dyn ProgressReporter>,
    max_retries: usize,
    retry_delay_ms: u64,
    max_retry_delay_ms: u64,
) -> Result<Resp>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        let response =
            match try_send_request(client, endpoint, headers, request_body, provider_name).await {
                Ok(resp) => resp,
                Err(e) => {
                    if !is_retryable_error(&e) || attempt > max_retries {
                        return Err(e);
                    }

                    if let Some(p) = progress {
                        p.append_suffix(&format!("(retry {}/{})", attempt, max_retries));
                    }

                    let delay =
                        calculate_exponential_backoff(attempt, retry_delay_ms, max_retry_delay_ms);
                    tracing::debug!(
                        "{} API network error (attempt {}/{}): {}. Retrying in {:.1}s...",
                        provider_name,
                        attempt,
                        max_retries + 1,
                        e,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

        let status = response.status();

        // 429: honor Retry-After, otherwise back off exponentially.
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);

            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<body read error: {}>", e));

            tracing::debug!(
                "{} API rate limited (429), Retry-After: {:?}",
                provider_name,
                retry_after
            );

            if attempt > max_retries {
                return Err(RefineError::LlmApi {
                    status: 429,
                    message: format!("{}: {}", provider_name, truncate_for_preview(&body)),
                });
            }

            if let Some(p) = progress {
                p.append_suffix(&format!("(retry {}/{})", attempt, max_retries));
            }

            let delay = if let Some(secs) = retry_after {
                let retry_after_ms = secs.saturating_mul(1000);
                if retry_after_ms > max_retry_delay_ms {
                    // Waiting longer than the cap is not worth blocking for.
                    return Err(RefineError::Llm(format!(
                        "Rate limited: server asked to wait {}s, exceeding the retry cap",
                        secs
                    )));
                }
                tracing::debug!("Using Retry-After header: {} seconds", secs);
                Duration::from_secs(secs)
            } else {
                calculate_exponential_backoff(attempt, retry_delay_ms, max_retry_delay_ms)
            };

            tracing::debug!(
                "{} API rate limited (attempt {}/{}). Retrying in {:.1}s...",
                provider_name,
                attempt,
                max_retries + 1,
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
            continue;
        }

        let response_text = response.text().await?;

        tracing::debug!("{} API response status: {}", provider_name, status);
        tracing::debug!("{} API response body: {}", provider_name, response_text);

        if !status.is_success() {
            return Err(RefineError::LlmApi {
                status: status.as_u16(),
                message: format!("{}: {}", provider_name, truncate_for_preview(&response_text)),
            });
        }

        if attempt > 1 {
            tracing::debug!(
                "{} API request succeeded after {} attempts",
                provider_name,
                attempt
            );
        }

        return serde_json::from_str(&response_text).map_err(|e| {
            RefineError::Llm(format!(
                "Failed to parse {} response: {}. Response: {}",
                provider_name,
                e,
                truncate_for_preview(&response_text)
            ))
        });
    }
}

/// Computes the exponential backoff delay for an attempt.
fn calculate_exponential_backoff(
    attempt: usize,
    retry_delay_ms: u64,
    max_retry_delay_ms: u64,
) -> Duration {
    const MIN_RETRY_DELAY_MS: u64 = 100;
    let multiplier = 1u64.checked_shl((attempt - 1) as u32).unwrap_or(u64::MAX);
    let delay_ms = retry_delay_ms
        .saturating_mul(multiplier)
        .min(max_retry_delay_ms)
        .max(MIN_RETRY_DELAY_MS);
    Duration::from_millis(delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefineError;

    // === is_retryable_error ===

    #[test]
    fn test_is_retryable_connection_failed() {
        let err = RefineError::Llm("connection failed: timeout".to_string());
        assert!(is_retryable_error(&err));
    }

    #[test]
    fn test_is_retryable_other_errors() {
        let err = RefineError::Llm("API error (500): Internal server error".to_string());
        assert!(!is_retryable_error(&err));

        let err = RefineError::Config("Missing API key".to_string());
        assert!(!is_retryable_error(&err));
    }

    #[test]
    fn test_is_retryable_mixed_case() {
        let cases = vec![
            "Connection Failed",
            "CONNECTION FAILED",
            "connection failed",
            "API connection failed: timeout",
        ];

        for msg in cases {
            let err = RefineError::Llm(msg.to_string());
            assert!(is_retryable_error(&err), "Should retry for: {}", msg);
        }
    }

    // === parse_retry_after ===

    #[test]
    fn test_parse_retry_after_seconds() {
        assert_eq!(parse_retry_after("120"), Some(120));
        assert_eq!(parse_retry_after("0"), Some(0));
    }

    #[test]
    fn test_parse_retry_after_past_http_date() {
        // A date in the past means retry immediately.
        assert_eq!(
            parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"),
            Some(0)
        );
    }

    #[test]
    fn test_parse_retry_after_invalid() {
        assert_eq!(parse_retry_after("soon"), None);
        assert_eq!(parse_retry_after(""), None);
    }

    // === backoff ===

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let d1 = calculate_exponential_backoff(1, 1000, 60_000);
        let d2 = calculate_exponential_backoff(2, 1000, 60_000);
        let d3 = calculate_exponential_backoff(3, 1000, 60_000);
        assert_eq!(d1, Duration::from_millis(1000));
        assert_eq!(d2, Duration::from_millis(2000));
        assert_eq!(d3, Duration::from_millis(4000));
    }

    #[test]
    fn test_backoff_capped_at_max() {
        let d = calculate_exponential_backoff(20, 1000, 60_000);
        assert_eq!(d, Duration::from_millis(60_000));
    }

    #[test]
    fn test_backoff_has_floor() {
        let d = calculate_exponential_backoff(1, 0, 60_000);
        assert_eq!(d, Duration::from_millis(100));
    }
}
