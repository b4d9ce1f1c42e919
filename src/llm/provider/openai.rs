use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::base::{
    extract_api_key, get_max_tokens_optional, get_temperature, send_llm_request, validate_api_key,
    validate_http_endpoint, ApiBackend,
};
use super::utils::{complete_endpoint, DEFAULT_OPENAI_BASE, OPENAI_API_SUFFIX};
use crate::config::{NetworkConfig, ProviderConfig};
use crate::error::{RefineError, Result};
use crate::llm::ProgressReporter;

/// OpenAI API provider
///
/// Works against the OpenAI chat-completions API and any compatible
/// endpoint (DeepSeek, OpenRouter, local gateways).
///
/// # Configuration example
/// ```toml
/// [llm.providers.openai]
/// api_key = "sk-..."
/// model = "gpt-4o-mini"
/// endpoint = "https://api.openai.com" # optional, any compatible base URL
/// ```
#[derive(Debug)]
pub struct OpenAIProvider {
    name: String,
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: f32,
    max_retries: usize,
    retry_delay_ms: u64,
    max_retry_delay_ms: u64,
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<MessagePayload>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct MessagePayload {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

impl OpenAIProvider {
    /// Builds an OpenAI provider from runtime configuration.
    pub fn new(
        config: &ProviderConfig,
        provider_name: &str,
        network_config: &NetworkConfig,
    ) -> Result<Self> {
        let api_key = extract_api_key(config, "OpenAI")?;
        let base = config.endpoint.as_deref().unwrap_or(DEFAULT_OPENAI_BASE);
        let endpoint = complete_endpoint(base, OPENAI_API_SUFFIX);
        let model = config.model.clone();
        let max_tokens = get_max_tokens_optional(config);
        let temperature = get_temperature(config);

        Ok(Self {
            name: provider_name.to_string(),
            client: super::create_http_client(network_config)?,
            api_key,
            endpoint,
            model,
            max_tokens,
            temperature,
            max_retries: network_config.max_retries,
            retry_delay_ms: network_config.retry_delay_ms,
            max_retry_delay_ms: network_config.max_retry_delay_ms,
        })
    }

    fn build_request(&self, system: &str, user_message: &str) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                MessagePayload {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                MessagePayload {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl ApiBackend for OpenAIProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call_api(
        &self,
        system: &str,
        user_message: &str,
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<String> {
        let request = self.build_request(system, user_message);

        tracing::debug!(
            "OpenAI API request: model={}, temperature={}, max_tokens={:?}, system_len={}, user_len={}",
            self.model,
            self.temperature,
            self.max_tokens,
            system.len(),
            user_message.len()
        );

        let auth_header = format!("Bearer {}", self.api_key);
        let response: OpenAIResponse = send_llm_request(
            &self.client,
            &self.endpoint,
            &[("Authorization", auth_header.as_str())],
            &request,
            "OpenAI",
            progress,
            self.max_retries,
            self.retry_delay_ms,
            self.max_retry_delay_ms,
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RefineError::Llm("OpenAI returned no choices".to_string()))
    }

    async fn validate(&self) -> Result<()> {
        validate_api_key(&self.api_key)?;

        let test_request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![MessagePayload {
                role: "user".to_string(),
                content: "test".to_string(),
            }],
            temperature: 1.0,
            max_tokens: Some(1), // Minimize API cost
        };

        let auth_header = format!("Bearer {}", self.api_key);
        validate_http_endpoint(
            &self.client,
            &self.endpoint,
            &[("Authorization", auth_header.as_str())],
            &test_request,
            "OpenAI",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use pretty_assertions::assert_eq;

    use crate::error::RefineError;
    use crate::llm::provider::test_utils::{test_network_config_no_retry, test_provider_config};

    fn test_provider(server_url: String) -> OpenAIProvider {
        OpenAIProvider::new(
            &test_provider_config(
                server_url,
                Some("sk-test".to_string()),
                "gpt-4o-mini".to_string(),
            ),
            "openai",
            &test_network_config_no_retry(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_openai_success_response_parsing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Hello from OpenAI"}}]}"#,
            )
            .create_async()
            .await;

        let provider = test_provider(server.url());
        let result = provider.call_api("system", "hi", None).await.unwrap();
        assert_eq!(result, "Hello from OpenAI");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_openai_api_error_500() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let provider = test_provider(server.url());
        let err = provider.call_api("system", "hi", None).await.unwrap_err();
        assert!(matches!(err, RefineError::LlmApi { status: 500, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_openai_empty_choices() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let provider = test_provider(server.url());
        let err = provider.call_api("system", "hi", None).await.unwrap_err();
        assert!(matches!(err, RefineError::Llm(_)));
        mock.assert_async().await;
    }

    #[test]
    fn test_openai_endpoint_completion() {
        let provider = test_provider("https://api.example.com".to_string());
        assert_eq!(provider.endpoint, "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn test_openai_missing_api_key() {
        let config = test_provider_config(
            "http://localhost:1".to_string(),
            None,
            "gpt-4o-mini".to_string(),
        );
        let err =
            OpenAIProvider::new(&config, "openai", &test_network_config_no_retry()).unwrap_err();
        assert!(matches!(err, RefineError::Config(_)));
    }
}
