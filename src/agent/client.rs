//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::agent::provider::LlmProvider;
use crate::agent::types::*;
use crate::config::OpenAIConfig;
use crate::error::{Error, Result};

/// Chat completions client, shared by every session
#[derive(Clone)]
pub struct ChatClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: OpenAIConfig,
}

impl ChatClient {
    /// Create a new chat client
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!(
                "Bearer {}",
                config.api_key.expose_secret()
            ))
            .map_err(|e| Error::Config(format!("Invalid API key format: {}", e)))?,
        );

        if let Some(ref org) = config.organization {
            if let Ok(value) = header::HeaderValue::from_str(org) {
                headers.insert("OpenAI-Organization", value);
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(ChatClient { client, config })
    }

    /// Send a request to the chat completions endpoint
    async fn send_request(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        debug!("Sending chat completion: model={}, messages={}", request.model, request.messages.len());

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();

        if status.is_success() {
            let body = response.json::<ChatCompletionResponse>().await?;

            if let Some(ref usage) = body.usage {
                info!(
                    "Chat completion: model={}, tokens={}",
                    body.model, usage.total_tokens
                );
            }

            Ok(body)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 {
                Err(Error::Unauthorized("Model API key rejected".to_string()))
            } else {
                warn!("Chat completion failed ({}): {}", status, error_text);
                Err(Error::UpstreamUnavailable(format!(
                    "Model API error ({}): {}",
                    status, error_text
                )))
            }
        }
    }
}

#[async_trait]
impl LlmProvider for ChatClient {
    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    async fn generate(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<ChatCompletionResponse> {
        let tool_choice = options.tools.as_ref().map(|_| "auto".to_string());

        let request = ChatCompletionRequest {
            model: options
                .model
                .clone()
                .unwrap_or_else(|| self.config.default_model.clone()),
            messages: messages.to_vec(),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            tools: options.tools.clone(),
            tool_choice,
        };

        self.send_request(request).await
    }
}
