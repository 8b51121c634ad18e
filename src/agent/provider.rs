//! LLM Provider trait - Abstract interface for chat-completion backends
//!
//! The game logic only talks to this trait, so tests can substitute a
//! scripted provider for the real HTTP client.

use async_trait::async_trait;

use crate::agent::types::{ChatCompletionResponse, GenerationOptions, Message};
use crate::error::{Error, Result};

/// System prompt used for every single-shot completion
pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Abstract interface for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the default model for this provider
    fn default_model(&self) -> &str;

    /// Generate a response (non-streaming)
    async fn generate(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<ChatCompletionResponse>;
}

/// Run a system + user prompt pair and return the first completion's text.
pub async fn complete(provider: &dyn LlmProvider, prompt: &str) -> Result<String> {
    let messages = [
        Message::system(ASSISTANT_SYSTEM_PROMPT),
        Message::user(prompt),
    ];

    let response = provider
        .generate(&messages, &GenerationOptions::default())
        .await?;

    response
        .first_choice()
        .map(|choice| choice.message.content.clone())
        .ok_or_else(|| Error::UpstreamUnavailable("Model returned no choices".to_string()))
}
