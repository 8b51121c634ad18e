//! Agent module - LLM client, prompts, and tool dispatch
//!
//! This module handles all AI-related functionality including:
//! - Chat-completions client behind the `LlmProvider` trait
//! - Message handling and conversation history
//! - Prompt templates for keywords, riddles and hints
//! - Game tools and the dispatcher that runs them

mod client;
mod conversation;
pub mod dispatch;
pub mod prompts;
pub mod provider;
mod tools;
mod types;

pub use client::ChatClient;
pub use conversation::Conversation;
pub use dispatch::{AgentDispatcher, DispatchReply};
pub use prompts::PromptTemplate;
pub use provider::{complete, LlmProvider};
pub use tools::{GameTool, StartGameArgs, ToolCall, VerifyArgs};
pub use types::*;
