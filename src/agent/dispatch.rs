//! Agent dispatch layer
//!
//! Turns one free-text player message into at most one game operation. The
//! model sees the game-master prompt, the session history and the three game
//! tools; the first tool call it makes is executed against the session and
//! its result becomes the reply.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::agent::prompts::game_master_prompt;
use crate::agent::provider::LlmProvider;
use crate::agent::tools::{GameTool, StartGameArgs, ToolCall, VerifyArgs};
use crate::agent::types::{GenerationOptions, Message};
use crate::config::AgentConfig;
use crate::error::{Error, Result};
use crate::game::{GameEngine, PlayerSession, SessionStore};

/// What the agent answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReply {
    /// Text for the player
    pub text: String,
    /// Name of the game tool that produced the text, if any
    pub tool: Option<String>,
}

/// Routes player messages through the model to the game engine
#[derive(Clone)]
pub struct AgentDispatcher {
    llm: Arc<dyn LlmProvider>,
    engine: GameEngine,
    sessions: SessionStore,
    config: AgentConfig,
    system_prompt: String,
}

impl AgentDispatcher {
    pub fn new(llm: Arc<dyn LlmProvider>, engine: GameEngine, sessions: SessionStore, config: AgentConfig) -> Self {
        AgentDispatcher {
            llm,
            engine,
            sessions,
            config,
            system_prompt: game_master_prompt(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one message for `session_id`.
    ///
    /// The session stays locked until the reply is ready.
    pub async fn ask(&self, session_id: &str, text: &str) -> Result<DispatchReply> {
        let handle = self.sessions.handle(session_id).await;
        let mut session = handle.lock().await;

        let messages = self.build_messages(&session, text);
        let options = GenerationOptions {
            model: Some(self.config.model.clone()),
            temperature: Some(self.config.temperature),
            top_p: Some(self.config.top_p),
            ..Default::default()
        }
        .with_tools(GameTool::definitions());

        let response = self.llm.generate(&messages, &options).await?;
        let choice = response
            .first_choice()
            .ok_or_else(|| Error::UpstreamUnavailable("Model returned no choices".to_string()))?;

        let first_call = choice
            .message
            .tool_calls
            .as_ref()
            .and_then(|calls| calls.first());

        let reply = match first_call {
            Some(call) if choice.wants_tools() => {
                let call = ToolCall::from_assistant(call)?;
                match GameTool::from_name(&call.name) {
                    Some(tool) => {
                        let text = self.run_tool(&mut session, tool, &call).await?;
                        DispatchReply {
                            text,
                            tool: Some(tool.name().to_string()),
                        }
                    }
                    None => {
                        warn!("Model called unknown tool {:?}, using its text", call.name);
                        DispatchReply {
                            text: choice.message.content.clone(),
                            tool: None,
                        }
                    }
                }
            }
            _ => DispatchReply {
                text: choice.message.content.clone(),
                tool: None,
            },
        };

        if self.config.remember {
            session.conversation.add_user_message(text);
            session.conversation.add_assistant_message(reply.text.clone());
        }

        Ok(reply)
    }

    fn build_messages(&self, session: &PlayerSession, text: &str) -> Vec<Message> {
        let mut messages = vec![Message::system(self.system_prompt.as_str())];
        if self.config.recall {
            messages.extend(session.conversation.get_recent_messages(self.config.history_limit));
        }
        messages.push(Message::user(text));
        messages
    }

    async fn run_tool(&self, session: &mut PlayerSession, tool: GameTool, call: &ToolCall) -> Result<String> {
        info!("Dispatching {} for session {}", tool.name(), session.conversation.session_id);
        debug!("Tool arguments: {}", call.arguments);

        match tool {
            GameTool::StartGame => {
                let args: StartGameArgs = call.parse_arguments()?;
                self.engine
                    .start(session, &args.current_location, &args.user_interests)
                    .await
            }
            GameTool::Verify => {
                let args: VerifyArgs = call.parse_arguments()?;
                match self.engine.verify(session, &args.current_location).await {
                    Ok(outcome) => Ok(outcome.message().to_string()),
                    Err(timeout @ Error::SessionTimeout { .. }) => {
                        info!("Session {} ran out of time", session.conversation.session_id);
                        Ok(timeout.to_string())
                    }
                    Err(e) => Err(e),
                }
            }
            GameTool::GetHint => self.engine.hint(session).await,
        }
    }
}
