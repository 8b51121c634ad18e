//! Conversation management

use crate::agent::types::Message;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Message history of one player session
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: Uuid,
    /// Session the conversation belongs to
    pub session_id: String,
    /// Messages in the conversation, oldest first
    pub messages: Vec<Message>,
    /// Maximum messages kept; older ones are dropped first
    pub limit: usize,
    /// When the conversation started
    pub created_at: DateTime<Utc>,
    /// When the conversation was last updated
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation
    pub fn new(session_id: impl Into<String>, limit: usize) -> Self {
        let now = Utc::now();
        Conversation {
            id: Uuid::new_v4(),
            session_id: session_id.into(),
            messages: Vec::new(),
            limit,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a message to the conversation
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        let overflow = self.messages.len().saturating_sub(self.limit);
        if overflow > 0 {
            self.messages.drain(..overflow);
        }
        self.updated_at = Utc::now();
    }

    /// Add a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(Message::user(content));
    }

    /// Add an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(Message::assistant(content));
    }

    /// Get the last N messages
    pub fn get_recent_messages(&self, n: usize) -> Vec<Message> {
        let start = self.messages.len().saturating_sub(n);
        self.messages[start..].to_vec()
    }

    /// Get message count
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Check if conversation is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
