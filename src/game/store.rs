//! In-process session store
//!
//! Uses a moka async cache (Send + Sync, idle-based eviction). Each entry is
//! a shared handle that the caller locks for the whole of a request, so two
//! requests for one session run one after the other while different
//! sessions never wait on each other.

use moka::future::Cache;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::session::GameSession;
use crate::agent::Conversation;
use crate::config::SessionConfig;

/// Everything the server keeps for one player
#[derive(Debug)]
pub struct PlayerSession {
    /// The current game, if one was started
    pub game: Option<GameSession>,
    /// Agent message history
    pub conversation: Conversation,
}

impl PlayerSession {
    pub fn new(session_id: &str, history_limit: usize) -> Self {
        PlayerSession {
            game: None,
            conversation: Conversation::new(session_id, history_limit),
        }
    }
}

/// Shared, lockable session
pub type SessionHandle = Arc<Mutex<PlayerSession>>;

/// Sessions keyed by session id
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, SessionHandle>,
    history_limit: usize,
}

impl SessionStore {
    pub fn new(config: &SessionConfig, history_limit: usize) -> Self {
        SessionStore {
            sessions: Cache::builder()
                .max_capacity(config.max_sessions)
                .time_to_idle(config.idle_timeout)
                .build(),
            history_limit,
        }
    }

    /// Handle for `session_id`, created on first use
    pub async fn handle(&self, session_id: &str) -> SessionHandle {
        let history_limit = self.history_limit;
        self.sessions
            .get_with(session_id.to_string(), async move {
                Arc::new(Mutex::new(PlayerSession::new(session_id, history_limit)))
            })
            .await
    }

    /// Existing session, without creating one
    pub async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.get(session_id).await
    }

    /// Drop a session; returns whether it existed
    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).await.is_some()
    }
}
