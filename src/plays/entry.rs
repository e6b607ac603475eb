use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Per-login entry state: which game is being recorded and how many plays
/// have been entered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySession {
    pub week: u32,
    pub opponent: String,
    pub play_count: u32,
}

impl Default for EntrySession {
    fn default() -> Self {
        Self {
            week: 1,
            opponent: String::new(),
            play_count: 0,
        }
    }
}

impl EntrySession {
    pub fn next_play(&self) -> u32 {
        self.play_count + 1
    }
}

/// Entry sessions keyed by login session id.
#[derive(Debug, Default)]
pub struct EntrySessions {
    sessions: RwLock<HashMap<String, EntrySession>>,
}

impl EntrySessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, session_id: &str) -> Option<EntrySession> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn put(&self, session_id: &str, entry: EntrySession) {
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), entry);
    }

    pub async fn remove(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }
}
