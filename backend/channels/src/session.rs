//! In-memory conversation sessions.
//!
//! State is lost on restart; the flow tolerates that by letting a language
//! choice proceed from any state.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use pricefeed_core::{Session, SessionStore, SessionUpdate};

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<i64, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, chat_id: i64) -> Session {
        self.sessions
            .read()
            .await
            .get(&chat_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn update(&self, chat_id: i64, change: SessionUpdate) -> Session {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(chat_id).or_default();
        change(session);
        session.clone()
    }
}
