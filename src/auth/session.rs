use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

/// The principal a session token stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub username: String,
}

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Owns the mapping of session tokens to identities.
///
/// Sessions never expire, they live until revoked or until the process exits.
pub trait SessionStore: std::fmt::Debug + Send + Sync {
    /// Register `identity` under a fresh token that no live session uses.
    fn create(&self, identity: Identity) -> String;

    fn lookup(&self, token: &str) -> Option<Identity>;

    /// Revoking an unknown token does nothing.
    fn revoke(&self, token: &str);

    /// Number of live sessions.
    fn live(&self) -> usize;
}

/// Process local session table.
#[derive(Debug, Default)]
pub struct MemorySessions {
    sessions: RwLock<HashMap<String, Identity>>,
    sequence: AtomicU64,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 128 random bits followed by the current millisecond and a sequence
    /// number, so two logins in the same millisecond still differ.
    fn generate_token(&self) -> String {
        let entropy = uuid::Uuid::new_v4().simple();
        let millis = Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{entropy}{millis:x}{seq:x}")
    }
}

impl SessionStore for MemorySessions {
    fn create(&self, identity: Identity) -> String {
        let mut sessions = self.sessions.write();

        let mut token = self.generate_token();
        while sessions.contains_key(&token) {
            token = self.generate_token();
        }

        sessions.insert(token.clone(), identity);
        token
    }

    fn lookup(&self, token: &str) -> Option<Identity> {
        self.sessions.read().get(token).cloned()
    }

    fn revoke(&self, token: &str) {
        self.sessions.write().remove(token);
    }

    fn live(&self) -> usize {
        self.sessions.read().len()
    }
}
