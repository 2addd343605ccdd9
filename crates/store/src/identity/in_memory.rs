use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pharmacore_auth::{BearerToken, UserIdentity, VerifyError};

use super::SessionVerifier;

/// In-memory session verifier for tests/dev.
///
/// Every token not explicitly seeded is rejected.
#[derive(Debug, Default)]
pub struct InMemorySessionVerifier {
    sessions: RwLock<HashMap<String, UserIdentity>>,
}

impl InMemorySessionVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a live session.
    pub fn insert(&self, token: impl Into<String>, identity: UserIdentity) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(token.into(), identity);
        }
    }
}

#[async_trait]
impl SessionVerifier for InMemorySessionVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<UserIdentity, VerifyError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| VerifyError::Lookup("session lock poisoned".to_string()))?;

        sessions
            .get(token.as_str())
            .cloned()
            .ok_or(VerifyError::Rejected)
    }
}
