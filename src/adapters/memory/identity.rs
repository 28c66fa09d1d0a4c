//! In-memory identity provider.

use std::collections::HashMap;
use std::sync::Mutex;

use super::lock;
use crate::ports::{AuthUser, IdentityProvider, PortFuture};

/// Accepts a fixed set of access tokens.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    sessions: Mutex<HashMap<String, AuthUser>>,
}

impl MemoryIdentityProvider {
    /// Registers `token` as a valid session for `user`.
    #[must_use]
    pub fn with_session(self, token: &str, user: AuthUser) -> Self {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.insert(token.to_string(), user);
        }
        self
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    fn user_for_token(&self, token: &str) -> PortFuture<'_, Option<AuthUser>> {
        let result =
            lock(&self.sessions, "verify token").map(|sessions| sessions.get(token).cloned());
        Box::pin(async move { result })
    }
}
