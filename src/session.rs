//! Bearer-token session and the authentication gate.
//!
//! [`Session`] is the only writer of the `access_token` key. It is handed to
//! the client and the pages explicitly; tests swap in a [`MemoryStorage`].
//!
//! Storage failures never reach the caller: they are logged and the
//! operation degrades to a no-op (a failed read looks like "no token").

use crate::storage::{MemoryStorage, Storage};
use std::sync::Arc;
use tracing::warn;

pub const TOKEN_KEY: &str = "access_token";

#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Persist `token`, replacing any previous one.
    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.storage.set_item(TOKEN_KEY, token) {
            warn!(backend = self.storage.name(), error = %e, "failed to store access token");
        }
    }

    pub fn get_token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(backend = self.storage.name(), error = %e, "failed to read access token");
                None
            }
        }
    }

    /// Remove the token. Idempotent.
    pub fn clear_token(&self) {
        if let Err(e) = self.storage.remove_item(TOKEN_KEY) {
            warn!(backend = self.storage.name(), error = %e, "failed to clear access token");
        }
    }

    /// Presence check only; says nothing about whether the backend will
    /// accept the token.
    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }

    /// The token to send, if any. An empty stored string counts as absent.
    pub fn bearer_token(&self) -> Option<String> {
        self.get_token().filter(|t| !t.is_empty())
    }

    /// `Authorization: Bearer <token>` when a token is held, otherwise nothing.
    pub fn auth_header(&self) -> Option<(String, String)> {
        self.bearer_token()
            .map(|t| ("Authorization".to_string(), format!("Bearer {}", t)))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("backend", &self.storage.name())
            .finish_non_exhaustive()
    }
}
