//! Session token cell shared by the gateway and controllers

use std::sync::Mutex;

use crate::error::{Result, SyncError};

/// Holds the bearer token for the signed-in user.
///
/// The token itself comes from an external session-management collaborator;
/// this cell only stores it for the lifetime of the process. Controllers
/// call [`Session::require_token`] before any network I/O so a signed-out
/// state surfaces as an auth error, never as a failed request.
#[derive(Debug, Default)]
pub struct Session {
    token: Mutex<Option<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(Some(token.into()));
        session
    }

    /// Replace the token. `None` signs the session out.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        *self.token.lock().unwrap() = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    /// The precondition gate: token or a local auth-required error.
    pub fn require_token(&self) -> Result<String> {
        self.token().ok_or(SyncError::AuthRequired)
    }
}
