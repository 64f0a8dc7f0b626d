//! Error types for bricklist-core

use thiserror::Error;

use crate::gateway::GatewayError;
use bricklist_domain::ListId;

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Controller-facing error type.
///
/// Every controller resolves with success or one of these; surfaces decide
/// how to render the message.
#[derive(Error, Debug)]
pub enum SyncError {
    /// No session token; rejected before any network I/O.
    #[error("You must be signed in to change your collections")]
    AuthRequired,

    /// A list detail read came back missing or forbidden.
    #[error("List {0} is unavailable")]
    ListUnavailable(ListId),

    /// A reorder that is not a permutation of the current members.
    #[error("Reorder must keep exactly the same items")]
    InvalidReorder,

    /// Anything the remote boundary reported.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl SyncError {
    /// Whether re-triggering the action could plausibly succeed.
    ///
    /// Authorization failures are permanent from the client's point of
    /// view; the UI should not invite a retry for them.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SyncError::AuthRequired => false,
            SyncError::ListUnavailable(_) => false,
            SyncError::InvalidReorder => false,
            SyncError::Gateway(g) => g.is_transient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_required_message_mentions_signing_in() {
        let err = SyncError::AuthRequired;
        assert!(err.to_string().contains("signed in"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_transient_gateway_error_is_recoverable() {
        let err = SyncError::Gateway(GatewayError::Server {
            status: 503,
            message: "maintenance".into(),
        });
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_not_allowed_is_not_recoverable() {
        let err = SyncError::Gateway(GatewayError::NotAllowed {
            message: "not your list".into(),
        });
        assert!(!err.is_recoverable());
    }
}
