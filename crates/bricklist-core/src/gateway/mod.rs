//! Remote collection gateway
//!
//! Translates synchronization intents into HTTP calls and normalizes
//! responses and errors into one uniform shape. Pure I/O; retry and
//! rollback policy belong to the controllers.

mod remote;
pub(crate) mod wire;

pub use remote::RemoteGateway;

use thiserror::Error;

use crate::http::HttpError;
use bricklist_domain::{CatalogSet, ListDetail, ListId, ListSummary, ReorderTarget, SetNum};

/// Errors from the remote boundary.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// 401/403: the action requires an ownership the caller lacks.
    #[error("Not allowed: {message}")]
    NotAllowed { message: String },

    /// 404 on a read: the resource is missing or hidden.
    #[error("Not found")]
    NotFound,

    /// 5xx and other unexpected statuses.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Transport failure (timeout, connectivity loss).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl GatewayError {
    /// Whether the failure is plausibly temporary.
    ///
    /// Distinguishes "temporarily unavailable" from "not allowed" so the
    /// UI can avoid inviting a retry that will never succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, GatewayError::Server { .. } | GatewayError::Http(_))
    }
}

/// The gateway operations the sync controllers depend on.
///
/// Implemented by [`RemoteGateway`] for production; tests substitute an
/// in-memory fake. Add/remove operations follow the idempotent contract:
/// "already a member" and "already absent" resolve as success.
#[allow(async_fn_in_trait)]
pub trait CollectionApi {
    async fn add_to_owned(&self, set_id: &SetNum) -> Result<(), GatewayError>;
    async fn remove_from_owned(&self, set_id: &SetNum) -> Result<(), GatewayError>;
    async fn add_to_wishlist(&self, set_id: &SetNum) -> Result<(), GatewayError>;
    async fn remove_from_wishlist(&self, set_id: &SetNum) -> Result<(), GatewayError>;

    /// Server-truth membership of the Owned bucket, newest first.
    async fn owned_sets(&self) -> Result<Vec<CatalogSet>, GatewayError>;
    /// Server-truth membership of the Wishlist in its saved order.
    async fn wishlist_sets(&self) -> Result<Vec<CatalogSet>, GatewayError>;

    async fn my_lists(&self) -> Result<Vec<ListSummary>, GatewayError>;
    async fn list_detail(&self, list_id: ListId) -> Result<ListDetail, GatewayError>;
    async fn add_item_to_list(&self, list_id: ListId, set_id: &SetNum)
        -> Result<(), GatewayError>;
    async fn remove_item_from_list(
        &self,
        list_id: ListId,
        set_id: &SetNum,
    ) -> Result<(), GatewayError>;

    /// All-or-nothing replacement of a target's ordering. The server
    /// validates that `ordered` is a permutation of the existing members.
    async fn persist_list_order(
        &self,
        target: ReorderTarget,
        ordered: &[SetNum],
    ) -> Result<(), GatewayError>;
}
