//! bricklist-core: membership & ordering synchronization for the set catalogue
//!
//! This library keeps a set's membership state (Owned / Wishlist / custom
//! lists) consistent across independently-mounted UI surfaces. It provides:
//! - A remote collection gateway over the catalogue API (`gateway`)
//! - A process-wide membership store with optimistic overlays (`store`)
//! - Toggle and reorder controllers that own every mutation (`sync`)
//! - Session token handling and client configuration
//! - A client-side registry of saved public lists (`saved`)
//!
//! Surfaces read the store and invoke the controllers; nothing else writes
//! shared state.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod saved;
pub mod session;
pub mod store;
pub mod sync;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{Result, SyncError};
pub use gateway::{CollectionApi, GatewayError, RemoteGateway};
pub use saved::SavedLists;
pub use session::Session;
pub use store::{MembershipEvent, MembershipStore, MutationTicket, Snapshot};
pub use sync::{load_list, refresh, ReorderController, ToggleController};

// Domain types most consumers need alongside the controllers
pub use bricklist_domain::{
    CatalogSet, CollectionKind, CollectionState, ListDetail, ListId, ListItem, ListSummary,
    ReorderTarget, SetNum,
};
