//! Synchronization controllers
//!
//! All membership mutation flows through here: surfaces never write the
//! store directly. `refresh` and `load_list` are the reconciliation reads
//! that (re)build the confirmed snapshot from server truth.

mod reorder;
mod toggle;

pub use reorder::ReorderController;
pub use toggle::ToggleController;

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, SyncError};
use crate::gateway::{CollectionApi, GatewayError};
use crate::store::{MembershipStore, Snapshot};
use crate::session::Session;
use bricklist_domain::{ListDetail, ListId};

/// Re-fetch Owned, Wishlist, and every custom list's items, installing the
/// result as the new confirmed baseline. Live optimistic mutations keep
/// overriding what they target.
pub async fn refresh<G: CollectionApi>(
    gateway: &G,
    store: &MembershipStore,
    session: &Session,
) -> Result<()> {
    session.require_token()?;

    let owned = gateway.owned_sets().await?;
    let wishlist = gateway.wishlist_sets().await?;
    let summaries = gateway.my_lists().await?;

    let mut lists = HashMap::new();
    for summary in &summaries {
        match gateway.list_detail(summary.id).await {
            Ok(detail) => {
                lists.insert(summary.id, detail.ordered_set_ids());
            }
            Err(GatewayError::NotFound) => {
                debug!(list_id = summary.id, "list vanished during refresh, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    store.replace_snapshot(Snapshot {
        owned: owned.into_iter().map(|s| s.set_id).collect(),
        wishlist: wishlist.into_iter().map(|s| s.set_id).collect(),
        lists,
    });
    Ok(())
}

/// Fetch one list's detail and install its confirmed ordering.
///
/// A missing or forbidden list surfaces as [`SyncError::ListUnavailable`];
/// nothing is rolled back because nothing was mutated.
pub async fn load_list<G: CollectionApi>(
    gateway: &G,
    store: &MembershipStore,
    list_id: ListId,
) -> Result<ListDetail> {
    let detail = match gateway.list_detail(list_id).await {
        Ok(detail) => detail,
        Err(GatewayError::NotFound) => return Err(SyncError::ListUnavailable(list_id)),
        Err(e) => return Err(e.into()),
    };
    store.install_list(list_id, detail.ordered_set_ids());
    Ok(detail)
}
