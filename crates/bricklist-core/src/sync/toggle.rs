//! Toggle controller: one membership-changing action, end to end

use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::gateway::{CollectionApi, GatewayError};
use crate::session::Session;
use crate::store::MembershipStore;
use bricklist_domain::{CollectionKind, CollectionState, ListId, SetNum};

/// Orchestrates membership toggles: optimistic apply, gateway call(s),
/// commit on success, rollback on failure. The same flow serves the two
/// system buckets and custom-list membership.
pub struct ToggleController<G> {
    gateway: Arc<G>,
    store: Arc<MembershipStore>,
    session: Arc<Session>,
}

impl<G: CollectionApi> ToggleController<G> {
    pub fn new(gateway: Arc<G>, store: Arc<MembershipStore>, session: Arc<Session>) -> Self {
        Self {
            gateway,
            store,
            session,
        }
    }

    /// Toggle the set's Owned membership. Returns the settled state.
    pub async fn toggle_owned(&self, set_id: &SetNum) -> Result<CollectionState> {
        self.toggle_collection(CollectionKind::Owned, set_id).await
    }

    /// Toggle the set's Wishlist membership. Returns the settled state.
    pub async fn toggle_wishlist(&self, set_id: &SetNum) -> Result<CollectionState> {
        self.toggle_collection(CollectionKind::Wishlist, set_id)
            .await
    }

    async fn toggle_collection(
        &self,
        kind: CollectionKind,
        set_id: &SetNum,
    ) -> Result<CollectionState> {
        self.session.require_token()?;

        let prior = self.store.collection_state(set_id);
        let desired = prior.toggled(kind);
        // One mutation covers both buckets: a combined move (on + implicit
        // clear of the other) rolls back as a unit.
        let ticket = self.store.apply_optimistic_collection(set_id, desired);

        match self.issue_collection_calls(kind, set_id, prior, desired).await {
            Ok(()) => {
                self.store.commit(&ticket);
                Ok(desired)
            }
            Err(e) => {
                warn!(set_id = %set_id, kind = kind.as_str(), error = %e,
                      "collection toggle failed, rolling back");
                self.store.rollback(&ticket);
                Err(e.into())
            }
        }
    }

    async fn issue_collection_calls(
        &self,
        kind: CollectionKind,
        set_id: &SetNum,
        prior: CollectionState,
        desired: CollectionState,
    ) -> std::result::Result<(), GatewayError> {
        if desired.in_bucket(kind) {
            self.add_to(kind, set_id).await?;
            if prior.in_bucket(kind.other()) {
                self.remove_from(kind.other(), set_id).await?;
            }
        } else {
            self.remove_from(kind, set_id).await?;
        }
        Ok(())
    }

    async fn add_to(
        &self,
        kind: CollectionKind,
        set_id: &SetNum,
    ) -> std::result::Result<(), GatewayError> {
        match kind {
            CollectionKind::Owned => self.gateway.add_to_owned(set_id).await,
            CollectionKind::Wishlist => self.gateway.add_to_wishlist(set_id).await,
        }
    }

    async fn remove_from(
        &self,
        kind: CollectionKind,
        set_id: &SetNum,
    ) -> std::result::Result<(), GatewayError> {
        match kind {
            CollectionKind::Owned => self.gateway.remove_from_owned(set_id).await,
            CollectionKind::Wishlist => self.gateway.remove_from_wishlist(set_id).await,
        }
    }

    /// Toggle the set's membership in one custom list. Independent of the
    /// system buckets; nothing cascades. Returns the settled membership.
    pub async fn toggle_list_membership(&self, list_id: ListId, set_id: &SetNum) -> Result<bool> {
        self.session.require_token()?;

        let member = self.store.lists_containing(set_id).contains(&list_id);
        let desired = !member;
        let ticket = self.store.apply_optimistic_list(list_id, set_id, desired);

        let result = if desired {
            self.gateway.add_item_to_list(list_id, set_id).await
        } else {
            self.gateway.remove_item_from_list(list_id, set_id).await
        };

        match result {
            Ok(()) => {
                self.store.commit(&ticket);
                Ok(desired)
            }
            Err(e) => {
                warn!(set_id = %set_id, list_id, error = %e,
                      "list toggle failed, rolling back");
                self.store.rollback(&ticket);
                Err(e.into())
            }
        }
    }
}
