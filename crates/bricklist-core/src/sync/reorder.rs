//! Reorder controller: manual item reordering with persistence

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::{Result, SyncError};
use crate::gateway::CollectionApi;
use crate::session::Session;
use crate::store::MembershipStore;
use bricklist_domain::{ReorderTarget, SetNum};

#[derive(Default)]
struct ReorderSession {
    /// Last order the server confirmed; what a failed save reverts to.
    confirmed: Vec<SetNum>,
    saving: bool,
    /// Latest order produced while a save was in flight. Only the newest
    /// survives; intermediate orders are never sent.
    queued: Option<Vec<SetNum>>,
}

/// Applies a candidate ordering optimistically, persists it, and reverts
/// to the retained order on failure. At most one persist call is in
/// flight per target; newer intents queue and the latest one wins.
pub struct ReorderController<G> {
    gateway: Arc<G>,
    store: Arc<MembershipStore>,
    session: Arc<Session>,
    sessions: Mutex<HashMap<ReorderTarget, ReorderSession>>,
}

impl<G: CollectionApi> ReorderController<G> {
    pub fn new(gateway: Arc<G>, store: Arc<MembershipStore>, session: Arc<Session>) -> Self {
        Self {
            gateway,
            store,
            session,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Reorder a target to `new_order`.
    ///
    /// The new order must be a permutation of the currently displayed
    /// members. If a save is already in flight for this target the call
    /// applies the order optimistically, queues it, and returns; the call
    /// owning the in-flight save drives it to the server and any failure
    /// is reported there.
    pub async fn reorder(&self, target: ReorderTarget, new_order: Vec<SetNum>) -> Result<()> {
        self.session.require_token()?;

        {
            let mut sessions = self.sessions.lock().unwrap();
            let current = self.store.order(target);
            let entry = sessions.entry(target).or_default();

            if !is_permutation(&new_order, &current) {
                return Err(SyncError::InvalidReorder);
            }

            if entry.saving {
                debug!(?target, "save in flight, queueing latest order");
                entry.queued = Some(new_order.clone());
                self.store.set_order(target, new_order);
                return Ok(());
            }

            entry.confirmed = current;
            entry.saving = true;
            self.store.set_order(target, new_order.clone());
        }

        let mut desired = new_order;
        loop {
            let result = self.gateway.persist_list_order(target, &desired).await;

            let mut sessions = self.sessions.lock().unwrap();
            let entry = sessions
                .get_mut(&target)
                .expect("reorder session exists while saving");

            if let Err(e) = result {
                match entry.queued.take() {
                    Some(next) => {
                        // A newer intent is already displayed; the stale
                        // failure must not revert it.
                        debug!(?target, error = %e, "superseded save failed, trying latest order");
                        desired = next;
                        drop(sessions);
                        continue;
                    }
                    None => {
                        entry.saving = false;
                        let confirmed = entry.confirmed.clone();
                        drop(sessions);
                        warn!(?target, error = %e, "reorder failed, reverting to confirmed order");
                        self.store.set_order(target, confirmed);
                        return Err(e.into());
                    }
                }
            }

            entry.confirmed = desired.clone();
            match entry.queued.take() {
                Some(next) => {
                    desired = next;
                    drop(sessions);
                }
                None => {
                    entry.saving = false;
                    return Ok(());
                }
            }
        }
    }
}

/// Same members, any order.
fn is_permutation(a: &[SetNum], b: &[SetNum]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_sorted = a.to_vec();
    let mut b_sorted = b.to_vec();
    a_sorted.sort();
    b_sorted.sort();
    a_sorted == b_sorted
}
