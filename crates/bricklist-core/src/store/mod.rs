//! Membership state store
//!
//! The process-wide, authoritative-as-known view of membership. Surfaces
//! read it synchronously; every write goes through the toggle/reorder
//! controllers. Reads combine the last-fetched server snapshot with any
//! live pending mutations, a pending mutation always winning over the
//! snapshot it targets.

mod event;
mod pending;

pub use event::MembershipEvent;
pub use pending::{MutationKey, MutationTicket, MutationValue, PendingMutation};

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use tracing::debug;

use bricklist_domain::{CollectionState, ListId, ReorderTarget, SetNum};

/// Server-confirmed membership baseline.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub owned: HashSet<SetNum>,
    /// Wishlist membership in its saved custom order.
    pub wishlist: Vec<SetNum>,
    /// Ordered items of each known custom list.
    pub lists: HashMap<ListId, Vec<SetNum>>,
}

struct Inner {
    snapshot: Snapshot,
    pending: HashMap<MutationKey, PendingMutation>,
    next_generation: u64,
    subscribers: Vec<Sender<MembershipEvent>>,
}

/// Shared store of snapshot + optimistic overlay. Created at session
/// start, cleared at logout.
pub struct MembershipStore {
    inner: Mutex<Inner>,
}

impl Default for MembershipStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MembershipStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                snapshot: Snapshot::default(),
                pending: HashMap::new(),
                next_generation: 0,
                subscribers: Vec::new(),
            }),
        }
    }

    // ----- reads -----

    pub fn collection_state(&self, set_id: &SetNum) -> CollectionState {
        self.inner.lock().unwrap().projected_collection(set_id)
    }

    pub fn is_owned(&self, set_id: &SetNum) -> bool {
        self.collection_state(set_id).owned
    }

    pub fn is_wishlisted(&self, set_id: &SetNum) -> bool {
        self.collection_state(set_id).wishlisted
    }

    /// Identifiers of every custom list currently containing the set.
    pub fn lists_containing(&self, set_id: &SetNum) -> BTreeSet<ListId> {
        let inner = self.inner.lock().unwrap();
        let mut out: BTreeSet<ListId> = inner
            .snapshot
            .lists
            .iter()
            .filter(|(_, items)| items.contains(set_id))
            .map(|(id, _)| *id)
            .collect();
        for (key, p) in &inner.pending {
            if let (MutationKey::List(list_id, set), MutationValue::ListMembership(member)) =
                (key, p.desired)
            {
                if set == set_id {
                    if member {
                        out.insert(*list_id);
                    } else {
                        out.remove(list_id);
                    }
                }
            }
        }
        out
    }

    /// The displayed ordering of a reorder target, pending overlay applied.
    pub fn order(&self, target: ReorderTarget) -> Vec<SetNum> {
        self.inner.lock().unwrap().projected_order(target)
    }

    // ----- optimistic writes (controller-driven) -----

    /// Record an optimistic change to a set's system-bucket membership.
    ///
    /// The desired state is applied to the projection immediately; both
    /// buckets are covered by the one mutation, so a combined move rolls
    /// back as a unit.
    pub fn apply_optimistic_collection(
        &self,
        set_id: &SetNum,
        desired: CollectionState,
    ) -> MutationTicket {
        debug_assert!(
            !(desired.owned && desired.wishlisted),
            "a set is never in both system buckets"
        );
        let mut inner = self.inner.lock().unwrap();
        let key = MutationKey::Collection(set_id.clone());
        let prior = MutationValue::Collection(inner.projected_collection(set_id));
        let ticket = inner.insert_pending(key, prior, MutationValue::Collection(desired));
        inner.emit(MembershipEvent::CollectionChanged {
            set_id: set_id.clone(),
            state: desired,
        });
        ticket
    }

    /// Record an optimistic change to a set's membership in one list.
    pub fn apply_optimistic_list(
        &self,
        list_id: ListId,
        set_id: &SetNum,
        member: bool,
    ) -> MutationTicket {
        let mut inner = self.inner.lock().unwrap();
        let key = MutationKey::List(list_id, set_id.clone());
        let prior = MutationValue::ListMembership(inner.projected_list_membership(list_id, set_id));
        let ticket = inner.insert_pending(key, prior, MutationValue::ListMembership(member));
        inner.emit(MembershipEvent::ListMembershipChanged {
            list_id,
            set_id: set_id.clone(),
            member,
        });
        ticket
    }

    /// Fold the mutation's optimistic value into the confirmed snapshot.
    /// Returns false (and changes nothing) for a stale ticket.
    pub fn commit(&self, ticket: &MutationTicket) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.take_live(ticket) {
            Some(p) => {
                inner.fold(&ticket.key, p.desired);
                true
            }
            None => {
                debug!("commit for superseded mutation ignored");
                false
            }
        }
    }

    /// Restore the prior state captured when the mutation was created.
    /// Returns false (and changes nothing) for a stale ticket.
    pub fn rollback(&self, ticket: &MutationTicket) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.take_live(ticket) {
            Some(p) => {
                inner.fold(&ticket.key, p.prior);
                let event = match (&ticket.key, p.prior) {
                    (MutationKey::Collection(set_id), MutationValue::Collection(state)) => {
                        MembershipEvent::CollectionChanged {
                            set_id: set_id.clone(),
                            state,
                        }
                    }
                    (MutationKey::List(list_id, set_id), MutationValue::ListMembership(member)) => {
                        MembershipEvent::ListMembershipChanged {
                            list_id: *list_id,
                            set_id: set_id.clone(),
                            member,
                        }
                    }
                    // Key and value kinds always travel together.
                    _ => MembershipEvent::SnapshotReplaced,
                };
                inner.emit(event);
                true
            }
            None => {
                debug!("rollback for superseded mutation ignored");
                false
            }
        }
    }

    // ----- snapshot maintenance -----

    /// Install a reconciliation fetch as the new confirmed baseline.
    /// Live pending mutations keep overriding what they target.
    pub fn replace_snapshot(&self, snapshot: Snapshot) {
        let mut inner = self.inner.lock().unwrap();
        inner.snapshot = snapshot;
        inner.emit(MembershipEvent::SnapshotReplaced);
    }

    /// Install one list's confirmed ordering (after a detail fetch).
    pub fn install_list(&self, list_id: ListId, ordered: Vec<SetNum>) {
        let mut inner = self.inner.lock().unwrap();
        inner.snapshot.lists.insert(list_id, ordered);
        inner.emit(MembershipEvent::OrderChanged {
            target: ReorderTarget::List(list_id),
        });
    }

    /// Swap a target's displayed order. Used by the reorder controller for
    /// both the optimistic swap and the revert; membership is unchanged.
    pub fn set_order(&self, target: ReorderTarget, order: Vec<SetNum>) {
        let mut inner = self.inner.lock().unwrap();
        match target {
            ReorderTarget::Wishlist => inner.snapshot.wishlist = order,
            ReorderTarget::List(id) => {
                inner.snapshot.lists.insert(id, order);
            }
        }
        inner.emit(MembershipEvent::OrderChanged { target });
    }

    /// Drop everything (logout). Subscribers stay connected and observe
    /// the cleared state.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.snapshot = Snapshot::default();
        inner.pending.clear();
        inner.emit(MembershipEvent::Cleared);
    }

    /// Subscribe to projection changes.
    pub fn subscribe(&self) -> Receiver<MembershipEvent> {
        let (tx, rx) = mpsc::channel();
        self.inner.lock().unwrap().subscribers.push(tx);
        rx
    }
}

impl Inner {
    fn projected_collection(&self, set_id: &SetNum) -> CollectionState {
        if let Some(p) = self.pending.get(&MutationKey::Collection(set_id.clone())) {
            if let MutationValue::Collection(state) = p.desired {
                return state;
            }
        }
        CollectionState {
            owned: self.snapshot.owned.contains(set_id),
            wishlisted: self.snapshot.wishlist.contains(set_id),
        }
    }

    fn projected_list_membership(&self, list_id: ListId, set_id: &SetNum) -> bool {
        if let Some(p) = self
            .pending
            .get(&MutationKey::List(list_id, set_id.clone()))
        {
            if let MutationValue::ListMembership(member) = p.desired {
                return member;
            }
        }
        self.snapshot
            .lists
            .get(&list_id)
            .map(|items| items.contains(set_id))
            .unwrap_or(false)
    }

    fn projected_order(&self, target: ReorderTarget) -> Vec<SetNum> {
        let mut order = match target {
            ReorderTarget::Wishlist => self.snapshot.wishlist.clone(),
            ReorderTarget::List(id) => self.snapshot.lists.get(&id).cloned().unwrap_or_default(),
        };

        // Overlay pending membership changes: removals hide, additions
        // append in the order the mutations were applied.
        let mut additions: Vec<(u64, &SetNum)> = Vec::new();
        for (key, p) in &self.pending {
            let (set_id, member) = match (target, key, p.desired) {
                (
                    ReorderTarget::Wishlist,
                    MutationKey::Collection(set_id),
                    MutationValue::Collection(state),
                ) => (set_id, state.wishlisted),
                (
                    ReorderTarget::List(target_id),
                    MutationKey::List(list_id, set_id),
                    MutationValue::ListMembership(member),
                ) if *list_id == target_id => (set_id, member),
                _ => continue,
            };
            if member {
                if !order.contains(set_id) {
                    additions.push((p.generation, set_id));
                }
            } else {
                order.retain(|s| s != set_id);
            }
        }
        additions.sort_by_key(|(generation, _)| *generation);
        order.extend(additions.into_iter().map(|(_, s)| s.clone()));
        order
    }

    fn insert_pending(
        &mut self,
        key: MutationKey,
        prior: MutationValue,
        desired: MutationValue,
    ) -> MutationTicket {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.pending.insert(
            key.clone(),
            PendingMutation {
                prior,
                desired,
                generation,
            },
        );
        MutationTicket { key, generation }
    }

    /// Remove and return the pending mutation iff the ticket is current.
    fn take_live(&mut self, ticket: &MutationTicket) -> Option<PendingMutation> {
        let live = self
            .pending
            .get(&ticket.key)
            .is_some_and(|p| p.generation == ticket.generation);
        if live {
            self.pending.remove(&ticket.key)
        } else {
            None
        }
    }

    /// Write a settled value into the snapshot.
    fn fold(&mut self, key: &MutationKey, value: MutationValue) {
        match (key, value) {
            (MutationKey::Collection(set_id), MutationValue::Collection(state)) => {
                if state.owned {
                    self.snapshot.owned.insert(set_id.clone());
                } else {
                    self.snapshot.owned.remove(set_id);
                }
                let present = self.snapshot.wishlist.contains(set_id);
                if state.wishlisted && !present {
                    self.snapshot.wishlist.push(set_id.clone());
                } else if !state.wishlisted && present {
                    self.snapshot.wishlist.retain(|s| s != set_id);
                }
            }
            (MutationKey::List(list_id, set_id), MutationValue::ListMembership(member)) => {
                let items = self.snapshot.lists.entry(*list_id).or_default();
                let present = items.contains(set_id);
                if member && !present {
                    items.push(set_id.clone());
                } else if !member && present {
                    items.retain(|s| s != set_id);
                }
            }
            // Key and value kinds always travel together.
            _ => {}
        }
    }

    fn emit(&mut self, event: MembershipEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
