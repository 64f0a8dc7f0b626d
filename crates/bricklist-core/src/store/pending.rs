//! Pending optimistic mutations

use bricklist_domain::{CollectionState, ListId, SetNum};

/// Key identifying the state a mutation targets.
///
/// The two system buckets share one key per set: their exclusivity couples
/// them, so a combined Owned/Wishlist move is a single mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationKey {
    Collection(SetNum),
    List(ListId, SetNum),
}

/// The value a mutation reads or writes at its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationValue {
    Collection(CollectionState),
    ListMembership(bool),
}

/// A transient optimistic change awaiting server confirmation.
///
/// `prior` is the projected value at creation time, which is what a
/// rollback restores. At most one lives per key; a newer mutation on the
/// same key supersedes it by taking a higher generation.
#[derive(Debug, Clone)]
pub struct PendingMutation {
    pub prior: MutationValue,
    pub desired: MutationValue,
    pub generation: u64,
}

/// Handle for settling one optimistic mutation.
///
/// A ticket whose generation no longer matches the live mutation for its
/// key is stale: committing or rolling back through it is a no-op, which
/// is how a superseded in-flight response is prevented from clobbering a
/// newer intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTicket {
    pub(crate) key: MutationKey,
    pub(crate) generation: u64,
}
