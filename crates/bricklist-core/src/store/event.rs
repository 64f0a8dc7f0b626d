//! Events emitted by the membership store when the projection changes

use serde::{Deserialize, Serialize};

use bricklist_domain::{CollectionState, ListId, ReorderTarget, SetNum};

/// Change notification for mounted surfaces.
///
/// Emitted whenever the readable projection moves: optimistic applies,
/// rollbacks, order swaps, snapshot replacement, and logout. Commits do
/// not emit (the projection already showed the committed value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MembershipEvent {
    CollectionChanged {
        set_id: SetNum,
        state: CollectionState,
    },
    ListMembershipChanged {
        list_id: ListId,
        set_id: SetNum,
        member: bool,
    },
    OrderChanged {
        target: ReorderTarget,
    },
    SnapshotReplaced,
    Cleared,
}
