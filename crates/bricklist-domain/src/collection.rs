//! System collection buckets and per-set membership state

use serde::{Deserialize, Serialize};

/// One of the two system-reserved buckets every account has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Owned,
    Wishlist,
}

impl CollectionKind {
    /// Path segment used by the collection endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Owned => "owned",
            CollectionKind::Wishlist => "wishlist",
        }
    }

    pub fn other(&self) -> CollectionKind {
        match self {
            CollectionKind::Owned => CollectionKind::Wishlist,
            CollectionKind::Wishlist => CollectionKind::Owned,
        }
    }
}

/// A set's combined membership across the two system buckets.
///
/// Invariant: `owned` and `wishlisted` are never both true. The constructors
/// below are the only ways controller code builds a desired state, so the
/// exclusive pair cannot be produced by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectionState {
    pub owned: bool,
    pub wishlisted: bool,
}

impl CollectionState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn owned() -> Self {
        Self {
            owned: true,
            wishlisted: false,
        }
    }

    pub fn wishlisted() -> Self {
        Self {
            owned: false,
            wishlisted: true,
        }
    }

    /// State with the given bucket set and the other implicitly cleared.
    pub fn only(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Owned => Self::owned(),
            CollectionKind::Wishlist => Self::wishlisted(),
        }
    }

    pub fn in_bucket(&self, kind: CollectionKind) -> bool {
        match kind {
            CollectionKind::Owned => self.owned,
            CollectionKind::Wishlist => self.wishlisted,
        }
    }

    /// The state after toggling `kind`: turning a bucket on clears the other,
    /// turning it off leaves the other untouched.
    pub fn toggled(&self, kind: CollectionKind) -> Self {
        if self.in_bucket(kind) {
            let mut next = *self;
            match kind {
                CollectionKind::Owned => next.owned = false,
                CollectionKind::Wishlist => next.wishlisted = false,
            }
            next
        } else {
            Self::only(kind)
        }
    }
}
