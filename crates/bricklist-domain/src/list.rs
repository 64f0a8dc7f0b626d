//! Custom ordered lists and their items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::set_num::SetNum;

/// Server-assigned identifier of a custom list.
pub type ListId = i64;

/// An ordered surface whose item order the user can rearrange.
///
/// The Wishlist keeps a custom order of its own alongside the user's
/// custom lists, so both are addressable as reorder targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderTarget {
    Wishlist,
    List(ListId),
}

/// Summary of a custom list as returned by the list index endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_public: bool,
    pub items_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Membership record of one set within one list.
///
/// `position` determines display order and is dense within a list: after
/// every accepted add, remove, or reorder the positions are exactly
/// `0..N-1` with no duplicates or gaps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(alias = "set_num")]
    pub set_id: SetNum,
    #[serde(default)]
    pub note: Option<String>,
    pub position: u32,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

impl ListItem {
    pub fn new(set_id: impl Into<SetNum>, position: u32) -> Self {
        Self {
            set_id: set_id.into(),
            note: None,
            position,
            added_at: None,
        }
    }
}

/// Full detail of a custom list: metadata plus its ordered items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListDetail {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_public: bool,
    #[serde(default)]
    pub items: Vec<ListItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListDetail {
    /// Sort items by their server position, then renumber dense.
    ///
    /// Servers may hand back 1-based or gapped positions; after this call
    /// the items obey the dense `0..N-1` invariant.
    pub fn normalize(&mut self) {
        self.items.sort_by_key(|it| it.position);
        renumber(&mut self.items);
    }

    /// The ordered set identifiers of this list.
    pub fn ordered_set_ids(&self) -> Vec<SetNum> {
        self.items.iter().map(|it| it.set_id.clone()).collect()
    }
}

/// Rewrite positions as the dense sequence `0..N-1` in current item order.
pub fn renumber(items: &mut [ListItem]) {
    for (idx, item) in items.iter_mut().enumerate() {
        item.position = idx as u32;
    }
}
