//! Client-side registry of saved public lists

use serde::{Deserialize, Serialize};

use bricklist_domain::ListId;

/// Bookmarked public list ids.
///
/// Pure local state: the registry never touches the gateway. Insertion
/// order is stable and duplicates collapse, so the serialized form is
/// what a host app persists and restores verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedLists {
    ids: Vec<ListId>,
}

impl SavedLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from previously persisted ids, collapsing duplicates while
    /// keeping first-seen order.
    pub fn from_ids(ids: impl IntoIterator<Item = ListId>) -> Self {
        let mut saved = Self::new();
        for id in ids {
            if !saved.is_saved(id) {
                saved.ids.push(id);
            }
        }
        saved
    }

    pub fn is_saved(&self, id: ListId) -> bool {
        self.ids.contains(&id)
    }

    /// Flip one id. Returns whether it is saved afterwards.
    pub fn toggle(&mut self, id: ListId) -> bool {
        if let Some(pos) = self.ids.iter().position(|&existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn ids(&self) -> &[ListId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
