#![allow(dead_code)]

//! In-memory gateway fake for controller tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use bricklist_core::gateway::{CollectionApi, GatewayError};
use bricklist_core::http::HttpError;
use bricklist_core::{MembershipStore, Session, Snapshot};
use bricklist_domain::{
    CatalogSet, ListDetail, ListId, ListItem, ListSummary, ReorderTarget, SetNum,
};

/// Failure classes a test can inject per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Server,
    NotAllowed,
    Network,
}

impl Failure {
    fn to_error(self) -> GatewayError {
        match self {
            Failure::Server => GatewayError::Server {
                status: 503,
                message: "maintenance".into(),
            },
            Failure::NotAllowed => GatewayError::NotAllowed {
                message: "not allowed".into(),
            },
            Failure::Network => GatewayError::Http(HttpError::Timeout),
        }
    }
}

#[derive(Default)]
struct FakeState {
    owned: Vec<SetNum>,
    wishlist: Vec<SetNum>,
    lists: HashMap<ListId, Vec<SetNum>>,
    calls: Vec<String>,
    persisted: Vec<(ReorderTarget, Vec<SetNum>)>,
    fail_once: HashMap<String, Failure>,
}

/// Gateway fake mirroring the server contract: membership mutations are
/// idempotent, persist-order validates the permutation. With a gate, every
/// operation waits for a semaphore permit before executing so tests can
/// observe the optimistic window and control resolution timing.
pub struct FakeApi {
    state: Mutex<FakeState>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState::default()),
            gate: None,
        })
    }

    /// A fake whose operations block until the returned semaphore gets a
    /// permit.
    pub fn gated() -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let fake = Arc::new(Self {
            state: Mutex::new(FakeState::default()),
            gate: Some(gate.clone()),
        });
        (fake, gate)
    }

    pub fn seed_owned(&self, ids: &[&str]) {
        self.state.lock().unwrap().owned = ids.iter().map(|s| SetNum::new(*s)).collect();
    }

    pub fn seed_wishlist(&self, ids: &[&str]) {
        self.state.lock().unwrap().wishlist = ids.iter().map(|s| SetNum::new(*s)).collect();
    }

    pub fn seed_list(&self, list_id: ListId, ids: &[&str]) {
        self.state
            .lock()
            .unwrap()
            .lists
            .insert(list_id, ids.iter().map(|s| SetNum::new(*s)).collect());
    }

    /// Make the named operation fail on its next execution.
    pub fn fail_once(&self, op: &str, failure: Failure) {
        self.state
            .lock()
            .unwrap()
            .fail_once
            .insert(op.to_string(), failure);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn persisted(&self) -> Vec<(ReorderTarget, Vec<SetNum>)> {
        self.state.lock().unwrap().persisted.clone()
    }

    pub fn owned_members(&self) -> Vec<SetNum> {
        self.state.lock().unwrap().owned.clone()
    }

    pub fn list_members(&self, list_id: ListId) -> Vec<SetNum> {
        self.state
            .lock()
            .unwrap()
            .lists
            .get(&list_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Wait for a permit (when gated), then record the call and apply any
    /// injected failure.
    async fn enter(&self, op: &str) -> Result<(), GatewayError> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        let mut st = self.state.lock().unwrap();
        st.calls.push(op.to_string());
        match st.fail_once.remove(op) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

fn add_member(members: &mut Vec<SetNum>, set_id: &SetNum) {
    if !members.contains(set_id) {
        members.push(set_id.clone());
    }
}

fn remove_member(members: &mut Vec<SetNum>, set_id: &SetNum) {
    members.retain(|s| s != set_id);
}

fn rows(members: &[SetNum]) -> Vec<CatalogSet> {
    members
        .iter()
        .map(|id| CatalogSet::new(id.clone(), format!("Set {}", id)))
        .collect()
}

impl CollectionApi for FakeApi {
    async fn add_to_owned(&self, set_id: &SetNum) -> Result<(), GatewayError> {
        self.enter("add_to_owned").await?;
        add_member(&mut self.state.lock().unwrap().owned, set_id);
        Ok(())
    }

    async fn remove_from_owned(&self, set_id: &SetNum) -> Result<(), GatewayError> {
        self.enter("remove_from_owned").await?;
        remove_member(&mut self.state.lock().unwrap().owned, set_id);
        Ok(())
    }

    async fn add_to_wishlist(&self, set_id: &SetNum) -> Result<(), GatewayError> {
        self.enter("add_to_wishlist").await?;
        add_member(&mut self.state.lock().unwrap().wishlist, set_id);
        Ok(())
    }

    async fn remove_from_wishlist(&self, set_id: &SetNum) -> Result<(), GatewayError> {
        self.enter("remove_from_wishlist").await?;
        remove_member(&mut self.state.lock().unwrap().wishlist, set_id);
        Ok(())
    }

    async fn owned_sets(&self) -> Result<Vec<CatalogSet>, GatewayError> {
        self.enter("owned_sets").await?;
        Ok(rows(&self.state.lock().unwrap().owned))
    }

    async fn wishlist_sets(&self) -> Result<Vec<CatalogSet>, GatewayError> {
        self.enter("wishlist_sets").await?;
        Ok(rows(&self.state.lock().unwrap().wishlist))
    }

    async fn my_lists(&self) -> Result<Vec<ListSummary>, GatewayError> {
        self.enter("my_lists").await?;
        let st = self.state.lock().unwrap();
        let mut ids: Vec<ListId> = st.lists.keys().copied().collect();
        ids.sort();
        Ok(ids
            .into_iter()
            .map(|id| ListSummary {
                id,
                title: format!("List {}", id),
                description: None,
                is_public: true,
                items_count: st.lists[&id].len() as u32,
                created_at: None,
                updated_at: None,
            })
            .collect())
    }

    async fn list_detail(&self, list_id: ListId) -> Result<ListDetail, GatewayError> {
        self.enter("list_detail").await?;
        let st = self.state.lock().unwrap();
        let items = st.lists.get(&list_id).ok_or(GatewayError::NotFound)?;
        Ok(ListDetail {
            id: list_id,
            title: format!("List {}", list_id),
            description: None,
            is_public: true,
            items: items
                .iter()
                .enumerate()
                .map(|(idx, id)| ListItem::new(id.clone(), idx as u32))
                .collect(),
            created_at: None,
            updated_at: None,
        })
    }

    async fn add_item_to_list(
        &self,
        list_id: ListId,
        set_id: &SetNum,
    ) -> Result<(), GatewayError> {
        self.enter("add_item_to_list").await?;
        let mut st = self.state.lock().unwrap();
        let items = st.lists.entry(list_id).or_default();
        add_member(items, set_id);
        Ok(())
    }

    async fn remove_item_from_list(
        &self,
        list_id: ListId,
        set_id: &SetNum,
    ) -> Result<(), GatewayError> {
        self.enter("remove_item_from_list").await?;
        let mut st = self.state.lock().unwrap();
        if let Some(items) = st.lists.get_mut(&list_id) {
            remove_member(items, set_id);
        }
        Ok(())
    }

    async fn persist_list_order(
        &self,
        target: ReorderTarget,
        ordered: &[SetNum],
    ) -> Result<(), GatewayError> {
        self.enter("persist_list_order").await?;
        let mut st = self.state.lock().unwrap();
        let members = match target {
            ReorderTarget::Wishlist => &mut st.wishlist,
            ReorderTarget::List(id) => st.lists.entry(id).or_default(),
        };
        let mut have: Vec<SetNum> = members.clone();
        let mut want: Vec<SetNum> = ordered.to_vec();
        have.sort();
        want.sort();
        if have != want {
            return Err(GatewayError::Server {
                status: 400,
                message: "order is not a permutation of the list".into(),
            });
        }
        *members = ordered.to_vec();
        st.persisted.push((target, ordered.to_vec()));
        Ok(())
    }
}

/// Store + signed-in session wired for a controller test.
pub fn signed_in_fixture() -> (Arc<MembershipStore>, Arc<Session>) {
    (
        Arc::new(MembershipStore::new()),
        Arc::new(Session::signed_in("test-token")),
    )
}

/// Install a snapshot directly, as a reconciliation fetch would.
pub fn seed_store(store: &MembershipStore, owned: &[&str], wishlist: &[&str]) {
    store.replace_snapshot(Snapshot {
        owned: owned.iter().map(|s| SetNum::new(*s)).collect(),
        wishlist: wishlist.iter().map(|s| SetNum::new(*s)).collect(),
        lists: HashMap::new(),
    });
}

/// Let spawned tasks run up to their next suspension point.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
