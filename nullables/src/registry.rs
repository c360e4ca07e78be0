//! Nullable membership registry: who holds which item, and which items are listed.

use agora_governance::VotingRightsOracle;
use agora_types::{ItemId, Principal};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// An in-memory membership registry for testing.
///
/// Every item is governable unless explicitly delisted.
#[derive(Default)]
pub struct NullRegistry {
    owners: Mutex<BTreeMap<ItemId, Principal>>,
    delisted: Mutex<BTreeSet<ItemId>>,
}

impl NullRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `item` to `owner`, replacing any previous holder.
    pub fn assign(&self, item: ItemId, owner: Principal) {
        self.owners.lock().unwrap().insert(item, owner);
    }

    /// Remove `item` from whoever holds it.
    pub fn revoke(&self, item: ItemId) {
        self.owners.lock().unwrap().remove(&item);
    }

    /// Mark `item` as no longer governable (e.g. sold elsewhere).
    pub fn delist(&self, item: ItemId) {
        self.delisted.lock().unwrap().insert(item);
    }

    pub fn relist(&self, item: ItemId) {
        self.delisted.lock().unwrap().remove(&item);
    }

    pub fn owner_of(&self, item: ItemId) -> Option<Principal> {
        self.owners.lock().unwrap().get(&item).copied()
    }
}

impl VotingRightsOracle for NullRegistry {
    fn controls(&self, principal: &Principal, item: ItemId) -> bool {
        self.owner_of(item).as_ref() == Some(principal)
    }

    fn is_governable(&self, item: ItemId) -> bool {
        !self.delisted.lock().unwrap().contains(&item)
    }

    fn items_of(&self, principal: &Principal) -> Vec<ItemId> {
        self.owners
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, owner)| *owner == principal)
            .map(|(item, _)| *item)
            .collect()
    }
}
