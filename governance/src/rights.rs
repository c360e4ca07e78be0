//! Voting rights are supplied by the membership registry, not owned here.

use agora_types::{ItemId, Principal};

/// Answers who controls which membership items.
///
/// Implementations might be backed by an NFT contract, a whitelist, or an
/// in-memory registry in tests.
pub trait VotingRightsOracle: Send + Sync {
    /// Whether `principal` currently controls `item`.
    fn controls(&self, principal: &Principal, item: ItemId) -> bool;

    /// Whether `item` is in a state where proposals over it make sense
    /// (e.g. still listed and purchasable).
    fn is_governable(&self, item: ItemId) -> bool;

    /// Every item currently held by `principal`.
    fn items_of(&self, principal: &Principal) -> Vec<ItemId>;
}
