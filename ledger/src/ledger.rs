//! The `FungibleLedger` trait: balances, transfers and delegated pulls.

use crate::error::LedgerError;
use agora_types::Principal;

/// A single fungible asset.
///
/// Implementations use interior mutability: the exchange holds the ledger
/// behind an `Arc` shared with other holders of the token. Every mutating
/// call either applies fully or returns an error with no effect.
pub trait FungibleLedger: Send + Sync {
    /// The address of the token itself.
    fn token_address(&self) -> Principal;

    fn balance_of(&self, owner: &Principal) -> u128;

    fn total_supply(&self) -> u128;

    /// Remaining amount `spender` may pull from `owner`.
    fn allowance(&self, owner: &Principal, spender: &Principal) -> u128;

    /// Set the allowance of `spender` over `owner`'s balance (replaces any prior value).
    fn approve(&self, owner: &Principal, spender: &Principal, amount: u128)
        -> Result<(), LedgerError>;

    /// Move `amount` from `from` to `to`.
    fn transfer(&self, from: &Principal, to: &Principal, amount: u128) -> Result<(), LedgerError>;

    /// Move `amount` from `owner` to `to` on behalf of `spender`, consuming allowance.
    fn transfer_from(
        &self,
        owner: &Principal,
        spender: &Principal,
        to: &Principal,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Create `amount` new units credited to `to`.
    fn mint(&self, to: &Principal, amount: u128) -> Result<(), LedgerError>;
}
