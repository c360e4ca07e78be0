//! Fungible token ledger abstraction.
//!
//! The facility does not own the token it trades. It consumes a ledger that
//! maps principals to balances and supports ERC-20 style delegated pulls:
//! an owner approves a spender, the spender later moves up to that allowance.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::FungibleLedger;
