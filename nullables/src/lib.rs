//! Nullable infrastructure for deterministic testing.
//!
//! Everything the engines consume from the outside world (clock, token
//! ledger, membership registry, marketplace) is abstracted behind a trait.
//! This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod ledger;
pub mod marketplace;
pub mod registry;

pub use clock::NullClock;
pub use ledger::NullLedger;
pub use marketplace::NullMarketplace;
pub use registry::NullRegistry;
