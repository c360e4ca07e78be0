//! Membership-gated governance for the Agora facility.
//!
//! Lifecycle: Open (voting until the deadline) → Expired (deadline passed,
//! awaiting execution) → Executed (terminal).
//!
//! Key principle: one vote per held membership item, aggregated per principal.
//! A principal votes once per proposal; every item they hold that has not yet
//! been counted on that proposal adds one to their weight.
//!
//! Approved proposals spend the treasury on the governed item through the
//! [`Marketplace`] collaborator. Rejected proposals close without moving funds.

pub mod engine;
pub mod error;
pub mod marketplace;
pub mod proposal;
pub mod rights;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use marketplace::{Marketplace, MarketplaceError};
pub use proposal::{ExecutionOutcome, Proposal, ProposalState, VoteChoice};
pub use rights::VotingRightsOracle;
