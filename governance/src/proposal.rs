//! Governance proposals and their lifecycle.

use agora_types::{ItemId, Principal, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A ballot choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    Yay,
    Nay,
}

/// Where a proposal sits in its lifecycle at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// `now < deadline`: votes are accepted.
    Open,
    /// Deadline passed, not yet executed.
    Expired,
    /// Terminal. Execution happened (approved or rejected).
    Executed,
}

/// What execution did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    /// Yay won: the item was bought out of the treasury.
    Purchased { item_id: ItemId, cost: u128 },
    /// Nay won or tied: closed with no fund movement.
    Rejected,
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    /// Position in the append-only proposal list.
    pub index: u64,
    /// The governed item this proposal is about.
    pub item_id: ItemId,
    /// Who created it.
    pub proposer: Principal,
    pub created_at: Timestamp,
    /// Voting closes at this instant (exclusive).
    pub deadline: Timestamp,
    pub yay_votes: u64,
    pub nay_votes: u64,
    pub executed: bool,
    /// Set once, on execution.
    pub outcome: Option<ExecutionOutcome>,
    /// Principals that have cast a ballot.
    pub voters: BTreeSet<Principal>,
    /// Items whose vote has already been counted.
    pub voted_items: BTreeSet<ItemId>,
}

impl Proposal {
    pub fn new(
        index: u64,
        item_id: ItemId,
        proposer: Principal,
        created_at: Timestamp,
        voting_period_secs: u64,
    ) -> Self {
        Self {
            index,
            item_id,
            proposer,
            created_at,
            deadline: created_at.plus(voting_period_secs),
            yay_votes: 0,
            nay_votes: 0,
            executed: false,
            outcome: None,
            voters: BTreeSet::new(),
            voted_items: BTreeSet::new(),
        }
    }

    pub fn state(&self, now: Timestamp) -> ProposalState {
        if self.executed {
            ProposalState::Executed
        } else if now < self.deadline {
            ProposalState::Open
        } else {
            ProposalState::Expired
        }
    }

    pub fn has_voted(&self, principal: &Principal) -> bool {
        self.voters.contains(principal)
    }

    /// Strict majority of counted weight. Ties reject.
    pub fn passed(&self) -> bool {
        self.yay_votes > self.nay_votes
    }

    pub fn total_votes(&self) -> u64 {
        self.yay_votes.saturating_add(self.nay_votes)
    }
}
