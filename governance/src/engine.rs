//! Core governance engine: proposals, votes, execution, treasury.
//!
//! Every mutator validates completely before touching state, so an error
//! always leaves the engine exactly as it was. The host serialises calls
//! (one lock per engine) and passes `now` from its clock.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::GovernanceError;
use crate::marketplace::Marketplace;
use crate::proposal::{ExecutionOutcome, Proposal, ProposalState, VoteChoice};
use crate::rights::VotingRightsOracle;
use agora_types::{GovernanceParams, ItemId, Principal, Timestamp};
use agora_utils::format_duration;
use tracing::{debug, info, warn};

/// The governance engine.
///
/// Owns the proposal list and the treasury. Membership data and the
/// purchase effect come from collaborators.
pub struct GovernanceEngine {
    params: GovernanceParams,
    admin: Principal,
    treasury: u128,
    proposals: Vec<Proposal>,
    oracle: Arc<dyn VotingRightsOracle>,
    marketplace: Arc<dyn Marketplace>,
}

impl GovernanceEngine {
    pub fn new(
        admin: Principal,
        params: GovernanceParams,
        oracle: Arc<dyn VotingRightsOracle>,
        marketplace: Arc<dyn Marketplace>,
    ) -> Result<Self, GovernanceError> {
        params.validate()?;
        Ok(Self {
            params,
            admin,
            treasury: 0,
            proposals: Vec::new(),
            oracle,
            marketplace,
        })
    }

    /// Open a proposal over `item_id`. Returns its index.
    pub fn create_proposal(
        &mut self,
        caller: &Principal,
        item_id: ItemId,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        if !self.oracle.controls(caller, item_id) {
            return Err(GovernanceError::NotEligible {
                principal: *caller,
                item: item_id,
            });
        }
        if !self.oracle.is_governable(item_id) {
            return Err(GovernanceError::ItemUnavailable(item_id));
        }

        let index = self.proposals.len() as u64;
        let proposal = Proposal::new(index, item_id, *caller, now, self.params.voting_period_secs);
        info!(
            index,
            item = %item_id,
            proposer = %caller,
            deadline = %proposal.deadline,
            "proposal created, voting open for {}",
            format_duration(self.params.voting_period_secs)
        );
        self.proposals.push(proposal);
        Ok(index)
    }

    /// Cast `caller`'s ballot. Returns the weight counted.
    pub fn vote_on_proposal(
        &mut self,
        caller: &Principal,
        index: u64,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        let oracle = Arc::clone(&self.oracle);
        let proposal = self.proposal_mut(index)?;
        if now >= proposal.deadline {
            return Err(GovernanceError::DeadlineExceeded {
                index,
                deadline: proposal.deadline,
            });
        }
        if proposal.has_voted(caller) {
            return Err(GovernanceError::AlreadyVoted(*caller));
        }

        let counted: BTreeSet<ItemId> = oracle
            .items_of(caller)
            .into_iter()
            .filter(|item| !proposal.voted_items.contains(item))
            .filter(|item| oracle.controls(caller, *item))
            .collect();
        let weight = counted.len() as u64;
        if weight == 0 {
            return Err(GovernanceError::NoVotingPower(*caller));
        }

        let tally = match choice {
            VoteChoice::Yay => &mut proposal.yay_votes,
            VoteChoice::Nay => &mut proposal.nay_votes,
        };
        *tally = tally.checked_add(weight).ok_or(GovernanceError::Overflow)?;
        proposal.voters.insert(*caller);
        proposal.voted_items.extend(counted);

        debug!(
            index,
            voter = %caller,
            ?choice,
            weight,
            yay = proposal.yay_votes,
            nay = proposal.nay_votes,
            "vote recorded"
        );
        Ok(weight)
    }

    /// Close a proposal whose deadline has passed. Permissionless.
    pub fn execute_proposal(
        &mut self,
        index: u64,
        now: Timestamp,
    ) -> Result<ExecutionOutcome, GovernanceError> {
        let treasury = self.treasury;
        let marketplace = Arc::clone(&self.marketplace);
        let proposal = self.proposal_mut(index)?;
        if now < proposal.deadline {
            return Err(GovernanceError::DeadlineNotExceeded {
                index,
                deadline: proposal.deadline,
            });
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(index));
        }

        let outcome = if proposal.passed() {
            let cost = marketplace.price(proposal.item_id);
            if treasury < cost {
                return Err(GovernanceError::InsufficientFunds {
                    needed: cost,
                    available: treasury,
                });
            }
            marketplace.purchase(proposal.item_id, cost)?;
            ExecutionOutcome::Purchased {
                item_id: proposal.item_id,
                cost,
            }
        } else {
            ExecutionOutcome::Rejected
        };

        proposal.executed = true;
        proposal.outcome = Some(outcome.clone());
        info!(
            index,
            yay = proposal.yay_votes,
            nay = proposal.nay_votes,
            turnout = proposal.total_votes(),
            ?outcome,
            "proposal executed"
        );

        if let ExecutionOutcome::Purchased { cost, .. } = outcome {
            // cost <= treasury was checked above
            self.treasury = treasury - cost;
        }
        Ok(outcome)
    }

    /// Credit inbound base-asset funds. Returns the new treasury balance.
    pub fn deposit_treasury(
        &mut self,
        from: &Principal,
        amount: u128,
    ) -> Result<u128, GovernanceError> {
        self.treasury = self
            .treasury
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        debug!(from = %from, amount, treasury = self.treasury, "treasury deposit");
        Ok(self.treasury)
    }

    /// Pay the whole treasury out to the administrator. Returns the amount.
    pub fn withdraw_treasury(&mut self, caller: &Principal) -> Result<u128, GovernanceError> {
        self.ensure_admin(caller)?;
        let amount = std::mem::take(&mut self.treasury);
        info!(admin = %caller, amount, "treasury withdrawn");
        Ok(amount)
    }

    /// Hand administration to another principal.
    pub fn transfer_admin(
        &mut self,
        caller: &Principal,
        new_admin: Principal,
    ) -> Result<(), GovernanceError> {
        self.ensure_admin(caller)?;
        info!(from = %caller, to = %new_admin, "administrator changed");
        self.admin = new_admin;
        Ok(())
    }

    pub fn proposal(&self, index: u64) -> Result<&Proposal, GovernanceError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.proposals.get(i))
            .ok_or(GovernanceError::UnknownProposal(index))
    }

    pub fn proposal_state(
        &self,
        index: u64,
        now: Timestamp,
    ) -> Result<ProposalState, GovernanceError> {
        Ok(self.proposal(index)?.state(now))
    }

    pub fn has_voted(&self, index: u64, principal: &Principal) -> Result<bool, GovernanceError> {
        Ok(self.proposal(index)?.has_voted(principal))
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    pub fn treasury_balance(&self) -> u128 {
        self.treasury
    }

    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    fn proposal_mut(&mut self, index: u64) -> Result<&mut Proposal, GovernanceError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.proposals.get_mut(i))
            .ok_or(GovernanceError::UnknownProposal(index))
    }

    fn ensure_admin(&self, caller: &Principal) -> Result<(), GovernanceError> {
        if *caller != self.admin {
            warn!(caller = %caller, "privileged call rejected");
            return Err(GovernanceError::Unauthorized(*caller));
        }
        Ok(())
    }
}
