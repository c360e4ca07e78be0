use std::sync::Arc;

use proptest::prelude::*;

use agora_governance::{
    ExecutionOutcome, GovernanceEngine, GovernanceError, ProposalState, VoteChoice,
};
use agora_nullables::{NullMarketplace, NullRegistry};
use agora_types::{GovernanceParams, ItemId, Principal, Timestamp};

const PERIOD: u64 = 300;
const PRICE: u128 = 1_000;

fn principal(n: u8) -> Principal {
    Principal::from_bytes([n; 20])
}

/// Engine over a registry where item `i` is held by `principal(owners[i])`.
/// Item 0 always belongs to principal 1, who opens proposal 0.
fn engine_with(owners: &[u8], treasury: u128) -> (GovernanceEngine, Arc<NullMarketplace>) {
    let registry = Arc::new(NullRegistry::new());
    registry.assign(ItemId::new(0), principal(1));
    for (i, owner) in owners.iter().enumerate() {
        registry.assign(ItemId::new(i as u64 + 1), principal(*owner));
    }
    let market = Arc::new(NullMarketplace::new(PRICE));
    let mut engine = GovernanceEngine::new(
        principal(0xAD),
        GovernanceParams {
            voting_period_secs: PERIOD,
        },
        registry,
        market.clone(),
    )
    .unwrap();
    engine.deposit_treasury(&principal(0xAD), treasury).unwrap();
    engine
        .create_proposal(&principal(1), ItemId::new(0), Timestamp::new(0))
        .unwrap();
    (engine, market)
}

proptest! {
    /// Every held item is counted exactly once, however the votes fall.
    #[test]
    fn tally_counts_each_item_once(
        owners in prop::collection::vec(1u8..6, 0..24),
        ballots in prop::collection::vec((1u8..6, any::<bool>()), 0..12),
    ) {
        let (mut engine, _) = engine_with(&owners, 0);
        let mut counted = 0u64;
        for (voter, yay) in ballots {
            let choice = if yay { VoteChoice::Yay } else { VoteChoice::Nay };
            if let Ok(weight) = engine.vote_on_proposal(&principal(voter), 0, choice, Timestamp::new(1)) {
                counted += weight;
            }
        }
        let proposal = engine.proposal(0).unwrap();
        prop_assert_eq!(proposal.total_votes(), counted);
        prop_assert_eq!(proposal.voted_items.len() as u64, counted);
        prop_assert!(counted <= owners.len() as u64 + 1);
    }

    /// A principal that voted once is always refused a second ballot.
    #[test]
    fn second_ballot_always_refused(
        owners in prop::collection::vec(1u8..4, 0..12),
        first_yay in any::<bool>(),
        second_yay in any::<bool>(),
    ) {
        let (mut engine, _) = engine_with(&owners, 0);
        let choice = |yay: bool| if yay { VoteChoice::Yay } else { VoteChoice::Nay };
        engine
            .vote_on_proposal(&principal(1), 0, choice(first_yay), Timestamp::new(1))
            .unwrap();
        let before = engine.proposal(0).unwrap().total_votes();

        let err = engine
            .vote_on_proposal(&principal(1), 0, choice(second_yay), Timestamp::new(2))
            .unwrap_err();
        prop_assert!(matches!(err, GovernanceError::AlreadyVoted(_)));
        prop_assert_eq!(engine.proposal(0).unwrap().total_votes(), before);
    }

    /// Execution happens once, spends the price only on approval, and never
    /// overdraws the treasury.
    #[test]
    fn execution_is_final(
        owners in prop::collection::vec(1u8..4, 0..12),
        votes in prop::collection::vec((1u8..4, any::<bool>()), 0..6),
        treasury in 0u128..3_000,
        late in 0u64..1_000,
    ) {
        let (mut engine, market) = engine_with(&owners, treasury);
        for (voter, yay) in votes {
            let choice = if yay { VoteChoice::Yay } else { VoteChoice::Nay };
            let _ = engine.vote_on_proposal(&principal(voter), 0, choice, Timestamp::new(1));
        }
        let passed = engine.proposal(0).unwrap().passed();
        let now = Timestamp::new(PERIOD + late);

        match engine.execute_proposal(0, now) {
            Ok(ExecutionOutcome::Purchased { cost, .. }) => {
                prop_assert!(passed);
                prop_assert_eq!(cost, PRICE);
                prop_assert_eq!(engine.treasury_balance(), treasury - PRICE);
                prop_assert!(market.is_sold(ItemId::new(0)));
            }
            Ok(ExecutionOutcome::Rejected) => {
                prop_assert!(!passed);
                prop_assert_eq!(engine.treasury_balance(), treasury);
            }
            Err(err) => {
                prop_assert!(passed && treasury < PRICE);
                prop_assert!(
                    matches!(err, GovernanceError::InsufficientFunds { .. }),
                    "unexpected error: {}",
                    err
                );
                prop_assert_eq!(engine.proposal_state(0, now).unwrap(), ProposalState::Expired);
                return Ok(());
            }
        }

        prop_assert_eq!(engine.proposal_state(0, now).unwrap(), ProposalState::Executed);
        let again = engine.execute_proposal(0, now);
        prop_assert!(matches!(again, Err(GovernanceError::AlreadyExecuted(0))));
    }
}
