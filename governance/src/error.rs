use crate::marketplace::MarketplaceError;
use agora_types::{ItemId, Principal, Timestamp, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("{principal} does not control item {item}")]
    NotEligible { principal: Principal, item: ItemId },

    #[error("item {0} is not currently governable")]
    ItemUnavailable(ItemId),

    #[error("proposal {0} not found")]
    UnknownProposal(u64),

    #[error("voting on proposal {index} closed at {deadline}")]
    DeadlineExceeded { index: u64, deadline: Timestamp },

    #[error("proposal {index} is still open until {deadline}")]
    DeadlineNotExceeded { index: u64, deadline: Timestamp },

    #[error("{0} holds no uncounted items for this proposal")]
    NoVotingPower(Principal),

    #[error("{0} has already voted on this proposal")]
    AlreadyVoted(Principal),

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(u64),

    #[error("insufficient treasury funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("{0} is not the administrator")]
    Unauthorized(Principal),

    #[error("purchase failed: {0}")]
    Purchase(#[from] MarketplaceError),

    #[error("invalid governance parameters: {0}")]
    InvalidParams(#[from] TypesError),

    #[error("arithmetic overflow in governance accounting")]
    Overflow,
}
