//! Exchange-specific errors.

use agora_ledger::LedgerError;
use agora_types::{Principal, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("invalid reserves: input {input_reserve}, output {output_reserve}")]
    InvalidReserves {
        input_reserve: u128,
        output_reserve: u128,
    },

    #[error("token amount {offered} is below the {required} required at the current price")]
    InsufficientTokenAmount { required: u128, offered: u128 },

    #[error("insufficient output amount: computed {computed}, minimum {minimum}")]
    InsufficientOutputAmount { computed: u128, minimum: u128 },

    #[error("insufficient liquidity shares for {owner}: need {needed}, have {available}")]
    InsufficientBalance {
        owner: Principal,
        needed: u128,
        available: u128,
    },

    #[error("token ledger: {0}")]
    Ledger(#[from] LedgerError),

    #[error("invalid address: {0}")]
    InvalidAddress(Principal),

    #[error("invalid exchange parameters: {0}")]
    InvalidParams(#[from] TypesError),

    #[error("arithmetic overflow in exchange computation")]
    Overflow,

    #[error("pool invariant violated: {0}")]
    InvariantViolated(String),
}
