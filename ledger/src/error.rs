use agora_types::Principal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient balance for {owner}: need {needed}, have {available}")]
    InsufficientBalance {
        owner: Principal,
        needed: u128,
        available: u128,
    },

    #[error("insufficient allowance from {owner} to {spender}: need {needed}, have {available}")]
    InsufficientAllowance {
        owner: Principal,
        spender: Principal,
        needed: u128,
        available: u128,
    },

    #[error("mint would exceed the maximum supply of {max_supply}")]
    SupplyCapExceeded { max_supply: u128 },

    #[error("cannot transfer to the zero address")]
    ZeroAddress,

    #[error("arithmetic overflow in ledger accounting")]
    Overflow,
}
