//! Results returned to callers and read-only pool views.

use agora_types::Principal;
use serde::{Deserialize, Serialize};

/// What a successful `add_liquidity` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityReceipt {
    pub ether_deposited: u128,
    /// Tokens pulled from the provider. On a live pool this is the amount
    /// required at the current price, not the maximum offered.
    pub tokens_deposited: u128,
    pub shares_minted: u128,
}

/// What a successful `remove_liquidity` paid out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    pub shares_burned: u128,
    pub ether_out: u128,
    pub tokens_out: u128,
}

/// Point-in-time view of the pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub exchange: Principal,
    pub token: Principal,
    pub ether_reserve: u128,
    pub token_reserve: u128,
    pub total_shares: u128,
    pub fee_bps: u32,
}

impl PoolSnapshot {
    pub fn is_initialized(&self) -> bool {
        self.total_shares > 0
    }
}
