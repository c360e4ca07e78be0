//! Tunable parameters for the governance and exchange engines.
//!
//! Both structs are plain serde types so hosts can embed them in their own
//! configuration files.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};

/// Basis-point denominator. Fees are expressed as a fraction of this.
pub const BPS_SCALE: u128 = 10_000;

/// Parameters of the proposal lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Length of the voting window, counted from proposal creation.
    /// Default: 5 minutes.
    #[serde(default = "default_voting_period_secs")]
    pub voting_period_secs: u64,
}

/// Parameters of the constant-product pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeParams {
    /// Swap fee in basis points, retained by the pool.
    /// Default: 100 (1%), i.e. 99% of every input is priced.
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u32,
}

fn default_voting_period_secs() -> u64 {
    300
}

fn default_fee_bps() -> u32 {
    100
}

impl GovernanceParams {
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.voting_period_secs == 0 {
            return Err(TypesError::InvalidParam {
                name: "voting_period_secs",
                reason: "voting window must be non-zero".into(),
            });
        }
        Ok(())
    }
}

impl ExchangeParams {
    /// Portion of each input that is priced, in basis points.
    pub fn fee_factor(&self) -> u128 {
        BPS_SCALE - u128::from(self.fee_bps)
    }

    pub fn validate(&self) -> Result<(), TypesError> {
        if u128::from(self.fee_bps) >= BPS_SCALE {
            return Err(TypesError::InvalidParam {
                name: "fee_bps",
                reason: format!("{} must be below {}", self.fee_bps, BPS_SCALE),
            });
        }
        Ok(())
    }
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            voting_period_secs: default_voting_period_secs(),
        }
    }
}

impl Default for ExchangeParams {
    fn default() -> Self {
        Self {
            fee_bps: default_fee_bps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(GovernanceParams::default().voting_period_secs, 300);
        let exchange = ExchangeParams::default();
        assert_eq!(exchange.fee_bps, 100);
        assert_eq!(exchange.fee_factor(), 9_900);
    }

    #[test]
    fn test_validate_rejects_full_fee() {
        let params = ExchangeParams { fee_bps: 10_000 };
        assert!(params.validate().is_err());
        assert!(ExchangeParams { fee_bps: 0 }.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_window() {
        let params = GovernanceParams {
            voting_period_secs: 0,
        };
        assert!(params.validate().is_err());
    }
}
