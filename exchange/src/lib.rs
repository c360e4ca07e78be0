//! Constant-product exchange between the base asset (ether) and one token.
//!
//! Prices follow `x * y = k` with a fee retained by the pool:
//! `out = in·f·R_out / (R_in·SCALE + in·f)` where `f = SCALE − fee_bps`.
//! All divisions truncate, so rounding always favours the pool.
//!
//! The ether reserve is an engine-owned counter. The token reserve is the
//! exchange's live balance on the token ledger, captured before any inbound
//! transfer of the operation being priced.
//!
//! Liquidity providers hold shares: the first deposit mints one share per
//! unit of ether and fixes the initial price; later deposits must match it.

pub mod error;
pub mod exchange;
pub mod math;
pub mod receipt;

pub use error::ExchangeError;
pub use exchange::Exchange;
pub use math::{get_amount_out, mul_div};
pub use receipt::{LiquidityReceipt, PoolSnapshot, WithdrawalReceipt};
