//! Pure pricing arithmetic.
//!
//! Reserves are raw `u128` units (wei for ether). Products of two reserves
//! routinely exceed `u128`, so proportional math goes through [`mul_div`],
//! which falls back to a `BigUint` product when `u128` would overflow.

use crate::error::ExchangeError;
use agora_types::BPS_SCALE;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// `floor(a * b / denominator)` without intermediate overflow.
///
/// Fails with `Overflow` if the denominator is zero or the quotient does
/// not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, ExchangeError> {
    if denominator == 0 {
        return Err(ExchangeError::Overflow);
    }
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denominator);
    }
    let quotient = BigUint::from(a) * BigUint::from(b) / BigUint::from(denominator);
    quotient.to_u128().ok_or(ExchangeError::Overflow)
}

/// Output of a fee-adjusted constant-product swap.
///
/// `fee_factor` is the priced share of the input in basis points
/// (`9_900` for a 1% fee). Fails with `InvalidReserves` if either reserve
/// is empty. Never mutates anything.
pub fn get_amount_out(
    input_amount: u128,
    input_reserve: u128,
    output_reserve: u128,
    fee_factor: u128,
) -> Result<u128, ExchangeError> {
    if input_reserve == 0 || output_reserve == 0 {
        return Err(ExchangeError::InvalidReserves {
            input_reserve,
            output_reserve,
        });
    }
    let input_with_fee = input_amount
        .checked_mul(fee_factor)
        .ok_or(ExchangeError::Overflow)?;
    let denominator = input_reserve
        .checked_mul(BPS_SCALE)
        .and_then(|scaled| scaled.checked_add(input_with_fee))
        .ok_or(ExchangeError::Overflow)?;
    mul_div(input_with_fee, output_reserve, denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_mul_div_small_values() {
        assert_eq!(mul_div(10, 20, 7).unwrap(), 28);
        assert_eq!(mul_div(0, 20, 7).unwrap(), 0);
        assert_eq!(mul_div(u128::MAX, 1, 1).unwrap(), u128::MAX);
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        // (2^100 * 2^100) / 2^90 = 2^110
        let a = 1u128 << 100;
        assert_eq!(mul_div(a, a, 1u128 << 90).unwrap(), 1u128 << 110);
        // u128::MAX * u128::MAX / u128::MAX = u128::MAX
        assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX).unwrap(), u128::MAX);
        // (MAX * 3) / 4, checked against the split form floor(MAX/4)*3 + floor((MAX%4)*3/4)
        let expected = (u128::MAX / 4) * 3 + (u128::MAX % 4) * 3 / 4;
        assert_eq!(mul_div(u128::MAX, 3, 4).unwrap(), expected);
    }

    #[test]
    fn test_mul_div_agrees_across_the_narrow_boundary() {
        // a * b just fits, then just doesn't: both paths must floor identically
        let a = u128::MAX / 3;
        assert_eq!(mul_div(a, 3, 7).unwrap(), a * 3 / 7);
        assert_eq!(mul_div(a + 1, 3, 3).unwrap(), a + 1);
        assert_eq!(mul_div(a + 1, 6, 6).unwrap(), a + 1);
        assert!(matches!(
            mul_div(u128::MAX, u128::MAX, u128::MAX - 1),
            Err(ExchangeError::Overflow)
        ));
    }

    #[test]
    fn test_mul_div_rejects_overflowing_quotient() {
        assert!(matches!(mul_div(u128::MAX, 2, 1), Err(ExchangeError::Overflow)));
        assert!(matches!(mul_div(1, 1, 0), Err(ExchangeError::Overflow)));
    }

    #[test]
    fn test_amount_out_rejects_empty_reserves() {
        assert!(matches!(
            get_amount_out(0, 0, 0, 9_900),
            Err(ExchangeError::InvalidReserves { .. })
        ));
        assert!(get_amount_out(10, 100, 0, 9_900).is_err());
        assert!(get_amount_out(10, 0, 100, 9_900).is_err());
    }

    #[test]
    fn test_amount_out_with_one_percent_fee() {
        // 100 * 9900 * 1000 / (1000 * 10000 + 100 * 9900) = 990_000_000 / 10_990_000 = 90.08
        assert_eq!(get_amount_out(100, 1_000, 1_000, 9_900).unwrap(), 90);
        // fee-free reference: 100 * 1000 / 1100 = 90.9
        assert_eq!(get_amount_out(100, 1_000, 1_000, 10_000).unwrap(), 90);
        assert_eq!(get_amount_out(0, 1_000, 1_000, 9_900).unwrap(), 0);
    }

    #[test]
    fn test_amount_out_at_wei_scale() {
        // 1 ether into a 100 ether / 1_000_000 token pool (18 decimals)
        let tokens = 1_000_000 * ONE_ETHER;
        let out = get_amount_out(ONE_ETHER, 100 * ONE_ETHER, tokens, 9_900).unwrap();
        let no_fee = tokens / 101;
        assert!(out < no_fee);
        assert!(out > no_fee * 98 / 100);
    }

    #[test]
    fn test_amount_out_never_drains_reserve() {
        let out = get_amount_out(u64::MAX as u128, 1, 1_000, 9_900).unwrap();
        assert!(out < 1_000);
    }
}
