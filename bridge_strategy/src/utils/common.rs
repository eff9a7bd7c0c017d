//! Common helper functions that are used across the engine

use alloy_primitives::{I256, U256};

use super::error::{arithmetic_err, StrategyError, StrategyResult};

/// Returns `10^decimals` as a `U256`
pub fn pow10(decimals: u8) -> StrategyResult<U256> {
    U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .ok_or_else(|| arithmetic_err("10^decimals exceeds U256"))
}

/// Computes `value * rate / scale` with truncating division
pub fn scale_by_rate(value: U256, rate: U256, scale: U256) -> StrategyResult<U256> {
    if scale.is_zero() {
        return Err(arithmetic_err("rate scale is zero"));
    }
    value
        .checked_mul(rate)
        .map(|product| product / scale)
        .ok_or_else(|| arithmetic_err("value * rate exceeds U256"))
}

/// Converts a raw signed oracle answer into an unsigned rate.
/// Fails unless the answer is strictly positive.
pub fn positive_rate(answer: I256) -> StrategyResult<U256> {
    if answer.is_positive() {
        Ok(answer.into_raw())
    } else {
        Err(StrategyError::InvalidRate(format!(
            "non-positive answer {answer}"
        )))
    }
}
