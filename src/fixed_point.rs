//! Fixed-point arithmetic shared across the crate.
//!
//! Every quantity is an unsigned integer scaled by [`BASE`] (18 decimals).
//! Balances, prices and ratios are `u128`, so a product of two of them always
//! fits in a `U256` and a product of two `U256` values always fits in a
//! `U512`. The helpers here lean on that to stay overflow free without
//! checked arithmetic on the hot path.

use primitive_types::{U256, U512};
use rust_decimal::Decimal;

pub const BASE_DECIMALS: u32 = 18;

pub const BASE: u128 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("division by zero")]
    DivisionByZero,

    #[error("negative value {0} cannot be represented as a fixed-point magnitude")]
    NegativeValue(Decimal),

    #[error("value {0} is out of the fixed-point range")]
    OutOfRange(Decimal),
}

pub fn base() -> U256 {
    U256::from(BASE)
}

/// `value * base_value / BASE`, rounded down. Never overflows for `u128` inputs.
pub fn base_mul(value: u128, base_value: u128) -> U256 {
    U256::from(value) * U256::from(base_value) / base()
}

/// `target * numerator / denominator`, rounded down.
pub fn get_fraction(target: u128, numerator: u128, denominator: u128) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    let product = U256::from(target) * U256::from(numerator);
    narrow(product / U256::from(denominator), "get_fraction")
}

/// `target * numerator / denominator`, rounded up.
pub fn get_fraction_round_up(
    target: u128,
    numerator: u128,
    denominator: u128,
) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    if target == 0 || numerator == 0 {
        return Ok(0);
    }
    let product = U256::from(target) * U256::from(numerator);
    let quotient = (product - U256::one()) / U256::from(denominator) + U256::one();
    narrow(quotient, "get_fraction_round_up")
}

/// `a * b < c * d`, with both products taken at 512 bits.
pub fn product_lt(a: U256, b: U256, c: U256, d: U256) -> bool {
    let lhs: U512 = a.full_mul(b);
    let rhs: U512 = c.full_mul(d);
    lhs < rhs
}

fn narrow(value: U256, context: &'static str) -> Result<u128, MathError> {
    if value > U256::from(u128::MAX) {
        return Err(MathError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Converts a non-negative decimal into fixed point. Digits past the 18th
/// decimal are truncated.
pub fn from_decimal(value: Decimal) -> Result<u128, MathError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MathError::NegativeValue(value));
    }
    let mantissa = value.mantissa().unsigned_abs();
    let scale = value.scale();

    if scale <= BASE_DECIMALS {
        mantissa
            .checked_mul(10u128.pow(BASE_DECIMALS - scale))
            .ok_or(MathError::OutOfRange(value))
    } else {
        Ok(mantissa / 10u128.pow(scale - BASE_DECIMALS))
    }
}

/// Converts fixed point back into a normalized decimal. `None` once the value
/// no longer fits a 96-bit decimal mantissa.
pub fn to_decimal(value: u128) -> Option<Decimal> {
    let mantissa = i128::try_from(value).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, BASE_DECIMALS)
        .ok()
        .map(|d| d.normalize())
}

pub fn u256_to_decimal(value: U256) -> Option<Decimal> {
    if value > U256::from(u128::MAX) {
        return None;
    }
    to_decimal(value.low_u128())
}
