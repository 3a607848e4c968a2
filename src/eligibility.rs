//! Undercollateralization check.
//!
//! An account is liquidatable when `positive * BASE < negative * min_collateral`.
//! Both products are taken at 512 bits. Sitting exactly on the minimum
//! ratio counts as solvent.

use crate::balance::{Balance, BalanceValuation, MarkToMarket, Valuation};
use crate::fixed_point::{base, product_lt};
use crate::types::Price;
use primitive_types::U256;

pub fn is_undercollateralized(valuation: &Valuation, min_collateral: u128) -> bool {
    product_lt(
        valuation.positive,
        base(),
        valuation.negative,
        U256::from(min_collateral),
    )
}

/// Eligibility with the default mark-to-market valuation.
pub fn is_eligible(balance: &Balance, price: Price, min_collateral: u128) -> bool {
    is_eligible_with(&MarkToMarket, balance, price, min_collateral)
}

pub fn is_eligible_with(
    valuation: &dyn BalanceValuation,
    balance: &Balance,
    price: Price,
    min_collateral: u128,
) -> bool {
    let value = valuation.valuate(balance, price);
    is_undercollateralized(&value, min_collateral)
}
