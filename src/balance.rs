//! Account balances and their valuation at a price.
//!
//! A balance is a signed margin plus a signed position. Valuation splits its
//! net value into a non-negative asset side and a non-negative liability
//! side so that collateralization can be compared without signed math.

use crate::fixed_point::{self, base_mul};
use crate::types::{Price, SignedAmount};
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    pub margin: SignedAmount,
    pub position: SignedAmount,
}

impl Balance {
    pub fn new(margin: SignedAmount, position: SignedAmount) -> Self {
        Self { margin, position }
    }

    pub fn margin_is_positive(&self) -> bool {
        self.margin.is_positive()
    }

    pub fn position_is_positive(&self) -> bool {
        self.position.is_positive()
    }

    /// Splits the balance into `(positive, negative)` value at `price`.
    /// Position value is `position * price / BASE`, rounded down.
    pub fn positive_and_negative_value(&self, price: Price) -> Valuation {
        let mut positive = U256::zero();
        let mut negative = U256::zero();

        let margin = U256::from(self.margin.magnitude());
        if self.margin_is_positive() {
            positive = margin;
        } else {
            negative = margin;
        }

        let position_value = base_mul(self.position.magnitude(), price.value());
        if self.position_is_positive() {
            positive += position_value;
        } else {
            negative += position_value;
        }

        Valuation { positive, negative }
    }
}

// 3.1: both sides are magnitudes. u128 margin + u128*u128/BASE position value
// stays far below U256::MAX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    pub positive: U256,
    pub negative: U256,
}

impl Valuation {
    /// Assets over liabilities, for display. `None` when there are no
    /// liabilities or a side does not fit a decimal.
    pub fn collateralization(&self) -> Option<Decimal> {
        if self.negative.is_zero() {
            return None;
        }
        let positive = fixed_point::u256_to_decimal(self.positive)?;
        let negative = fixed_point::u256_to_decimal(self.negative)?;
        positive.checked_div(negative)
    }
}

/// Valuation routine used by the eligibility check. Swappable so a venue can
/// plug in its own mark-to-market rules.
pub trait BalanceValuation: Send + Sync {
    fn valuate(&self, balance: &Balance, price: Price) -> Valuation;
}

/// Values the position at the supplied price with no haircuts.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkToMarket;

impl BalanceValuation for MarkToMarket {
    fn valuate(&self, balance: &Balance, price: Price) -> Valuation {
        balance.positive_and_negative_value(price)
    }
}
