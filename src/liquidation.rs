//! Liquidation settlement.
//!
//! Once a maker is undercollateralized, a liquidator may take over part or all
//! of its position together with a proportional slice of its margin. The
//! slice is rounded so the part of the account left behind is never less
//! collateralized than before: up when closing a long, down when closing a
//! short.

use crate::balance::Balance;
use crate::eligibility::is_eligible;
use crate::fixed_point::{get_fraction, get_fraction_round_up, MathError};
use crate::types::{Price, SignedAmount};
use serde::{Deserialize, Serialize};

/// What the liquidator asks for. `is_buy` is from the taker's side: buying
/// closes a long maker, selling closes a short one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub amount: u128,
    pub is_buy: bool,
    pub all_or_nothing: bool,
}

impl TradeRequest {
    pub fn buy(amount: u128) -> Self {
        Self {
            amount,
            is_buy: true,
            all_or_nothing: false,
        }
    }

    pub fn sell(amount: u128) -> Self {
        Self {
            amount,
            is_buy: false,
            all_or_nothing: false,
        }
    }

    pub fn all_or_nothing(mut self) -> Self {
        self.all_or_nothing = true;
        self
    }
}

// 5.1: provenance of a trade result. bit values are shared with the fee and
// settlement code downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraderFlag {
    Orders,
    Liquidation,
    Deleveraging,
}

impl TraderFlag {
    pub fn bits(&self) -> u8 {
        match self {
            TraderFlag::Orders => 1,
            TraderFlag::Liquidation => 2,
            TraderFlag::Deleveraging => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResult {
    pub margin_amount: u128,
    pub position_amount: u128,
    pub is_buy: bool,
    pub trader_flag: TraderFlag,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiquidationError {
    #[error("cannot liquidate since maker is not undercollateralized")]
    NotEligible,

    #[error("allOrNothing is set and maker position {available} is less than amount {requested}")]
    AllOrNothingUnsatisfiable { requested: u128, available: u128 },

    #[error("liquidation must not increase maker's position size (is_buy={is_buy}, position={position})")]
    DirectionMismatch { is_buy: bool, position: SignedAmount },

    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(#[from] MathError),
}

impl LiquidationError {
    /// Short machine-friendly label for logs and rejection events.
    pub fn reason(&self) -> &'static str {
        match self {
            LiquidationError::NotEligible => "maker_solvent",
            LiquidationError::AllOrNothingUnsatisfiable { .. } => "all_or_nothing_unsatisfiable",
            LiquidationError::DirectionMismatch { .. } => "direction_mismatch",
            LiquidationError::ArithmeticOverflow(_) => "arithmetic_overflow",
        }
    }
}

/// True when trading `amount` in direction `is_buy` shrinks `position`.
/// A flat position has no direction, so only an empty request fits it.
pub fn reduces_position(is_buy: bool, position: &SignedAmount, amount: u128) -> bool {
    if position.is_zero() {
        return amount == 0;
    }
    is_buy == position.is_positive()
}

pub fn verify_trade(
    request: &TradeRequest,
    maker: &Balance,
    eligible: bool,
) -> Result<(), LiquidationError> {
    if !eligible {
        return Err(LiquidationError::NotEligible);
    }

    let available = maker.position.magnitude();
    if request.all_or_nothing && available < request.amount {
        return Err(LiquidationError::AllOrNothingUnsatisfiable {
            requested: request.amount,
            available,
        });
    }

    if !reduces_position(request.is_buy, &maker.position, request.amount) {
        return Err(LiquidationError::DirectionMismatch {
            is_buy: request.is_buy,
            position: maker.position,
        });
    }

    Ok(())
}

/// Effective close size. Oversized requests are capped at the maker's position.
pub fn close_amount(request: &TradeRequest, maker: &Balance) -> u128 {
    request.amount.min(maker.position.magnitude())
}

/// Margin that moves with `amount` of the maker's position, keeping the
/// maker's margin-per-unit ratio. Rounded up when closing a long.
pub fn margin_amount(maker: &Balance, amount: u128, is_buy: bool) -> Result<u128, MathError> {
    if amount == 0 {
        return Ok(0);
    }
    let margin = maker.margin.magnitude();
    let position = maker.position.magnitude();
    if is_buy {
        get_fraction_round_up(margin, amount, position)
    } else {
        get_fraction(margin, amount, position)
    }
}

pub fn settle(
    request: &TradeRequest,
    maker: &Balance,
    eligible: bool,
) -> Result<TradeResult, LiquidationError> {
    verify_trade(request, maker, eligible)?;

    let position_amount = close_amount(request, maker);
    let margin_amount = margin_amount(maker, position_amount, request.is_buy)?;

    Ok(TradeResult {
        margin_amount,
        position_amount,
        is_buy: request.is_buy,
        trader_flag: TraderFlag::Liquidation,
    })
}

/// Full decision for an already authorized liquidator: eligibility at
/// `price`, then settlement.
pub fn evaluate_liquidation(
    maker: &Balance,
    price: Price,
    min_collateral: u128,
    request: &TradeRequest,
) -> Result<TradeResult, LiquidationError> {
    let eligible = is_eligible(maker, price, min_collateral);
    settle(request, maker, eligible)
}
