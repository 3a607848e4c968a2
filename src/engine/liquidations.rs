//! Liquidation trades routed through the engine.

use super::core::LiquidationEngine;
use super::results::{EngineError, LiquidationOutcome};
use crate::balance::Balance;
use crate::eligibility::is_undercollateralized;
use crate::events::LiquidatedEvent;
use crate::liquidation::{settle, LiquidationError, TradeRequest, TradeResult};
use crate::types::{AccountId, Price};
use tracing::{debug, info, warn};

impl LiquidationEngine {
    /// Liquidate `maker` on behalf of `taker` at `price`.
    ///
    /// `sender` must be the taker or hold the taker's permission. Nothing is
    /// written; the caller applies the result and emits the event.
    pub fn trade(
        &self,
        sender: AccountId,
        maker: AccountId,
        taker: AccountId,
        price: Price,
        request: TradeRequest,
    ) -> Result<LiquidationOutcome, EngineError> {
        self.verify_permissions(sender, taker)?;

        let maker_balance = self.balances.get_account_balance(maker);
        let result = match self.evaluate(&maker_balance, price, &request) {
            Ok(result) => result,
            Err(err) => {
                warn!(
                    maker = %maker,
                    taker = %taker,
                    amount = %request.amount,
                    is_buy = request.is_buy,
                    reason = err.reason(),
                    "Liquidation rejected"
                );
                return Err(err.into());
            }
        };

        let taker_balance = self.balances.get_account_balance(taker);

        info!(
            maker = %maker,
            taker = %taker,
            amount = %result.position_amount,
            margin = %result.margin_amount,
            is_buy = result.is_buy,
            price = %price,
            "Maker liquidated"
        );

        Ok(LiquidationOutcome {
            result,
            event: LiquidatedEvent {
                maker,
                taker,
                amount: result.position_amount,
                is_buy: result.is_buy,
                maker_balance,
                taker_balance,
            },
        })
    }

    /// Eligibility plus settlement for a caller that already checked
    /// permissions.
    pub fn evaluate(
        &self,
        maker_balance: &Balance,
        price: Price,
        request: &TradeRequest,
    ) -> Result<TradeResult, LiquidationError> {
        let eligible = self.check_undercollateralized(maker_balance, price);
        let result = settle(request, maker_balance, eligible)?;

        debug!(
            requested = %request.amount,
            position_amount = %result.position_amount,
            margin_amount = %result.margin_amount,
            is_buy = result.is_buy,
            "Liquidation settled"
        );
        Ok(result)
    }

    pub fn is_liquidatable(&self, account: AccountId, price: Price) -> bool {
        let balance = self.balances.get_account_balance(account);
        self.check_undercollateralized(&balance, price)
    }

    fn check_undercollateralized(&self, balance: &Balance, price: Price) -> bool {
        let min_collateral = self.risk.get_min_collateral();
        let valuation = self.valuation.valuate(balance, price);
        let undercollateralized = is_undercollateralized(&valuation, min_collateral);

        debug!(
            positive = %valuation.positive,
            negative = %valuation.negative,
            ratio = ?valuation.collateralization(),
            min_collateral = %min_collateral,
            undercollateralized,
            "Eligibility checked"
        );
        undercollateralized
    }

    fn verify_permissions(&self, sender: AccountId, taker: AccountId) -> Result<(), EngineError> {
        if sender == taker || self.permissions.has_account_permissions(taker, sender) {
            return Ok(());
        }
        warn!(sender = %sender, taker = %taker, "Sender lacks taker permissions");
        Err(EngineError::Unauthorized { sender, taker })
    }
}
