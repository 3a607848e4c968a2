// 9.0.2: result types and errors for engine operations.

use crate::events::LiquidatedEvent;
use crate::liquidation::{LiquidationError, TradeResult};
use crate::types::AccountId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidationOutcome {
    pub result: TradeResult,
    pub event: LiquidatedEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("sender {sender} does not have permissions for the taker {taker}")]
    Unauthorized { sender: AccountId, taker: AccountId },

    #[error("liquidation rejected: {0}")]
    Rejected(#[from] LiquidationError),
}

impl EngineError {
    pub fn reason(&self) -> &'static str {
        match self {
            EngineError::Unauthorized { .. } => "unauthorized",
            EngineError::Rejected(err) => err.reason(),
        }
    }
}
