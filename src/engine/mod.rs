// 9.0: liquidation engine. wires the collaborators to the eligibility check
// and the settlement calculator. reads only, never mutates balances.

mod core;
mod liquidations;
mod results;

pub use core::LiquidationEngine;
pub use results::{EngineError, LiquidationOutcome};
