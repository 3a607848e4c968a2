// perps-liquidation: liquidation settlement for a perpetual futures exchange.
// decides whether a maker is undercollateralized at a price, and how much of
// its position and margin a liquidator takes over.
// all computation is deterministic, synchronous and side effect free.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: AccountId, Sign, SignedAmount, Price, Timestamp
//   2.x  fixed_point.rs: BASE scale, fractions, 512-bit product compare
//   3.x  balance.rs: Balance, positive/negative valuation
//   4.x  eligibility.rs: undercollateralization check
//   5.x  liquidation.rs: TradeRequest/TradeResult, preconditions, settlement
//   6.x  config.rs: min collateral, env presets
//   7.x  events.rs: liquidation event payloads
//   8.x  collaborators.rs: balance store, permissions, risk params
//   9.x  engine/: collaborator wiring, permission check, trade entry point

pub mod balance;
pub mod eligibility;
pub mod fixed_point;
pub mod liquidation;
pub mod types;

pub mod collaborators;
pub mod config;
pub mod engine;
pub mod events;

// re exports for convenience
pub use balance::*;
pub use eligibility::*;
pub use engine::*;
pub use events::*;
pub use liquidation::*;
pub use types::*;
pub use collaborators::{
    BalanceStore, InMemoryBalances, PermissionService, PermissionTable, RiskParameterSource,
    StaticRiskParams,
};
pub use config::{ConfigError, Environment, LiquidationConfig};
pub use fixed_point::{MathError, BASE, BASE_DECIMALS};
