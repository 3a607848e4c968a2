// 9.0 engine/core.rs: the engine only holds handles to its collaborators.
// handles are fixed at construction; swapping one means building a new engine.

use crate::balance::{BalanceValuation, MarkToMarket};
use crate::collaborators::{BalanceStore, PermissionService, RiskParameterSource};
use std::fmt;
use std::sync::Arc;

/** 9.1: stateless between calls, so one instance can be shared across threads */
#[derive(Clone)]
pub struct LiquidationEngine {
    pub(super) balances: Arc<dyn BalanceStore>,
    pub(super) permissions: Arc<dyn PermissionService>,
    pub(super) risk: Arc<dyn RiskParameterSource>,
    pub(super) valuation: Arc<dyn BalanceValuation>,
}

impl LiquidationEngine {
    pub fn new(
        balances: Arc<dyn BalanceStore>,
        permissions: Arc<dyn PermissionService>,
        risk: Arc<dyn RiskParameterSource>,
    ) -> Self {
        Self {
            balances,
            permissions,
            risk,
            valuation: Arc::new(MarkToMarket),
        }
    }

    pub fn with_valuation(mut self, valuation: Arc<dyn BalanceValuation>) -> Self {
        self.valuation = valuation;
        self
    }

    pub fn min_collateral(&self) -> u128 {
        self.risk.get_min_collateral()
    }
}

impl fmt::Debug for LiquidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiquidationEngine")
            .field("min_collateral", &self.min_collateral())
            .finish_non_exhaustive()
    }
}
