//! Interfaces to the rest of the exchange, plus in-memory versions of each.
//!
//! The engine only reads through these. Storage, permission management and
//! risk parameters are owned elsewhere; the in-memory types exist for the
//! simulation binary and tests.

use crate::balance::Balance;
use crate::config::{ConfigError, LiquidationConfig};
use crate::types::AccountId;
use dashmap::{DashMap, DashSet};

pub trait BalanceStore: Send + Sync {
    /// Unknown accounts read as the zero balance.
    fn get_account_balance(&self, account: AccountId) -> Balance;
}

pub trait PermissionService: Send + Sync {
    /// Whether `operator` may act on behalf of `account`.
    fn has_account_permissions(&self, account: AccountId, operator: AccountId) -> bool;
}

pub trait RiskParameterSource: Send + Sync {
    /// Minimum collateral ratio scaled by BASE.
    fn get_min_collateral(&self) -> u128;
}

#[derive(Debug, Default)]
pub struct InMemoryBalances {
    balances: DashMap<AccountId, Balance>,
}

impl InMemoryBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, account: AccountId, balance: Balance) {
        self.balances.insert(account, balance);
    }
}

impl BalanceStore for InMemoryBalances {
    fn get_account_balance(&self, account: AccountId) -> Balance {
        self.balances
            .get(&account)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }
}

// 8.1: (account, operator) pairs. an account always has permission over itself
// at the engine level, so it never needs an entry here.
#[derive(Debug, Default)]
pub struct PermissionTable {
    grants: DashSet<(AccountId, AccountId)>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, account: AccountId, operator: AccountId) {
        self.grants.insert((account, operator));
    }

    pub fn revoke(&self, account: AccountId, operator: AccountId) {
        self.grants.remove(&(account, operator));
    }
}

impl PermissionService for PermissionTable {
    fn has_account_permissions(&self, account: AccountId, operator: AccountId) -> bool {
        self.grants.contains(&(account, operator))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticRiskParams {
    min_collateral: u128,
}

impl StaticRiskParams {
    pub fn new(min_collateral: u128) -> Self {
        Self { min_collateral }
    }

    pub fn from_config(config: &LiquidationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.min_collateral_fixed()?))
    }
}

impl RiskParameterSource for StaticRiskParams {
    fn get_min_collateral(&self) -> u128 {
        self.min_collateral
    }
}
