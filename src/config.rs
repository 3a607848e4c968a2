// 6.0 config.rs: risk settings for the liquidation engine. human decimals in,
// fixed point out. presets per environment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::fixed_point::{self, MathError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidationConfig {
    // Minimum assets / liabilities ratio (e.g. 1.075 = 107.5%)
    pub min_collateral: Decimal,
    // Which preset this came from
    pub environment: Environment,
}

impl Default for LiquidationConfig {
    fn default() -> Self {
        Self {
            min_collateral: dec!(1.075),
            environment: Environment::Development,
        }
    }
}

impl LiquidationConfig {
    // Testnet runs with a wider buffer so liquidations trigger early
    pub fn testnet() -> Self {
        Self {
            min_collateral: dec!(1.1),
            environment: Environment::Testnet,
        }
    }

    pub fn mainnet() -> Self {
        Self {
            min_collateral: dec!(1.075),
            environment: Environment::Mainnet,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // below 1x an account with more assets than debt could never be
        // liquidated before going underwater
        if self.min_collateral < Decimal::ONE {
            return Err(ConfigError::InvalidMinCollateral {
                reason: format!("min collateral {} must be at least 1", self.min_collateral),
            });
        }
        self.min_collateral_fixed()?;
        Ok(())
    }

    /// Minimum collateral ratio scaled by BASE.
    pub fn min_collateral_fixed(&self) -> Result<u128, ConfigError> {
        fixed_point::from_decimal(self.min_collateral).map_err(ConfigError::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid min collateral: {reason}")]
    InvalidMinCollateral { reason: String },

    #[error("unknown environment '{0}'")]
    UnknownEnvironment(String),
}

impl From<MathError> for ConfigError {
    fn from(err: MathError) -> Self {
        ConfigError::InvalidMinCollateral {
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Testnet,
    Mainnet,
}

impl Environment {
    pub fn config(&self) -> LiquidationConfig {
        match self {
            Environment::Development => LiquidationConfig::default(),
            Environment::Testnet => LiquidationConfig::testnet(),
            Environment::Mainnet => LiquidationConfig::mainnet(),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testnet" => Ok(Environment::Testnet),
            "mainnet" => Ok(Environment::Mainnet),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}
