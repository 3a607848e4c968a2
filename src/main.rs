//! Liquidation settlement simulation.
//!
//! Walks through the liquidation decision for a handful of maker accounts:
//! partial closes, capped requests, rejected directions and solvent makers.
//! Set `LIQUIDATION_ENV` to `development`, `testnet` or `mainnet` to pick the
//! risk preset.

use perps_liquidation::*;
use rust_decimal_macros::dec;
use std::error::Error;
use std::sync::Arc;

const MAKER: AccountId = AccountId(1);
const LIQUIDATOR: AccountId = AccountId(2);
const KEEPER_BOT: AccountId = AccountId(3);

struct Sim {
    engine: LiquidationEngine,
    balances: Arc<InMemoryBalances>,
    permissions: Arc<PermissionTable>,
    events: EventCollector,
}

impl Sim {
    fn new(config: &LiquidationConfig) -> Result<Self, ConfigError> {
        let balances = Arc::new(InMemoryBalances::new());
        let permissions = Arc::new(PermissionTable::new());
        let risk = Arc::new(StaticRiskParams::from_config(config)?);
        let engine = LiquidationEngine::new(balances.clone(), permissions.clone(), risk);

        Ok(Self {
            engine,
            balances,
            permissions,
            events: EventCollector::new(),
        })
    }

    fn liquidate(&mut self, sender: AccountId, price: Price, request: TradeRequest) {
        match self.engine.trade(sender, MAKER, LIQUIDATOR, price, request) {
            Ok(outcome) => {
                println!(
                    "  -> close {} position units, move {} margin units (flag {})",
                    outcome.result.position_amount,
                    outcome.result.margin_amount,
                    outcome.result.trader_flag.bits()
                );
                self.events.record(EventPayload::Liquidated(outcome.event));
            }
            Err(err) => {
                println!("  -> rejected: {}", err);
                self.events
                    .record(EventPayload::LiquidationRejected(LiquidationRejectedEvent {
                        maker: MAKER,
                        taker: LIQUIDATOR,
                        reason: err.reason().to_string(),
                    }));
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let environment = match std::env::var("LIQUIDATION_ENV") {
        Ok(name) => name.parse::<Environment>()?,
        Err(_) => Environment::Development,
    };
    let config = environment.config();
    config.validate()?;

    println!("Liquidation Settlement Simulation");
    println!(
        "Environment {:?}, min collateral {}x\n",
        environment, config.min_collateral
    );

    let mut sim = Sim::new(&config)?;

    scenario_1_partial_long(&mut sim)?;
    scenario_2_direction_mismatch(&mut sim)?;
    scenario_3_all_or_nothing(&mut sim)?;
    scenario_4_rounding(&mut sim)?;
    scenario_5_solvent_and_permissions(&mut sim)?;

    println!("\n{} events recorded.", sim.events.events().len());
    Ok(())
}

/// Long maker with 1000 of debt and 100 units, valued at 5.
fn scenario_1_partial_long(sim: &mut Sim) -> Result<(), Box<dyn Error>> {
    println!("Scenario 1: Partial Liquidation of a Long\n");

    sim.balances.set_balance(
        MAKER,
        Balance::new(SignedAmount::negative(1000), SignedAmount::positive(100)),
    );
    let price = Price::from_decimal(dec!(5))?;

    println!("  Maker: margin -1000, position +100, price {}", price);
    println!("  Liquidator buys 40");
    sim.liquidate(LIQUIDATOR, price, TradeRequest::buy(40));
    println!();
    Ok(())
}

/// Short maker cannot be liquidated by a buy.
fn scenario_2_direction_mismatch(sim: &mut Sim) -> Result<(), Box<dyn Error>> {
    println!("Scenario 2: Direction Mismatch\n");

    sim.balances.set_balance(
        MAKER,
        Balance::new(SignedAmount::positive(1000), SignedAmount::negative(100)),
    );
    let price = Price::from_decimal(dec!(12))?;

    println!("  Maker: margin +1000, position -100, price {}", price);
    println!("  Liquidator buys 40");
    sim.liquidate(LIQUIDATOR, price, TradeRequest::buy(40));
    println!("  Liquidator sells 40");
    sim.liquidate(LIQUIDATOR, price, TradeRequest::sell(40));
    println!();
    Ok(())
}

/// Oversized request: rejected under all-or-nothing, capped otherwise.
fn scenario_3_all_or_nothing(sim: &mut Sim) -> Result<(), Box<dyn Error>> {
    println!("Scenario 3: All or Nothing\n");

    sim.balances.set_balance(
        MAKER,
        Balance::new(SignedAmount::negative(1000), SignedAmount::positive(100)),
    );
    let price = Price::from_decimal(dec!(5))?;

    println!("  Liquidator buys 150, all or nothing");
    sim.liquidate(LIQUIDATOR, price, TradeRequest::buy(150).all_or_nothing());
    println!("  Liquidator buys 150, partial fill allowed");
    sim.liquidate(LIQUIDATOR, price, TradeRequest::buy(150));
    println!();
    Ok(())
}

/// Uneven split: long closes round the margin up, short closes round down.
fn scenario_4_rounding(sim: &mut Sim) -> Result<(), Box<dyn Error>> {
    println!("Scenario 4: Directional Rounding\n");

    sim.balances.set_balance(
        MAKER,
        Balance::new(SignedAmount::negative(1000), SignedAmount::positive(300)),
    );
    let price = Price::from_decimal(dec!(2))?;
    println!("  Long maker: margin -1000, position +300, close 100");
    sim.liquidate(LIQUIDATOR, price, TradeRequest::buy(100));

    sim.balances.set_balance(
        MAKER,
        Balance::new(SignedAmount::positive(1000), SignedAmount::negative(300)),
    );
    let price = Price::from_decimal(dec!(3.2))?;
    println!("  Short maker: margin +1000, position -300, close 100");
    sim.liquidate(LIQUIDATOR, price, TradeRequest::sell(100));
    println!();
    Ok(())
}

/// Solvent makers are untouchable; bots need a grant from the liquidator.
fn scenario_5_solvent_and_permissions(sim: &mut Sim) -> Result<(), Box<dyn Error>> {
    println!("Scenario 5: Solvency and Permissions\n");

    sim.balances.set_balance(
        MAKER,
        Balance::new(SignedAmount::negative(1000), SignedAmount::positive(100)),
    );

    let healthy = Price::from_decimal(dec!(20))?;
    println!(
        "  At price {} liquidatable: {}",
        healthy,
        sim.engine.is_liquidatable(MAKER, healthy)
    );
    sim.liquidate(LIQUIDATOR, healthy, TradeRequest::buy(40));

    let crashed = Price::from_decimal(dec!(4))?;
    println!("  Keeper bot liquidates at {} without a grant", crashed);
    sim.liquidate(KEEPER_BOT, crashed, TradeRequest::buy(40));

    sim.permissions.grant(LIQUIDATOR, KEEPER_BOT);
    println!("  Keeper bot liquidates at {} after the grant", crashed);
    sim.liquidate(KEEPER_BOT, crashed, TradeRequest::buy(40));
    Ok(())
}
