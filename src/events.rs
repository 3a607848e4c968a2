// 7.0: liquidation events for off-chain observability. the engine only builds
// payloads; emitting them is up to whoever applies the trade.

use crate::balance::Balance;
use crate::types::{AccountId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    Liquidated(LiquidatedEvent),
    LiquidationRejected(LiquidationRejectedEvent),
}

// balances are the pre-trade snapshots the result was computed against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidatedEvent {
    pub maker: AccountId,
    pub taker: AccountId,
    pub amount: u128,
    pub is_buy: bool,
    pub maker_balance: Balance,
    pub taker_balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationRejectedEvent {
    pub maker: AccountId,
    pub taker: AccountId,
    pub reason: String,
}

pub trait EventEmitter {
    fn emit(&mut self, event: Event);
}

#[derive(Debug)]
pub struct EventCollector {
    events: Vec<Event>,
    next_id: u64,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Stamps `payload` with the next id and the current time.
    pub fn record(&mut self, payload: EventPayload) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.emit(Event::new(id, Timestamp::now(), payload));
        id
    }
}

impl Default for EventCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEmitter for EventCollector {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignedAmount;

    fn liquidated() -> EventPayload {
        EventPayload::Liquidated(LiquidatedEvent {
            maker: AccountId(1),
            taker: AccountId(2),
            amount: 40,
            is_buy: true,
            maker_balance: Balance::new(SignedAmount::negative(1000), SignedAmount::positive(100)),
            taker_balance: Balance::default(),
        })
    }

    #[test]
    fn event_collector() {
        let mut collector = EventCollector::new();

        let first = collector.record(liquidated());
        let second = collector.record(EventPayload::LiquidationRejected(
            LiquidationRejectedEvent {
                maker: AccountId(1),
                taker: AccountId(2),
                reason: "maker_solvent".to_string(),
            },
        ));

        assert_eq!(first, EventId(1));
        assert_eq!(second, EventId(2));
        assert_eq!(collector.events().len(), 2);
        assert_eq!(collector.events()[0].payload, liquidated());
        assert!(collector.events()[1].timestamp >= collector.events()[0].timestamp);
    }
}
