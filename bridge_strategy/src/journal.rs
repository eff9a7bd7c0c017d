use alloy_primitives::{Address, U256};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Lifecycle events emitted by the engine.
///
/// Consumed by off-engine observers (indexers, dashboards); the engine's
/// only responsibility is to record them in lifecycle order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyEvent {
    DepositInitiated {
        operator: Address,
        amount: U256,
    },
    DepositFinished {
        operator: Address,
        amount: U256,
        received: U256,
    },
    RedeemInitiated {
        operator: Address,
        amount: U256,
    },
    RedeemFinished {
        operator: Address,
        amount: U256,
        redeemed: U256,
    },
}

/// Journal entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Wall-clock timestamp of the entry, in seconds
    pub timestamp: i64,
    pub event: StrategyEvent,
}

impl JournalEntry {
    /// Create a new instance of a journal entry
    /// Fills the `timestamp` field with the current time
    pub fn new(event: StrategyEvent) -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            event,
        }
    }
}

/// Append-only journal of strategy events
#[derive(Clone, Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Commits an event to the journal
    pub fn record(&mut self, event: StrategyEvent) {
        info!(?event, "strategy event");
        self.entries.push(JournalEntry::new(event));
    }

    /// All recorded entries, oldest first
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Removes and returns all recorded entries
    pub fn drain(&mut self) -> Vec<JournalEntry> {
        std::mem::take(&mut self.entries)
    }
}
