mod interfaces;
mod journal;
mod strategy;
mod types;
mod utils;

pub use interfaces::{Bridge, ManagerGate, PriceOracle, SingleManager, Token, Vault};
pub use journal::{Journal, JournalEntry, StrategyEvent};
pub use strategy::{BridgeStrategy, Operation, OperationLedger, StrategyData, StrategySettings};
pub use types::PriceSample;
pub use utils::error::{StrategyError, StrategyResult};
