pub(crate) mod data;
pub(crate) mod ledger;
pub(crate) mod settings;
// As a safety measure, we want to know explicitly where we have access to the engine internals.
pub(in crate::strategy) mod engine;

pub use data::StrategyData;
pub use engine::BridgeStrategy;
pub use ledger::{Operation, OperationLedger};
pub use settings::StrategySettings;
