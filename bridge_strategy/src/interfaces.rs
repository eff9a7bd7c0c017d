//! Collaborator boundaries of the engine.
//!
//! The bridge, the two tokens, the price oracle, the owning vault and the
//! manager gate are all external parties. The engine only ever talks to them
//! through these traits; tests substitute mocks or in-memory fakes.

use alloy_primitives::{Address, U256};

#[cfg(test)]
use mockall::automock;

use crate::types::PriceSample;
use crate::utils::error::StrategyResult;

/// The asynchronous settlement bridge.
///
/// Initiation files a request and returns the operator that will eventually
/// complete it. Finishing is only effective once the bridge has actually
/// processed the request; before that it is a no-op on balances.
#[cfg_attr(test, automock)]
pub trait Bridge {
    fn initiate_deposit(&self, amount: U256) -> StrategyResult<Address>;
    fn finish_deposit(&self, operator: Address) -> StrategyResult<()>;
    fn initiate_redeem(&self, amount: U256) -> StrategyResult<Address>;
    fn finish_redeem(&self, operator: Address) -> StrategyResult<()>;
}

/// A standard transferable balance object
#[cfg_attr(test, automock)]
pub trait Token {
    fn balance_of(&self, owner: Address) -> StrategyResult<U256>;
    fn transfer(&self, to: Address, amount: U256) -> StrategyResult<()>;
    fn approve(&self, spender: Address, amount: U256) -> StrategyResult<()>;
}

/// Read-only external price feed
#[cfg_attr(test, automock)]
pub trait PriceOracle {
    /// Latest sample published by the feed
    fn latest_sample(&self) -> StrategyResult<PriceSample>;
    /// Number of decimals the feed's answers are denominated in
    fn decimals(&self) -> StrategyResult<u8>;
}

/// The vault that owns this strategy.
/// Probed once at construction; proceeds are swept to its address afterwards.
#[cfg_attr(test, automock)]
pub trait Vault {
    fn underlying_token(&self) -> StrategyResult<Address>;
}

/// Authorization predicate for manager-gated operations.
///
/// The engine never decides who is a manager; it only asks. How the answer
/// is produced (role table, allowlist, signature check) is up to the host.
#[cfg_attr(test, automock)]
pub trait ManagerGate {
    fn is_manager(&self, caller: Address) -> bool;
}

/// Gate that recognizes exactly one manager account
pub struct SingleManager(pub Address);

impl ManagerGate for SingleManager {
    fn is_manager(&self, caller: Address) -> bool {
        caller == self.0
    }
}
