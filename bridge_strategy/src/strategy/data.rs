//! Mutable strategy accounting state

use alloy_primitives::U256;

use crate::utils::error::{arithmetic_err, StrategyResult};

/// Running totals of in-flight capital, plus the depletion flag.
///
/// `pending_deposits` and `pending_redeems` mirror the sums of the amounts
/// in the two operation ledgers; every ledger mutation goes through the
/// checked mutators below so the counters never drift.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrategyData {
    /// Unit-of-account amount committed to in-flight deposits
    pub pending_deposits: U256,
    /// Receipt-token amount committed to in-flight redemptions
    pub pending_redeems: U256,
    /// True only while the strategy holds no receipt exposure and no
    /// pending deposit that could later produce more
    pub fully_redeemed: bool,
}

impl StrategyData {
    /// Builder-style setter functions for the struct

    /// Set the pending deposit total
    pub fn pending_deposits(&mut self, pending_deposits: U256) -> &mut Self {
        self.pending_deposits = pending_deposits;
        self
    }

    /// Set the pending redemption total
    pub fn pending_redeems(&mut self, pending_redeems: U256) -> &mut Self {
        self.pending_redeems = pending_redeems;
        self
    }

    /// Set the depletion flag
    pub fn fully_redeemed(&mut self, fully_redeemed: bool) -> &mut Self {
        self.fully_redeemed = fully_redeemed;
        self
    }

    /// Records a newly filed deposit request
    pub fn file_deposit(&mut self, amount: U256) -> StrategyResult<()> {
        self.pending_deposits = self
            .pending_deposits
            .checked_add(amount)
            .ok_or_else(|| arithmetic_err("pending deposit total exceeds U256"))?;
        Ok(())
    }

    /// Settles a completed deposit request.
    /// Underflow here means the counter diverged from the deposit ledger.
    pub fn settle_deposit(&mut self, amount: U256) -> StrategyResult<()> {
        self.pending_deposits = self
            .pending_deposits
            .checked_sub(amount)
            .ok_or_else(|| arithmetic_err("pending deposit total underflow"))?;
        Ok(())
    }

    /// Records a newly filed redemption request
    pub fn file_redeem(&mut self, amount: U256) -> StrategyResult<()> {
        self.pending_redeems = self
            .pending_redeems
            .checked_add(amount)
            .ok_or_else(|| arithmetic_err("pending redemption total exceeds U256"))?;
        Ok(())
    }

    /// Settles a completed redemption request.
    /// Underflow here means the counter diverged from the redeem ledger.
    pub fn settle_redeem(&mut self, amount: U256) -> StrategyResult<()> {
        self.pending_redeems = self
            .pending_redeems
            .checked_sub(amount)
            .ok_or_else(|| arithmetic_err("pending redemption total underflow"))?;
        Ok(())
    }
}
