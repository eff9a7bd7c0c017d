//! The strategy engine that drives capital through the asynchronous
//! settlement bridge.
//!
//! Deposits and redemptions are two-phase: initiation files a request with
//! the bridge and records it in the matching operation ledger; finishing,
//! possibly much later and in any order, asks the bridge to complete the
//! request and settles the ledger entry only if new tokens actually
//! arrived. The pending counters in [`StrategyData`] always equal the sums
//! of the amounts in the two ledgers.

use alloy_primitives::{Address, U256};
use tracing::info;

use crate::interfaces::{Bridge, ManagerGate, PriceOracle, SingleManager, Token, Vault};
use crate::journal::{Journal, JournalEntry, StrategyEvent};
use crate::utils::common::{positive_rate, pow10, scale_by_rate};
use crate::utils::error::{arithmetic_err, StrategyError, StrategyResult};

use super::data::StrategyData;
use super::ledger::{Operation, OperationLedger};
use super::settings::StrategySettings;

/// One deployed strategy.
///
/// Constructed once, mutated by every lifecycle call, never destroyed. The
/// execution environment serializes calls, so no internal locking is
/// needed; "asynchrony" refers entirely to the bridge's own multi-call
/// protocol.
pub struct BridgeStrategy {
    /// Immutable settings and configurations
    settings: StrategySettings,
    /// Mutable accounting state
    data: StrategyData,
    /// In-flight deposit requests
    deposits: OperationLedger,
    /// In-flight redemption requests
    redeems: OperationLedger,
    bridge: Box<dyn Bridge>,
    want: Box<dyn Token>,
    receipt: Box<dyn Token>,
    oracle: Box<dyn PriceOracle>,
    gate: Box<dyn ManagerGate>,
    journal: Journal,
}

impl BridgeStrategy {
    /// Builds a strategy owned by `settings.vault`, granting it manager
    /// authority. Construction is all-or-nothing: any validation failure
    /// aborts and no partially built engine exists.
    pub fn new(
        settings: StrategySettings,
        bridge: Box<dyn Bridge>,
        want: Box<dyn Token>,
        receipt: Box<dyn Token>,
        oracle: Box<dyn PriceOracle>,
        vault: &dyn Vault,
    ) -> StrategyResult<Self> {
        let gate = Box::new(SingleManager(settings.vault));
        Self::with_gate(settings, bridge, want, receipt, oracle, vault, gate)
    }

    /// Builds a strategy with a caller-supplied authorization predicate
    pub fn with_gate(
        mut settings: StrategySettings,
        bridge: Box<dyn Bridge>,
        want: Box<dyn Token>,
        receipt: Box<dyn Token>,
        oracle: Box<dyn PriceOracle>,
        vault: &dyn Vault,
        gate: Box<dyn ManagerGate>,
    ) -> StrategyResult<Self> {
        settings.validate()?;

        // Capability probe: the owner must genuinely expose the vault
        // surface and agree on the unit of account.
        let reported = vault.underlying_token()?;
        if reported != settings.want_token {
            return Err(StrategyError::VaultMismatch {
                expected: settings.want_token,
                reported,
            });
        }

        settings.rate_scale = pow10(oracle.decimals()?)?;

        let mut data = StrategyData::default();
        // No exposure exists yet
        data.fully_redeemed(true);

        Ok(Self {
            settings,
            data,
            deposits: OperationLedger::default(),
            redeems: OperationLedger::default(),
            bridge,
            want,
            receipt,
            oracle,
            gate,
            journal: Journal::default(),
        })
    }

    fn ensure_manager(&self, caller: Address) -> StrategyResult<()> {
        if self.gate.is_manager(caller) {
            Ok(())
        } else {
            Err(StrategyError::Unauthorized)
        }
    }

    /// Files a deposit of the strategy's entire local unit-of-account
    /// balance with the bridge. Returns the operator that will complete the
    /// request and the committed amount.
    pub fn initiate_deposit(&mut self, caller: Address) -> StrategyResult<(Address, U256)> {
        self.ensure_manager(caller)?;

        let balance = self.want.balance_of(self.settings.account)?;
        if balance.is_zero() {
            return Err(StrategyError::NoFundsToDeposit);
        }

        self.want.approve(self.settings.bridge, balance)?;
        let operator = self.bridge.initiate_deposit(balance)?;

        self.data.file_deposit(balance)?;
        // A deposit in flight can mint new receipt exposure later
        self.data.fully_redeemed = false;
        self.deposits.append(Operation {
            operator,
            amount: balance,
        });
        self.journal.record(StrategyEvent::DepositInitiated {
            operator,
            amount: balance,
        });
        info!(%operator, amount = %balance, "deposit initiated");

        Ok((operator, balance))
    }

    /// Attempts to complete the deposit currently at `index`.
    ///
    /// Fails with [`StrategyError::NothingReceived`] while the bridge has
    /// not credited any receipt tokens; the call is safe to retry later and
    /// leaves all state untouched. On success returns the operator, the
    /// committed amount and the receipt delta.
    pub fn finish_deposit(
        &mut self,
        caller: Address,
        index: usize,
    ) -> StrategyResult<(Address, U256, U256)> {
        self.ensure_manager(caller)?;

        let operation = *self.deposits.get(index)?;

        let before = self.receipt.balance_of(self.settings.account)?;
        self.bridge.finish_deposit(operation.operator)?;
        let after = self.receipt.balance_of(self.settings.account)?;

        let received = after
            .checked_sub(before)
            .filter(|delta| !delta.is_zero())
            .ok_or(StrategyError::NothingReceived)?;

        self.data.settle_deposit(operation.amount)?;
        self.deposits.swap_remove(index)?;
        self.journal.record(StrategyEvent::DepositFinished {
            operator: operation.operator,
            amount: operation.amount,
            received,
        });
        info!(operator = %operation.operator, %received, "deposit finished");

        Ok((operation.operator, operation.amount, received))
    }

    /// Files a redemption of `amount` receipt tokens with the bridge.
    ///
    /// When this redemption covers the entire current receipt holding and
    /// no deposit is pending, the strategy is flagged as fully redeemed the
    /// instant the request is filed, without waiting for bridge completion.
    pub fn initiate_redeem(
        &mut self,
        caller: Address,
        amount: U256,
    ) -> StrategyResult<(Address, U256)> {
        self.ensure_manager(caller)?;

        if amount.is_zero() {
            return Err(StrategyError::ZeroAmount);
        }

        // Balance sufficiency itself is enforced by the receipt token when
        // the bridge pulls the funds.
        let held = self.receipt.balance_of(self.settings.account)?;
        let depletes = self.data.pending_deposits.is_zero() && amount == held;

        self.receipt.approve(self.settings.bridge, amount)?;
        let operator = self.bridge.initiate_redeem(amount)?;

        if depletes {
            self.data.fully_redeemed = true;
        }
        self.data.file_redeem(amount)?;
        self.redeems.append(Operation { operator, amount });
        self.journal
            .record(StrategyEvent::RedeemInitiated { operator, amount });
        info!(%operator, %amount, "redeem initiated");

        Ok((operator, amount))
    }

    /// Attempts to complete the redemption currently at `index`, sweeping
    /// the proceeds back to the owning vault.
    ///
    /// Fails with [`StrategyError::NothingRedeemed`] while the bridge has
    /// not returned any unit-of-account balance; safe to retry later.
    pub fn finish_redeem(
        &mut self,
        caller: Address,
        index: usize,
    ) -> StrategyResult<(Address, U256, U256)> {
        self.ensure_manager(caller)?;

        let operation = *self.redeems.get(index)?;

        self.bridge.finish_redeem(operation.operator)?;
        let redeemed = self.want.balance_of(self.settings.account)?;
        if redeemed.is_zero() {
            return Err(StrategyError::NothingRedeemed);
        }

        // Sweep before settling: a failed transfer must leave the
        // operation in the ledger so the whole completion stays retryable.
        self.want.transfer(self.settings.vault, redeemed)?;

        self.data.settle_redeem(operation.amount)?;
        self.redeems.swap_remove(index)?;
        self.journal.record(StrategyEvent::RedeemFinished {
            operator: operation.operator,
            amount: operation.amount,
            redeemed,
        });
        info!(operator = %operation.operator, %redeemed, "redeem finished");

        Ok((operation.operator, operation.amount, redeemed))
    }

    /// Files a redemption of the entire current receipt holding, or does
    /// nothing when none is held
    pub fn withdraw_all(&mut self, caller: Address) -> StrategyResult<Option<(Address, U256)>> {
        self.ensure_manager(caller)?;

        let held = self.receipt.balance_of(self.settings.account)?;
        if held.is_zero() {
            return Ok(None);
        }
        self.initiate_redeem(caller, held).map(Some)
    }

    /// Immediate withdrawal entry point, present for interface
    /// compatibility only. The bridge settles asynchronously, so a partial
    /// synchronous withdrawal is structurally impossible; this never moves
    /// funds and always reports zero.
    pub fn withdraw(&mut self, caller: Address, _amount: U256) -> StrategyResult<U256> {
        self.ensure_manager(caller)?;
        Ok(U256::ZERO)
    }

    /// Values the receipt exposure (held plus pending redemption) in the
    /// unit of account, using the latest validated price sample.
    ///
    /// Receipt tokens awaiting redemption are valued at the same rate as
    /// freely held ones; their true redemption value is locked in at bridge
    /// completion time. Zero exposure short-circuits without querying the
    /// oracle.
    pub fn estimate_receipt_value(&self) -> StrategyResult<U256> {
        let held = self.receipt.balance_of(self.settings.account)?;
        let exposure = held
            .checked_add(self.data.pending_redeems)
            .ok_or_else(|| arithmetic_err("receipt exposure exceeds U256"))?;
        if exposure.is_zero() {
            return Ok(U256::ZERO);
        }

        let rate = self.read_validated_rate()?;
        scale_by_rate(exposure, rate, self.settings.rate_scale)
    }

    /// Pulls the latest sample and rejects anything that looks stale or
    /// carried over: non-positive answers, missing update timestamps, and
    /// answers computed in a round older than the reported one. A maximum
    /// sample age is enforced only when configured in the settings.
    fn read_validated_rate(&self) -> StrategyResult<U256> {
        let sample = self.oracle.latest_sample()?;

        if sample.updated_at == 0 {
            return Err(StrategyError::InvalidRate(
                "sample has no update timestamp".to_string(),
            ));
        }
        if sample.answered_in_round < sample.round_id {
            return Err(StrategyError::InvalidRate(format!(
                "answered in round {} older than reported round {}",
                sample.answered_in_round, sample.round_id
            )));
        }
        if let Some(max_age) = self.settings.max_sample_age {
            let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
            if now.saturating_sub(sample.updated_at) > max_age {
                return Err(StrategyError::InvalidRate(format!(
                    "sample older than {max_age} seconds"
                )));
            }
        }

        positive_rate(sample.answer)
    }

    /// Complete assets-under-management figure: capital pending deposit
    /// plus the valued receipt exposure. Idle local balances are swept to
    /// the vault on every completed redemption, so they are not counted
    /// separately. Oracle distrust propagates as an error, never as zero.
    pub fn total_assets(&self) -> StrategyResult<U256> {
        let receipt_value = self.estimate_receipt_value()?;
        self.data
            .pending_deposits
            .checked_add(receipt_value)
            .ok_or_else(|| arithmetic_err("total assets exceed U256"))
    }

    /// Whether the strategy still has exposure the vault must wait on
    /// before decommissioning it
    pub fn has_outstanding_exposure(&self) -> bool {
        !self.data.fully_redeemed || !self.data.pending_redeems.is_zero()
    }

    /// Number of in-flight deposit requests
    pub fn pending_deposit_count(&self) -> usize {
        self.deposits.len()
    }

    /// Number of in-flight redemption requests
    pub fn pending_redeem_count(&self) -> usize {
        self.redeems.len()
    }

    /// Unit-of-account total committed to in-flight deposits
    pub fn pending_deposits(&self) -> U256 {
        self.data.pending_deposits
    }

    /// Receipt-token total committed to in-flight redemptions
    pub fn pending_redeems(&self) -> U256 {
        self.data.pending_redeems
    }

    pub fn settings(&self) -> &StrategySettings {
        &self.settings
    }

    /// Recorded lifecycle events, oldest first
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Removes and returns all recorded lifecycle events
    pub fn drain_journal(&mut self) -> Vec<JournalEntry> {
        self.journal.drain()
    }
}
