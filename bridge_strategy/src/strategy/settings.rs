//! Lazily initialized strategy settings

use alloy_primitives::{Address, U256};

use crate::utils::error::{StrategyError, StrategyResult};

/// Lazily initialized settings
/// These settings are only set once, at construction, with their final values
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrategySettings {
    /// The strategy's own account; all balance queries run against it
    pub account: Address,
    /// The owning vault. Granted manager authority and the destination of
    /// swept redemption proceeds.
    pub vault: Address,
    /// The settlement bridge's address, used for allowance grants
    pub bridge: Address,
    /// Unit-of-account token address
    pub want_token: Address,
    /// Yield-bearing receipt token address
    pub receipt_token: Address,
    /// Cached `10^decimals` multiplier of the price feed, computed once at
    /// construction
    pub rate_scale: U256,
    /// Maximum accepted age of a price sample in seconds. `None` accepts
    /// well-formed samples of any age, matching the feed-as-is policy.
    pub max_sample_age: Option<u64>,
}

impl StrategySettings {
    /// Builder-style setter functions for the struct

    /// Sets the strategy's own account
    pub fn account(&mut self, account: Address) -> &mut Self {
        self.account = account;
        self
    }

    /// Sets the owning vault address
    pub fn vault(&mut self, vault: Address) -> &mut Self {
        self.vault = vault;
        self
    }

    /// Sets the settlement bridge address
    pub fn bridge(&mut self, bridge: Address) -> &mut Self {
        self.bridge = bridge;
        self
    }

    /// Sets the unit-of-account token address
    pub fn want_token(&mut self, want_token: Address) -> &mut Self {
        self.want_token = want_token;
        self
    }

    /// Sets the receipt token address
    pub fn receipt_token(&mut self, receipt_token: Address) -> &mut Self {
        self.receipt_token = receipt_token;
        self
    }

    /// Sets the maximum accepted price sample age
    pub fn max_sample_age(&mut self, max_sample_age: Option<u64>) -> &mut Self {
        self.max_sample_age = max_sample_age;
        self
    }

    /// Construction-time validation: the bridge and both token addresses
    /// must be set
    pub fn validate(&self) -> StrategyResult<()> {
        if self.bridge.is_zero() {
            return Err(StrategyError::ZeroAddress("bridge"));
        }
        if self.want_token.is_zero() {
            return Err(StrategyError::ZeroAddress("unit-of-account token"));
        }
        if self.receipt_token.is_zero() {
            return Err(StrategyError::ZeroAddress("receipt token"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_settings_setters() {
        let mut settings = StrategySettings::default();

        let account = Address::repeat_byte(0x11);
        let vault = Address::repeat_byte(0x22);
        let bridge = Address::repeat_byte(0x33);
        let want_token = Address::repeat_byte(0x44);
        let receipt_token = Address::repeat_byte(0x55);

        settings
            .account(account)
            .vault(vault)
            .bridge(bridge)
            .want_token(want_token)
            .receipt_token(receipt_token)
            .max_sample_age(Some(3_600));

        assert_eq!(settings.account, account);
        assert_eq!(settings.vault, vault);
        assert_eq!(settings.bridge, bridge);
        assert_eq!(settings.want_token, want_token);
        assert_eq!(settings.receipt_token, receipt_token);
        assert_eq!(settings.max_sample_age, Some(3_600));
    }

    #[test]
    fn test_validate_rejects_unset_collaborators() {
        let mut settings = StrategySettings::default();
        assert_eq!(
            settings.validate().unwrap_err(),
            StrategyError::ZeroAddress("bridge")
        );

        settings.bridge(Address::repeat_byte(0x33));
        assert_eq!(
            settings.validate().unwrap_err(),
            StrategyError::ZeroAddress("unit-of-account token")
        );

        settings.want_token(Address::repeat_byte(0x44));
        assert_eq!(
            settings.validate().unwrap_err(),
            StrategyError::ZeroAddress("receipt token")
        );

        settings.receipt_token(Address::repeat_byte(0x55));
        assert!(settings.validate().is_ok());
    }

    proptest! {
        #[test]
        fn test_settings_proptest(
            account in any::<[u8; 20]>(),
            vault in any::<[u8; 20]>(),
            bridge in any::<[u8; 20]>(),
            want_token in any::<[u8; 20]>(),
            receipt_token in any::<[u8; 20]>(),
            max_sample_age in any::<Option<u64>>(),
        ) {
            let mut settings = StrategySettings::default();

            let account = Address::from_slice(&account);
            let vault = Address::from_slice(&vault);
            let bridge = Address::from_slice(&bridge);
            let want_token = Address::from_slice(&want_token);
            let receipt_token = Address::from_slice(&receipt_token);

            settings
                .account(account)
                .vault(vault)
                .bridge(bridge)
                .want_token(want_token)
                .receipt_token(receipt_token)
                .max_sample_age(max_sample_age);

            prop_assert_eq!(settings.account, account);
            prop_assert_eq!(settings.vault, vault);
            prop_assert_eq!(settings.bridge, bridge);
            prop_assert_eq!(settings.want_token, want_token);
            prop_assert_eq!(settings.receipt_token, receipt_token);
            prop_assert_eq!(settings.max_sample_age, max_sample_age);
        }
    }
}
