//! Ordered ledger of in-flight bridge operations

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::utils::error::{arithmetic_err, StrategyError, StrategyResult};

/// One in-flight request to the bridge.
/// Created at initiation, destroyed when the request is completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The counterparty that will eventually complete the request
    pub operator: Address,
    /// The amount committed to the request
    pub amount: U256,
}

/// Positionally indexed collection of in-flight operations.
///
/// Removal swaps the last element into the vacated slot, so deletion is O(1)
/// but index values are reused: an index captured before a removal may refer
/// to a different operation after it. Callers must act on an index in the
/// same round it was issued. The sequence has no gaps; every index in
/// `[0, len)` is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationLedger {
    operations: Vec<Operation>,
}

impl OperationLedger {
    /// Appends an operation at the tail and returns its index
    pub fn append(&mut self, operation: Operation) -> usize {
        self.operations.push(operation);
        self.operations.len() - 1
    }

    /// The operation currently at `index`
    pub fn get(&self, index: usize) -> StrategyResult<&Operation> {
        self.operations
            .get(index)
            .ok_or(StrategyError::NonExistentOperation {
                index,
                len: self.operations.len(),
            })
    }

    /// Removes and returns the operation at `index`, moving the last
    /// operation into its slot
    pub fn swap_remove(&mut self, index: usize) -> StrategyResult<Operation> {
        if index >= self.operations.len() {
            return Err(StrategyError::NonExistentOperation {
                index,
                len: self.operations.len(),
            });
        }
        Ok(self.operations.swap_remove(index))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Checked sum of all committed amounts
    pub fn total_committed(&self) -> StrategyResult<U256> {
        self.operations
            .iter()
            .try_fold(U256::ZERO, |acc, operation| acc.checked_add(operation.amount))
            .ok_or_else(|| arithmetic_err("sum of committed amounts exceeds U256"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn operation(tag: u8, amount: u64) -> Operation {
        Operation {
            operator: Address::repeat_byte(tag),
            amount: U256::from(amount),
        }
    }

    #[test]
    fn test_append_assigns_tail_indices() {
        let mut ledger = OperationLedger::default();
        assert_eq!(ledger.append(operation(0x01, 10)), 0);
        assert_eq!(ledger.append(operation(0x02, 20)), 1);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(1).unwrap().amount, U256::from(20u64));
    }

    #[test]
    fn test_swap_remove_moves_last_into_slot() {
        let mut ledger = OperationLedger::default();
        ledger.append(operation(0x01, 10));
        ledger.append(operation(0x02, 20));
        ledger.append(operation(0x03, 30));

        let removed = ledger.swap_remove(1).unwrap();
        assert_eq!(removed, operation(0x02, 20));

        // Slot 0 untouched, former tail re-indexed into slot 1
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap(), &operation(0x01, 10));
        assert_eq!(ledger.get(1).unwrap(), &operation(0x03, 30));
    }

    #[test]
    fn test_out_of_range_access_fails_without_mutation() {
        let mut ledger = OperationLedger::default();
        ledger.append(operation(0x01, 10));

        assert_eq!(
            ledger.get(1).unwrap_err(),
            StrategyError::NonExistentOperation { index: 1, len: 1 }
        );
        assert_eq!(
            ledger.swap_remove(5).unwrap_err(),
            StrategyError::NonExistentOperation { index: 5, len: 1 }
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap(), &operation(0x01, 10));
    }

    #[test]
    fn test_total_committed() {
        let mut ledger = OperationLedger::default();
        assert_eq!(ledger.total_committed().unwrap(), U256::ZERO);

        ledger.append(operation(0x01, 10));
        ledger.append(operation(0x02, 32));
        assert_eq!(ledger.total_committed().unwrap(), U256::from(42u64));
    }

    proptest! {
        // Any interleaving of appends and removals leaves the ledger
        // gap-free with a sum equal to the surviving amounts.
        #[test]
        fn test_ledger_stays_consistent(actions in prop::collection::vec(
            prop_oneof![
                (any::<u8>(), 1u64..1_000_000).prop_map(|(tag, amount)| Some((tag, amount))),
                any::<usize>().prop_map(|_| None::<(u8, u64)>),
            ],
            1..64,
        ), removal_seed in any::<usize>()) {
            let mut ledger = OperationLedger::default();
            let mut shadow: Vec<Operation> = Vec::new();

            for action in actions {
                match action {
                    Some((tag, amount)) => {
                        let op = operation(tag, amount);
                        ledger.append(op);
                        shadow.push(op);
                    }
                    None if !shadow.is_empty() => {
                        let index = removal_seed % shadow.len();
                        let removed = ledger.swap_remove(index).unwrap();
                        prop_assert_eq!(removed, shadow[index]);
                        shadow.swap_remove(index);
                    }
                    None => {
                        prop_assert!(ledger.swap_remove(0).is_err());
                    }
                }

                prop_assert_eq!(ledger.len(), shadow.len());
                let expected_sum = shadow
                    .iter()
                    .fold(U256::ZERO, |acc, op| acc + op.amount);
                prop_assert_eq!(ledger.total_committed().unwrap(), expected_sum);
                for (index, expected) in shadow.iter().enumerate() {
                    prop_assert_eq!(ledger.get(index).unwrap(), expected);
                }
            }
        }
    }
}
