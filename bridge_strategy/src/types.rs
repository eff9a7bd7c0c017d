//! Shared types used across the engine

use alloy_primitives::I256;
use serde::{Deserialize, Serialize};

/// One sample from the external price feed, as reported by the oracle.
///
/// Mirrors the feed's native round bookkeeping: the sample carries both the
/// round it was requested for and the round it was actually answered in, so
/// carried-over answers can be detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Identifier of the reported round
    pub round_id: u64,
    /// Raw signed answer in feed decimals
    pub answer: I256,
    /// Timestamp of the last update to this sample, in seconds
    pub updated_at: u64,
    /// Identifier of the round the answer was computed in
    pub answered_in_round: u64,
}
