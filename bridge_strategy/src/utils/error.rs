use alloy_primitives::Address;

/// Strategy engine result
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Strategy engine errors
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StrategyError {
    /// Unauthorized access
    #[error("caller is not an authorized manager")]
    Unauthorized,
    /// A required collaborator address was left unset
    #[error("{0} address must not be zero")]
    ZeroAddress(&'static str),
    /// The owning vault does not report the expected unit-of-account token
    #[error("vault reports underlying token {reported}, expected {expected}")]
    VaultMismatch {
        expected: Address,
        reported: Address,
    },
    /// The strategy holds no unit-of-account balance to deposit
    #[error("no funds to deposit")]
    NoFundsToDeposit,
    /// A non-zero amount is required
    #[error("amount must be non-zero")]
    ZeroAmount,
    /// A requested ledger index does not exist
    #[error("no operation at index {index}, ledger holds {len}")]
    NonExistentOperation { index: usize, len: usize },
    /// The bridge has not credited any receipt tokens yet. Retry later.
    #[error("bridge returned nothing")]
    NothingReceived,
    /// The bridge has not returned any unit-of-account balance yet. Retry later.
    #[error("nothing redeemed yet")]
    NothingRedeemed,
    /// The oracle sample failed validation
    #[error("invalid rate: {0}")]
    InvalidRate(String),
    /// Arithmetic error. Signals a violated internal accounting invariant.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    /// A collaborator call failed
    #[error("external call failed: {0}")]
    External(String),
}

pub fn arithmetic_err<S: AsRef<str>>(s: S) -> StrategyError {
    StrategyError::Arithmetic(s.as_ref().to_string())
}
