//! Utility and helper functions needed for:
//! - Checked fixed-point arithmetic
//! - Error handling

pub(crate) mod common;
pub(crate) mod error;
