//! Errors raised by the statistics engine.

use thiserror::Error;

/// Statistics engine errors.
///
/// Degenerate data (empty slices, zero variance, no losses) is never an
/// error; those cases resolve to defined sentinel values. Only a malformed
/// call is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// An argument outside its accepted set of values.
    #[error("Invalid argument '{name}': got '{value}', expected one of {expected}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Human-readable list of accepted values.
        expected: &'static str,
    },
}
