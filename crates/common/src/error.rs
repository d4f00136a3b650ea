//! Errors for classifying assembly operand tokens.

use thiserror::Error;

/// Errors that occur when a token cannot be used as an operand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// The token was empty.
    #[error("empty operand")]
    Empty,

    /// An integer literal does not fit in 64 bits.
    #[error("integer literal out of range: '{0}'")]
    LiteralOutOfRange(String),

    /// A `tmpN` index does not fit in 64 bits.
    #[error("temp index out of range: '{0}'")]
    TempOutOfRange(String),

    /// The token contains characters that are not allowed in a name.
    #[error("malformed operand: '{0}'")]
    Malformed(String),

    /// A literal was given where a register or variable is required.
    #[error("'{0}' is not a storage location")]
    NotAPlace(String),
}
