//! Runtime errors for the Irony VM.
//!
//! Every error includes the index of the instruction being executed (`at`)
//! for debugging. None of them is recoverable: the run aborts.

use thiserror::Error;

/// Errors that occur while loading or executing a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A jump or call target has no matching LABEL.
    #[error("unresolved label '{label}' at instruction {at}")]
    UnresolvedLabel { at: usize, label: String },

    /// The same label is defined twice.
    #[error("duplicate label '{label}' at instruction {at}")]
    DuplicateLabel { at: usize, label: String },

    /// PUSH or CALL on a full call/argument stack.
    #[error("stack overflow at instruction {at}")]
    StackOverflow { at: usize },

    /// PARAM, CALL or RET on an empty call/argument stack.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// A variable needed a fresh memory cell and none was left.
    #[error("out of memory ({capacity} cells) at instruction {at}")]
    OutOfMemory { at: usize, capacity: usize },

    /// RET executed while only the global scope is live.
    #[error("RET outside of a call at instruction {at}")]
    ReturnOutsideCall { at: usize },

    /// RET popped a value that cannot be an instruction index.
    #[error("invalid return address {addr} at instruction {at}")]
    InvalidReturnAddress { at: usize, addr: i64 },
}
