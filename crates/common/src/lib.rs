//! Irony common types shared by the compiler, assembler and VM.
//!
//! This crate provides the foundational data structures for Irony
//! three-address assembly:
//!
//! - [`Opcode`] — the 13 instruction mnemonics
//! - [`Operand`] / [`Place`] — integer literals, register temps, variables
//! - [`Instruction`] — a typed instruction with its operands
//! - [`Program`] — a sequence of instructions
//! - [`OperandError`] — errors from classifying operand tokens
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::OperandError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use operand::{Operand, Place, RETVAL};
pub use program::Program;
