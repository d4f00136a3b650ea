//! Step-by-step execution trace.
//!
//! Tracing is a side channel: steps are collected next to the output, never
//! mixed into it.

use std::fmt;

use irony_common::Instruction;

/// One executed instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Index of the instruction.
    pub pc: usize,
    /// Stack pointer before the instruction ran.
    pub sp: usize,
    /// The instruction itself.
    pub instruction: Instruction,
    /// Values read while executing it, in order: resolved operands, plus
    /// any values popped from the call/argument stack.
    pub operands: Vec<i64>,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[PC={:02}] [SP={:02}] {}", self.pc, self.sp, self.instruction)?;
        if let Some((first, rest)) = self.operands.split_first() {
            write!(f, " <- {first}")?;
            for value in rest {
                write!(f, ", {value}")?;
            }
        }
        Ok(())
    }
}
