//! Irony virtual machine — executes three-address assembly.
//!
//! The VM is a register/memory machine with:
//! - 16 general registers backing compiler temps (`tmpN` → `N % 16`)
//! - Fixed-size memory for named variables, addressed through a scope stack
//! - A fixed-capacity call/argument stack carrying arguments and return
//!   addresses
//!
//! # Usage
//!
//! ```
//! use irony_common::{Instruction, Operand, Program};
//! use irony_vm::run;
//!
//! let program = Program::new(vec![
//!     Instruction::Print(Operand::Literal(42)),
//!     Instruction::Halt,
//! ]);
//!
//! assert_eq!(run(&program).unwrap(), vec!["42"]);
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod machine;
pub mod trace;

pub use config::VmConfig;
pub use error::RuntimeError;
pub use machine::{REGISTER_COUNT, VM};
pub use trace::TraceStep;

use irony_common::Program;

/// Execute a program with default capacities and return its output.
///
/// This is the primary entry point for the VM. It:
/// 1. Records the index of every LABEL
/// 2. Executes from instruction 0 until HALT or the end of the program
/// 3. Returns the printed values, in order
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails (unresolved label, stack
/// overflow or underflow, memory exhaustion, etc.).
pub fn run(program: &Program) -> Result<Vec<String>, RuntimeError> {
    let mut vm = VM::new(program);
    vm.execute()
}

/// Execute a program, also returning a step-by-step trace.
pub fn run_traced(program: &Program) -> Result<(Vec<String>, Vec<TraceStep>), RuntimeError> {
    let mut vm = VM::new(program).with_tracing(true);
    let output = vm.execute()?;
    Ok((output, vm.trace().to_vec()))
}
