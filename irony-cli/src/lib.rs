//! The two operations the rest of a toolchain needs: compile source lines
//! to assembly lines, and execute assembly lines.
//!
//! ```
//! let asm = irony_cli::compile(&["x = 2 + 3", "print x"]).unwrap();
//! assert_eq!(irony_cli::execute(&asm, false).unwrap(), vec!["5"]);
//! ```

use irony_assembler::{assemble_lines, AsmError};
use irony_compiler::{compile_with, CompileError, CompileOptions};
use irony_vm::{RuntimeError, TraceStep, VM};
use thiserror::Error;

/// Any failure of [`compile`] or [`execute`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("assembly error: {0}")]
    Assemble(#[from] AsmError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Assemble(_) => 1,
            Error::Compile(_) => 2,
            Error::Runtime(_) => 3,
        }
    }
}

/// Compile source lines to assembly lines with the default options.
pub fn compile<S: AsRef<str>>(source: &[S]) -> Result<Vec<String>, Error> {
    compile_with_options(source, &CompileOptions::default())
}

/// Compile source lines to assembly lines.
pub fn compile_with_options<S: AsRef<str>>(
    source: &[S],
    options: &CompileOptions,
) -> Result<Vec<String>, Error> {
    Ok(compile_with(source, options)?.to_lines())
}

/// Assemble and run assembly lines, returning the printed values.
///
/// With `debug`, every executed step is written to stderr, including the
/// steps leading up to a runtime error. The returned lines never contain
/// trace text.
pub fn execute<S: AsRef<str>>(assembly: &[S], debug: bool) -> Result<Vec<String>, Error> {
    let program = assemble_lines(assembly)?;
    let mut vm = VM::new(&program).with_tracing(debug);
    let result = vm.execute();
    for step in vm.trace() {
        eprintln!("{step}");
    }
    Ok(result?)
}

/// Assemble and run assembly lines, returning the output and the trace.
pub fn execute_traced<S: AsRef<str>>(
    assembly: &[S],
) -> Result<(Vec<String>, Vec<TraceStep>), Error> {
    let program = assemble_lines(assembly)?;
    Ok(irony_vm::run_traced(&program)?)
}
