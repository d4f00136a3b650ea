//! Irony compiler — source lines to three-address assembly.
//!
//! Compilation is two passes over a fresh [`CompileContext`]:
//! 1. [`parser::parse`] builds the AST and records every function name
//! 2. [`CodeGen`] lowers the AST, using those names to tell calls from
//!    plain variables
//!
//! # Usage
//!
//! ```
//! use irony_compiler::compile;
//!
//! let program = compile(&["x = 1 + 2", "print x"]).unwrap();
//! assert_eq!(
//!     program.to_lines(),
//!     vec!["JMP main", "LABEL main", "ADD 1 2 tmp1", "MOV tmp1 x", "PRINT x", "HALT"]
//! );
//! ```

pub mod ast;
pub mod codegen;
pub mod context;
pub mod error;
pub mod options;
pub mod parser;

pub use ast::Node;
pub use codegen::CodeGen;
pub use context::CompileContext;
pub use error::{CompileError, ParseError};
pub use options::{CompileOptions, ConditionLowering, Dialect};

use irony_common::Program;

/// Compile source lines with the default options (full dialect, constant
/// `if` threshold).
pub fn compile<S: AsRef<str>>(lines: &[S]) -> Result<Program, CompileError> {
    compile_with(lines, &CompileOptions::default())
}

/// Compile source lines with explicit options.
///
/// # Errors
///
/// Returns [`CompileError::Parse`] for malformed source, or another
/// [`CompileError`] for statements that parse but cannot be lowered.
pub fn compile_with<S: AsRef<str>>(
    lines: &[S],
    options: &CompileOptions,
) -> Result<Program, CompileError> {
    let mut ctx = CompileContext::new();
    let ast = parser::parse(lines, options.dialect, &mut ctx)?;
    CodeGen::new(ctx, options.condition).compile_all(&ast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let program = compile::<&str>(&[]).unwrap();
        assert_eq!(program.to_lines(), vec!["JMP main", "LABEL main", "HALT"]);
    }

    #[test]
    fn calls_to_functions_defined_later_are_recognized() {
        let program = compile(&["y = g 1", "def g x", "return x", "end"]).unwrap();
        assert!(program.to_lines().contains(&"CALL g".to_string()));
    }

    #[test]
    fn compiling_twice_gives_identical_output() {
        let source = ["def f n", "return n + 1", "end", "print f 1"];
        assert_eq!(compile(&source).unwrap(), compile(&source).unwrap());
    }

    #[test]
    fn teaching_dialect_rejects_for() {
        let err = compile_with(&["for i from 1 to 2", "end"], &CompileOptions::teaching()).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnrecognizedLine { line: 1, .. })
        ));
    }
}
