//! Errors for parsing and compiling Irony source.

use thiserror::Error;

/// Errors produced while turning source lines into an AST.
///
/// Parsing stops at the first error; no partial AST is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line matches none of the statement forms.
    #[error("line {line}: unrecognized statement '{text}'")]
    UnrecognizedLine { line: usize, text: String },

    /// An `end` with no open `def`, `if` or `for` block.
    #[error("line {line}: 'end' without an open block")]
    UnmatchedEnd { line: usize },

    /// A block opened here is never closed by `end`.
    #[error("line {line}: block '{text}' is never closed")]
    UnclosedBlock { line: usize, text: String },
}

impl ParseError {
    /// The 1-based source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnrecognizedLine { line, .. }
            | ParseError::UnmatchedEnd { line }
            | ParseError::UnclosedBlock { line, .. } => *line,
        }
    }
}

/// Errors produced by [`compile`](crate::compile).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An `if` condition without `<`.
    #[error("unsupported condition '{cond}'")]
    UnsupportedCondition { cond: String },

    /// A terminal that is neither an integer literal nor a single name.
    #[error("invalid expression '{expr}'")]
    InvalidExpression { expr: String },

    /// An assignment, loop or parameter target that cannot hold a value.
    #[error("cannot assign to '{name}'")]
    InvalidTarget { name: String },

    /// A `def` inside another block.
    #[error("function '{name}' must be defined at top level")]
    NestedFunction { name: String },

    /// A function name that collides with a label the compiler emits.
    #[error("'{name}' is reserved and cannot name a function")]
    ReservedName { name: String },
}
