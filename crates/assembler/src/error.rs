//! Error types for the Irony assembler.

use irony_common::OperandError;
use thiserror::Error;

/// Errors produced while reading assembly text into instructions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// The first token of a line is not a known mnemonic.
    #[error("line {line}: unknown instruction '{token}'")]
    UnknownInstruction { line: usize, token: String },

    /// An instruction did not have enough operands.
    #[error("line {line}: {opcode} expects {expected} operand(s)")]
    MissingOperand {
        line: usize,
        opcode: &'static str,
        expected: usize,
    },

    /// An operand token could not be classified, or is the wrong kind.
    #[error("line {line}: invalid operand '{token}': {source}")]
    InvalidOperand {
        line: usize,
        token: String,
        #[source]
        source: OperandError,
    },

    /// A label name contains characters other than letters, digits and `_`.
    #[error("line {line}: invalid label '{token}'")]
    InvalidLabel { line: usize, token: String },

    /// A token appeared after the last expected operand.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },
}

impl AsmError {
    /// The 1-based line number the error was found on.
    pub fn line(&self) -> usize {
        match self {
            AsmError::UnknownInstruction { line, .. }
            | AsmError::MissingOperand { line, .. }
            | AsmError::InvalidOperand { line, .. }
            | AsmError::InvalidLabel { line, .. }
            | AsmError::UnexpectedToken { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unknown_instruction() {
        let e = AsmError::UnknownInstruction {
            line: 3,
            token: "MUL".to_string(),
        };
        assert_eq!(e.to_string(), "line 3: unknown instruction 'MUL'");
    }

    #[test]
    fn error_display_missing_operand() {
        let e = AsmError::MissingOperand {
            line: 7,
            opcode: "MOV",
            expected: 2,
        };
        assert_eq!(e.to_string(), "line 7: MOV expects 2 operand(s)");
    }

    #[test]
    fn error_display_invalid_operand() {
        let e = AsmError::InvalidOperand {
            line: 2,
            token: "5".to_string(),
            source: OperandError::NotAPlace("5".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "line 2: invalid operand '5': '5' is not a storage location"
        );
    }

    #[test]
    fn error_display_unexpected_token() {
        let e = AsmError::UnexpectedToken {
            line: 4,
            token: "EXTRA".to_string(),
        };
        assert_eq!(e.to_string(), "line 4: unexpected token 'EXTRA'");
    }

    #[test]
    fn line_accessor() {
        let e = AsmError::InvalidLabel {
            line: 9,
            token: "a-b".to_string(),
        };
        assert_eq!(e.line(), 9);
    }
}
