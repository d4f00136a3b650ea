//! Irony assembler — text ↔ instruction translation.
//!
//! The assembler is a mechanical 1:1 translation: one text line, one
//! instruction. Unknown mnemonics are rejected here, so the VM only ever
//! sees well-formed instructions.
//!
//! # Usage
//!
//! ```
//! use irony_assembler::{assemble, disassemble};
//!
//! let text = "JMP main\nLABEL main\nPRINT 42\nHALT\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(disassemble(&program), text);
//! ```

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use irony_common::Program;
use lexer::tokenize_line;
use parser::parse_line;

/// Assemble text into a program.
///
/// Returns the first error encountered. Fix one error at a time.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    assemble_lines(text.lines())
}

/// Assemble a sequence of lines into a program.
///
/// Line numbers in errors are 1-based positions in `lines`, counting blank
/// and comment lines.
pub fn assemble_lines<I, S>(lines: I) -> Result<Program, AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut instructions = Vec::new();

    for (idx, line) in lines.into_iter().enumerate() {
        let tokens = tokenize_line(line.as_ref());
        if let Some(instr) = parse_line(&tokens, idx + 1)? {
            instructions.push(instr);
        }
    }

    Ok(Program::new(instructions))
}

/// Disassemble a program into canonical assembly text.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use irony_common::{Instruction, Operand, Place};

    #[test]
    fn assemble_minimal() {
        let program = assemble("HALT\n").unwrap();
        assert_eq!(program.instructions, vec![Instruction::Halt]);
    }

    #[test]
    fn assemble_lines_accepts_string_slices() {
        let lines = vec!["MOV 5 x".to_string(), "PRINT x".to_string()];
        let program = assemble_lines(&lines).unwrap();
        assert_eq!(
            program.instructions,
            vec![
                Instruction::Mov(Operand::Literal(5), Place::var("x")),
                Instruction::Print(Operand::var("x")),
            ]
        );
    }

    #[test]
    fn assemble_with_comments_and_blanks() {
        let text = "\
; entry
JMP main

LABEL main  ; nothing above
HALT
";
        let program = assemble(text).unwrap();
        assert_eq!(program.len(), 3);
    }

    #[test]
    fn error_reports_correct_line() {
        let text = "HALT\n\nFOOBAR\n";
        let err = assemble(text).unwrap_err();
        assert!(matches!(err, AsmError::UnknownInstruction { line: 3, .. }));
    }

    #[test]
    fn roundtrip_assemble_then_disassemble() {
        let text = "\
JMP main
LABEL double
PARAM n
ADD n n tmp1
RET tmp1
LABEL main
PUSH 21
CALL double
MOV _retval tmp2
PRINT tmp2
HALT
";
        let program = assemble(text).unwrap();
        assert_eq!(disassemble(&program), text);
    }
}
