//! Disassembler: program → canonical assembly text.
//!
//! Output format is flat text, one instruction per line. No indentation,
//! no comments, no blank lines.

use irony_common::Program;

/// Disassemble a program into canonical assembly text.
///
/// The output is guaranteed to reassemble to an identical program
/// (`assemble(disassemble(program)) == program`).
pub fn disassemble(program: &Program) -> String {
    let mut text = String::new();
    for line in program.to_lines() {
        text.push_str(&line);
        text.push('\n');
    }
    text
}
