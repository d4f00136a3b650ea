//! Integration tests for the Irony assembler.
//!
//! Tests cover:
//! - Compiled programs surviving disassemble → assemble unchanged
//! - Hand-written text with comments, blank lines and odd spacing
//! - Error cases with their line numbers

use irony_assembler::{assemble, assemble_lines, disassemble, AsmError};
use irony_common::{Instruction, Operand, OperandError, Place, Program};
use irony_compiler::compile;

// ---- Test helpers ----

const FIB: &[&str] = &[
    "def fib n",
    "if n < 2",
    "return n",
    "end",
    "a = fib n - 1",
    "b = fib n - 2",
    "return a + b",
    "end",
    "main = fib 9",
    "print main",
];

const LOOPS: &[&str] = &[
    "sum = 0",
    "for i from 1 to 5",
    "sum = sum + i",
    "end",
    "print sum",
];

/// Compile source, disassemble it, and assemble the text back.
fn through_text(source: &[&str]) -> (Program, Program) {
    let compiled = compile(source).expect("source should compile");
    let text = disassemble(&compiled);
    let reassembled = assemble(&text).expect("disassembly should assemble");
    (compiled, reassembled)
}

// ---- Compiled programs ----

#[test]
fn fib_survives_text() {
    let (compiled, reassembled) = through_text(FIB);
    assert_eq!(compiled, reassembled);
}

#[test]
fn loops_survive_text() {
    let (compiled, reassembled) = through_text(LOOPS);
    assert_eq!(compiled, reassembled);
}

#[test]
fn reassembled_fib_runs() {
    let (_, reassembled) = through_text(FIB);
    assert_eq!(irony_vm::run(&reassembled).unwrap(), vec!["34"]);
}

#[test]
fn compiled_lines_assemble_directly() {
    let compiled = compile(LOOPS).unwrap();
    let lines = compiled.to_lines();
    assert_eq!(assemble_lines(&lines).unwrap(), compiled);
}

#[test]
fn disassembly_is_one_line_per_instruction() {
    let compiled = compile(FIB).unwrap();
    let text = disassemble(&compiled);
    assert_eq!(text.lines().count(), compiled.len());
    assert!(text.ends_with('\n'));
}

// ---- Hand-written text ----

#[test]
fn comments_blank_lines_and_spacing() {
    let text = "\
; entry
JMP   main

LABEL main      ; start here
  MOV 3 x
\tPRINT x
halt
";
    let program = assemble(text).unwrap();
    assert_eq!(
        program.instructions,
        vec![
            Instruction::Jmp("main".to_string()),
            Instruction::Label("main".to_string()),
            Instruction::Mov(Operand::Literal(3), Place::var("x")),
            Instruction::Print(Operand::var("x")),
            Instruction::Halt,
        ]
    );
}

#[test]
fn canonical_text_is_stable() {
    let text = "JMP main\nLABEL main\nADD 1 2 tmp1\nMOV tmp1 x\nPRINT x\nHALT\n";
    assert_eq!(disassemble(&assemble(text).unwrap()), text);
}

#[test]
fn empty_text_is_empty_program() {
    assert!(assemble("").unwrap().is_empty());
    assert!(assemble("; nothing here\n\n").unwrap().is_empty());
}

// ---- Errors ----

#[test]
fn unknown_instruction_reports_line() {
    let err = assemble("LABEL main\nMUL 2 3 x\n").unwrap_err();
    assert_eq!(
        err,
        AsmError::UnknownInstruction {
            line: 2,
            token: "MUL".to_string()
        }
    );
}

#[test]
fn line_numbers_count_blank_and_comment_lines() {
    let err = assemble("; header\n\nPRINT\n").unwrap_err();
    assert_eq!(err.line(), 3);
}

#[test]
fn missing_operand() {
    assert_eq!(
        assemble("ADD 1 2\n").unwrap_err(),
        AsmError::MissingOperand {
            line: 1,
            opcode: "ADD",
            expected: 3
        }
    );
}

#[test]
fn extra_operand() {
    assert_eq!(
        assemble("PRINT x y\n").unwrap_err(),
        AsmError::UnexpectedToken {
            line: 1,
            token: "y".to_string()
        }
    );
}

#[test]
fn literal_cannot_be_written() {
    assert_eq!(
        assemble("MOV 1 2\n").unwrap_err(),
        AsmError::InvalidOperand {
            line: 1,
            token: "2".to_string(),
            source: OperandError::NotAPlace("2".to_string())
        }
    );
}

#[test]
fn malformed_operand() {
    let err = assemble("PRINT a.b\n").unwrap_err();
    assert!(matches!(err, AsmError::InvalidOperand { line: 1, .. }));
}

#[test]
fn malformed_label() {
    assert_eq!(
        assemble("JMP no-where\n").unwrap_err(),
        AsmError::InvalidLabel {
            line: 1,
            token: "no-where".to_string()
        }
    );
}

#[test]
fn error_message_includes_line() {
    let err = assemble("HALT\nHALT now\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2: unexpected token 'now'");
}
