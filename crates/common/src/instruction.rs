//! Typed Irony instructions.
//!
//! Text form is one instruction per line: the mnemonic followed by its
//! operands, separated by single spaces.
//! ```text
//! ADD tmp3 tmp4 tmp5
//! JGE tmp1 2 L7_end
//! CALL fib
//! ```

use std::fmt;

use crate::opcode::Opcode;
use crate::operand::{Operand, Place};

/// A single Irony instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `LABEL name`
    Label(String),
    /// `JMP label`
    Jmp(String),
    /// `PARAM var`
    Param(Place),
    /// `MOV src dst`
    Mov(Operand, Place),
    /// `ADD a b dst`
    Add(Operand, Operand, Place),
    /// `SUB a b dst`
    Sub(Operand, Operand, Place),
    /// `RET val`
    Ret(Operand),
    /// `JGE val threshold label`
    Jge(Operand, Operand, String),
    /// `JGT val threshold label`
    Jgt(Operand, Operand, String),
    /// `PUSH val`
    Push(Operand),
    /// `CALL label`
    Call(String),
    /// `PRINT val`
    Print(Operand),
    /// `HALT`
    Halt,
}

impl Instruction {
    /// The opcode of this instruction.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Label(_) => Opcode::Label,
            Instruction::Jmp(_) => Opcode::Jmp,
            Instruction::Param(_) => Opcode::Param,
            Instruction::Mov(..) => Opcode::Mov,
            Instruction::Add(..) => Opcode::Add,
            Instruction::Sub(..) => Opcode::Sub,
            Instruction::Ret(_) => Opcode::Ret,
            Instruction::Jge(..) => Opcode::Jge,
            Instruction::Jgt(..) => Opcode::Jgt,
            Instruction::Push(_) => Opcode::Push,
            Instruction::Call(_) => Opcode::Call,
            Instruction::Print(_) => Opcode::Print,
            Instruction::Halt => Opcode::Halt,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode().mnemonic();
        match self {
            Instruction::Label(name) | Instruction::Jmp(name) | Instruction::Call(name) => {
                write!(f, "{op} {name}")
            }
            Instruction::Param(var) => write!(f, "{op} {var}"),
            Instruction::Mov(src, dst) => write!(f, "{op} {src} {dst}"),
            Instruction::Add(a, b, dst) | Instruction::Sub(a, b, dst) => {
                write!(f, "{op} {a} {b} {dst}")
            }
            Instruction::Ret(val) | Instruction::Push(val) | Instruction::Print(val) => {
                write!(f, "{op} {val}")
            }
            Instruction::Jge(val, threshold, label) | Instruction::Jgt(val, threshold, label) => {
                write!(f, "{op} {val} {threshold} {label}")
            }
            Instruction::Halt => f.write_str(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_three_operand() {
        let instr = Instruction::Add(Operand::Temp(3), Operand::Temp(4), Place::Temp(5));
        assert_eq!(instr.to_string(), "ADD tmp3 tmp4 tmp5");
    }

    #[test]
    fn display_conditional_jump() {
        let instr = Instruction::Jge(Operand::Temp(1), Operand::Literal(2), "L7_end".to_string());
        assert_eq!(instr.to_string(), "JGE tmp1 2 L7_end");
    }

    #[test]
    fn display_call_and_halt() {
        assert_eq!(Instruction::Call("fib".to_string()).to_string(), "CALL fib");
        assert_eq!(Instruction::Halt.to_string(), "HALT");
    }

    #[test]
    fn display_mov_from_retval() {
        let instr = Instruction::Mov(Operand::var("_retval"), Place::Temp(2));
        assert_eq!(instr.to_string(), "MOV _retval tmp2");
    }

    #[test]
    fn opcode_matches_variant() {
        assert_eq!(Instruction::Halt.opcode(), Opcode::Halt);
        assert_eq!(Instruction::Param(Place::var("n")).opcode(), Opcode::Param);
        assert_eq!(
            Instruction::Jgt(Operand::var("i"), Operand::Temp(2), "L1_end".to_string()).opcode(),
            Opcode::Jgt
        );
    }

    #[test]
    fn operand_count_matches_display() {
        let samples = [
            Instruction::Label("main".to_string()),
            Instruction::Mov(Operand::Literal(1), Place::var("x")),
            Instruction::Sub(Operand::var("n"), Operand::Literal(1), Place::Temp(1)),
            Instruction::Halt,
        ];
        for instr in &samples {
            let tokens = instr.to_string().split_whitespace().count();
            assert_eq!(tokens, 1 + instr.opcode().operand_count(), "{instr}");
        }
    }
}
