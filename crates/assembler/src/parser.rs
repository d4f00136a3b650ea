//! Parser for Irony assembly tokens → instructions.
//!
//! Dispatches on the opcode to the operand pattern it takes:
//! labels, value operands, and storage places.

use crate::error::AsmError;
use irony_common::{Instruction, Opcode, Operand, Place};

/// Parse the tokens of a single line into an instruction.
///
/// Returns `Ok(None)` for blank lines (empty token list). Mnemonics are
/// matched case-insensitively; operands are case-sensitive.
pub(crate) fn parse_line(tokens: &[&str], line: usize) -> Result<Option<Instruction>, AsmError> {
    let Some((&first, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let opcode = Opcode::from_mnemonic(&first.to_ascii_uppercase()).ok_or_else(|| {
        AsmError::UnknownInstruction {
            line,
            token: first.to_string(),
        }
    })?;

    let operands = Operands {
        args,
        line,
        opcode: opcode.mnemonic(),
        expected: opcode.operand_count(),
    };
    operands.expect_end()?;

    let instr = match opcode {
        Opcode::Halt => Instruction::Halt,

        // Label only
        Opcode::Label => Instruction::Label(operands.label(0)?),
        Opcode::Jmp => Instruction::Jmp(operands.label(0)?),
        Opcode::Call => Instruction::Call(operands.label(0)?),

        // Single value
        Opcode::Ret => Instruction::Ret(operands.operand(0)?),
        Opcode::Push => Instruction::Push(operands.operand(0)?),
        Opcode::Print => Instruction::Print(operands.operand(0)?),

        // Single place
        Opcode::Param => Instruction::Param(operands.place(0)?),

        // Value → place
        Opcode::Mov => Instruction::Mov(operands.operand(0)?, operands.place(1)?),

        // Two values → place
        Opcode::Add => Instruction::Add(
            operands.operand(0)?,
            operands.operand(1)?,
            operands.place(2)?,
        ),
        Opcode::Sub => Instruction::Sub(
            operands.operand(0)?,
            operands.operand(1)?,
            operands.place(2)?,
        ),

        // Two values → label
        Opcode::Jge => Instruction::Jge(
            operands.operand(0)?,
            operands.operand(1)?,
            operands.label(2)?,
        ),
        Opcode::Jgt => Instruction::Jgt(
            operands.operand(0)?,
            operands.operand(1)?,
            operands.label(2)?,
        ),
    };

    Ok(Some(instr))
}

/// The operand tokens of one line, with what is needed to report errors.
struct Operands<'t, 'a> {
    args: &'t [&'a str],
    line: usize,
    opcode: &'static str,
    expected: usize,
}

impl Operands<'_, '_> {
    fn token(&self, idx: usize) -> Result<&str, AsmError> {
        self.args
            .get(idx)
            .copied()
            .ok_or(AsmError::MissingOperand {
                line: self.line,
                opcode: self.opcode,
                expected: self.expected,
            })
    }

    fn operand(&self, idx: usize) -> Result<Operand, AsmError> {
        let token = self.token(idx)?;
        Operand::parse(token).map_err(|source| AsmError::InvalidOperand {
            line: self.line,
            token: token.to_string(),
            source,
        })
    }

    fn place(&self, idx: usize) -> Result<Place, AsmError> {
        let token = self.token(idx)?;
        Place::parse(token).map_err(|source| AsmError::InvalidOperand {
            line: self.line,
            token: token.to_string(),
            source,
        })
    }

    fn label(&self, idx: usize) -> Result<String, AsmError> {
        let token = self.token(idx)?;
        if token.chars().all(|c| c.is_alphanumeric() || c == '_') {
            Ok(token.to_string())
        } else {
            Err(AsmError::InvalidLabel {
                line: self.line,
                token: token.to_string(),
            })
        }
    }

    /// Check that there are no tokens past the expected operand count.
    fn expect_end(&self) -> Result<(), AsmError> {
        match self.args.get(self.expected) {
            Some(extra) => Err(AsmError::UnexpectedToken {
                line: self.line,
                token: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}
