//! Main execution loop and instruction dispatch for the Irony VM.

use crate::error::RuntimeError;
use crate::machine::{Scope, VM};
use crate::trace::TraceStep;
use irony_common::{Instruction, Operand, Place, RETVAL};

/// Where control goes after an instruction.
enum Flow {
    /// Fall through to the next instruction.
    Next,
    /// Continue at an absolute instruction index.
    Jump(usize),
    /// Stop the run.
    Halt,
}

impl<'a> VM<'a> {
    /// Run the program from the start until HALT, the end of the
    /// instruction stream, or an error. Returns the printed values.
    ///
    /// All machine state is reset first, so running twice gives the same
    /// result.
    pub fn execute(&mut self) -> Result<Vec<String>, RuntimeError> {
        self.reset();
        self.load()?;

        let program = self.program;
        while let Some(instr) = program.instructions.get(self.pc) {
            let sp = self.sp;
            let result = self.step(instr);

            // Recorded before propagating, so a failing step ends the trace.
            if let Some(trace) = self.trace.as_mut() {
                trace.push(TraceStep {
                    pc: self.pc,
                    sp,
                    instruction: instr.clone(),
                    operands: std::mem::take(&mut self.reads),
                });
            }

            match result? {
                Flow::Next => self.pc += 1,
                Flow::Jump(target) => self.pc = target,
                Flow::Halt => break,
            }
        }

        Ok(self.output.clone())
    }

    /// Execute a single instruction.
    fn step(&mut self, instr: &Instruction) -> Result<Flow, RuntimeError> {
        match instr {
            Instruction::Label(_) => Ok(Flow::Next),
            Instruction::Jmp(label) => Ok(Flow::Jump(self.label(label)?)),
            Instruction::Param(var) => {
                let value = self.pop()?;
                self.store(var, value)?;
                Ok(Flow::Next)
            }
            Instruction::Mov(src, dst) => {
                let value = self.resolve(src)?;
                self.store(dst, value)?;
                Ok(Flow::Next)
            }
            Instruction::Add(a, b, dst) => self.exec_binary_arith(a, b, dst, i64::wrapping_add),
            Instruction::Sub(a, b, dst) => self.exec_binary_arith(a, b, dst, i64::wrapping_sub),
            Instruction::Ret(val) => self.exec_ret(val),
            Instruction::Jge(val, threshold, label) => {
                self.exec_branch(val, threshold, label, |v, t| v >= t)
            }
            Instruction::Jgt(val, threshold, label) => {
                self.exec_branch(val, threshold, label, |v, t| v > t)
            }
            Instruction::Push(val) => {
                let value = self.resolve(val)?;
                self.push(value)?;
                Ok(Flow::Next)
            }
            Instruction::Call(label) => self.exec_call(label),
            Instruction::Print(val) => {
                let value = self.resolve(val)?;
                self.output.push(value.to_string());
                Ok(Flow::Next)
            }
            Instruction::Halt => Ok(Flow::Halt),
        }
    }

    fn exec_binary_arith(
        &mut self,
        a: &Operand,
        b: &Operand,
        dst: &Place,
        op: fn(i64, i64) -> i64,
    ) -> Result<Flow, RuntimeError> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        self.store(dst, op(a, b))?;
        Ok(Flow::Next)
    }

    fn exec_branch(
        &mut self,
        val: &Operand,
        threshold: &Operand,
        label: &str,
        cond: fn(i64, i64) -> bool,
    ) -> Result<Flow, RuntimeError> {
        let val = self.resolve(val)?;
        let threshold = self.resolve(threshold)?;
        if cond(val, threshold) {
            Ok(Flow::Jump(self.label(label)?))
        } else {
            Ok(Flow::Next)
        }
    }

    /// Calling convention: the caller has pushed the argument. Pop it, push
    /// the return address, push the argument back on top for the callee's
    /// PARAM, then open a fresh scope.
    fn exec_call(&mut self, label: &str) -> Result<Flow, RuntimeError> {
        let target = self.label(label)?;
        let arg = self.pop()?;
        let return_addr = self.pc as i64 + 1;
        self.note_return_addr(return_addr);
        self.push(return_addr)?;
        self.push(arg)?;
        self.scopes.push(Scope::new());
        Ok(Flow::Jump(target))
    }

    /// Pop the return address and the callee's scope, then hand the value
    /// to the caller through the global `_retval`.
    fn exec_ret(&mut self, val: &Operand) -> Result<Flow, RuntimeError> {
        let value = self.resolve(val)?;
        let return_addr = self.pop()?;
        if self.scopes.len() <= 1 {
            return Err(RuntimeError::ReturnOutsideCall { at: self.pc });
        }
        self.scopes.pop();
        self.store(&Place::var(RETVAL), value)?;

        let target = usize::try_from(return_addr).map_err(|_| {
            RuntimeError::InvalidReturnAddress {
                at: self.pc,
                addr: return_addr,
            }
        })?;
        Ok(Flow::Jump(target))
    }

    fn note_return_addr(&mut self, addr: i64) {
        if self.trace.is_some() {
            self.reads.push(addr);
        }
    }
}
