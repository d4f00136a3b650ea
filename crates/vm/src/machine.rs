//! VM state management: memory, registers, call stack, scopes, label table.

use std::collections::HashMap;

use crate::config::VmConfig;
use crate::error::RuntimeError;
use crate::trace::TraceStep;
use irony_common::{Instruction, Operand, Place, Program, RETVAL};

/// Number of general registers. Temp `tmpN` lives in register `N % 16`.
pub const REGISTER_COUNT: usize = 16;

/// A name → memory address mapping for one call frame.
pub type Scope = HashMap<String, usize>;

/// The Irony virtual machine.
///
/// All state is owned by the instance and rebuilt at the start of every
/// run, so independent VMs never observe each other.
pub struct VM<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Storage capacities.
    pub(crate) config: VmConfig,
    /// Label name → instruction index, built at load.
    pub(crate) labels: HashMap<&'a str, usize>,
    /// Variable storage.
    pub(crate) memory: Vec<i64>,
    /// Next unallocated memory address. Only ever grows during a run.
    pub(crate) next_addr: usize,
    /// General registers backing temps.
    pub(crate) registers: [i64; REGISTER_COUNT],
    /// Call/argument stack; `sp` slots are live.
    pub(crate) stack: Vec<i64>,
    /// Stack pointer.
    pub(crate) sp: usize,
    /// Scope stack; index 0 is the global scope.
    pub(crate) scopes: Vec<Scope>,
    /// Program counter (instruction index).
    pub(crate) pc: usize,
    /// Values printed so far.
    pub(crate) output: Vec<String>,
    /// Collected steps, if tracing is enabled.
    pub(crate) trace: Option<Vec<TraceStep>>,
    /// Values read by the instruction currently executing (tracing only).
    pub(crate) reads: Vec<i64>,
}

impl<'a> VM<'a> {
    /// Create a new VM for the given program with default capacities.
    pub fn new(program: &'a Program) -> Self {
        Self::with_config(program, VmConfig::default())
    }

    /// Create a new VM with explicit capacities.
    pub fn with_config(program: &'a Program, config: VmConfig) -> Self {
        Self {
            program,
            config,
            labels: HashMap::new(),
            memory: vec![0; config.memory_size],
            next_addr: 0,
            registers: [0; REGISTER_COUNT],
            stack: vec![0; config.stack_size],
            sp: 0,
            scopes: vec![Scope::new()],
            pc: 0,
            output: Vec::new(),
            trace: None,
            reads: Vec::new(),
        }
    }

    /// Enable or disable collection of a step-by-step trace.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.trace = enabled.then(Vec::new);
        self
    }

    /// Output produced by the most recent run.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Trace of the most recent run. Empty unless tracing is enabled.
    pub fn trace(&self) -> &[TraceStep] {
        self.trace.as_deref().unwrap_or_default()
    }

    /// Number of live scopes: active calls plus the global scope.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Current stack pointer.
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Value held by a register.
    pub fn register(&self, index: usize) -> Option<i64> {
        self.registers.get(index).copied()
    }

    /// Register backing temp `tmpN`.
    pub fn register_for(temp: u64) -> usize {
        (temp % REGISTER_COUNT as u64) as usize
    }

    /// Clear all run state.
    pub(crate) fn reset(&mut self) {
        self.labels.clear();
        self.memory = vec![0; self.config.memory_size];
        self.next_addr = 0;
        self.registers = [0; REGISTER_COUNT];
        self.stack = vec![0; self.config.stack_size];
        self.sp = 0;
        self.scopes = vec![Scope::new()];
        self.pc = 0;
        self.output.clear();
        if let Some(trace) = self.trace.as_mut() {
            trace.clear();
        }
        self.reads.clear();
    }

    /// Scan the program once, recording the index of every LABEL.
    pub(crate) fn load(&mut self) -> Result<(), RuntimeError> {
        let program = self.program;
        for (at, instr) in program.instructions.iter().enumerate() {
            if let Instruction::Label(name) = instr {
                if self.labels.insert(name.as_str(), at).is_some() {
                    return Err(RuntimeError::DuplicateLabel {
                        at,
                        label: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a jump target.
    pub(crate) fn label(&self, name: &str) -> Result<usize, RuntimeError> {
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnresolvedLabel {
                at: self.pc,
                label: name.to_string(),
            })
    }

    /// Push a value onto the call/argument stack, checking for overflow.
    pub(crate) fn push(&mut self, value: i64) -> Result<(), RuntimeError> {
        if self.sp >= self.stack.len() {
            return Err(RuntimeError::StackOverflow { at: self.pc });
        }
        self.stack[self.sp] = value;
        self.sp += 1;
        Ok(())
    }

    /// Pop a value from the call/argument stack.
    pub(crate) fn pop(&mut self) -> Result<i64, RuntimeError> {
        if self.sp == 0 {
            return Err(RuntimeError::StackUnderflow { at: self.pc });
        }
        self.sp -= 1;
        let value = self.stack[self.sp];
        self.note(value);
        Ok(value)
    }

    /// Memory address of a variable, allocated on first reference.
    ///
    /// `_retval` always lives in the global scope; every other name lives
    /// in the innermost scope only. Outer scopes are never searched.
    pub(crate) fn address_of(&mut self, name: &str) -> Result<usize, RuntimeError> {
        let depth = if name == RETVAL {
            0
        } else {
            self.scopes.len() - 1
        };

        if let Some(&addr) = self.scopes[depth].get(name) {
            return Ok(addr);
        }

        if self.next_addr >= self.memory.len() {
            return Err(RuntimeError::OutOfMemory {
                at: self.pc,
                capacity: self.memory.len(),
            });
        }
        let addr = self.next_addr;
        self.next_addr += 1;
        self.scopes[depth].insert(name.to_string(), addr);
        Ok(addr)
    }

    /// Resolve an operand to its value.
    pub(crate) fn resolve(&mut self, operand: &Operand) -> Result<i64, RuntimeError> {
        let value = match operand {
            Operand::Literal(n) => *n,
            Operand::Temp(n) => self.registers[Self::register_for(*n)],
            Operand::Var(name) => {
                let addr = self.address_of(name)?;
                self.memory[addr]
            }
        };
        self.note(value);
        Ok(value)
    }

    /// Write a value to a register or variable.
    pub(crate) fn store(&mut self, place: &Place, value: i64) -> Result<(), RuntimeError> {
        match place {
            Place::Temp(n) => self.registers[Self::register_for(*n)] = value,
            Place::Var(name) => {
                let addr = self.address_of(name)?;
                self.memory[addr] = value;
            }
        }
        Ok(())
    }

    /// Remember a value read by the current instruction, for the trace.
    fn note(&mut self, value: i64) {
        if self.trace.is_some() {
            self.reads.push(value);
        }
    }
}
