//! Opcode definitions for Irony assembly.

/// Identifies the operation an instruction performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Control flow
    /// Marks a jump target. No-op at run time.
    Label,
    /// Unconditional jump to a label.
    Jmp,
    /// Jump if `val >= threshold`.
    Jge,
    /// Jump if `val > threshold`.
    Jgt,

    // Data movement and arithmetic
    /// Copy a value into a register or variable.
    Mov,
    /// `dst = a + b`.
    Add,
    /// `dst = a - b`.
    Sub,

    // Calling convention
    /// Push a value onto the call/argument stack.
    Push,
    /// Call a function label, leaving the argument on top of the return address.
    Call,
    /// Pop the argument into a variable of the callee's scope.
    Param,
    /// Return a value to the caller through `_retval`.
    Ret,

    // Output and VM control
    /// Append a value to the program output.
    Print,
    /// Stop execution.
    Halt,
}

/// All opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 13] = [
    Opcode::Label,
    Opcode::Jmp,
    Opcode::Jge,
    Opcode::Jgt,
    Opcode::Mov,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Push,
    Opcode::Call,
    Opcode::Param,
    Opcode::Ret,
    Opcode::Print,
    Opcode::Halt,
];

impl Opcode {
    /// The assembly mnemonic for this opcode.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Label => "LABEL",
            Opcode::Jmp => "JMP",
            Opcode::Jge => "JGE",
            Opcode::Jgt => "JGT",
            Opcode::Mov => "MOV",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Push => "PUSH",
            Opcode::Call => "CALL",
            Opcode::Param => "PARAM",
            Opcode::Ret => "RET",
            Opcode::Print => "PRINT",
            Opcode::Halt => "HALT",
        }
    }

    /// Look up an opcode by its mnemonic. Matching is exact (uppercase).
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
    }

    /// Number of operand tokens that follow the mnemonic.
    pub fn operand_count(self) -> usize {
        match self {
            Opcode::Halt => 0,
            Opcode::Label
            | Opcode::Jmp
            | Opcode::Push
            | Opcode::Call
            | Opcode::Param
            | Opcode::Ret
            | Opcode::Print => 1,
            Opcode::Mov => 2,
            Opcode::Jge | Opcode::Jgt | Opcode::Add | Opcode::Sub => 3,
        }
    }
}
