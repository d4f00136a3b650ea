//! Machine sizing.

/// Number of memory cells available for named variables.
pub const DEFAULT_MEMORY_SIZE: usize = 512;

/// Capacity of the call/argument stack.
pub const DEFAULT_STACK_SIZE: usize = 16;

/// Capacities of the VM's fixed-size storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    /// Memory cells. Addresses are handed out once and never reclaimed
    /// during a run, so this bounds the total number of variable bindings.
    pub memory_size: usize,
    /// Call/argument stack slots. Each live call holds one slot for its
    /// return address.
    pub stack_size: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}
