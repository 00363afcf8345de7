//! Machine configuration.

use crate::error::RuntimeError;

/// Memory size of the reference machine.
pub const DEFAULT_MEMORY_SIZE: usize = 256;

/// Initial stack pointer of the reference machine.
pub const DEFAULT_STACK_POINTER: u8 = 0xF4;

/// Upper bound on memory size: registers and stack cells hold 8-bit
/// addresses, so nothing above 0xFF is reachable.
pub const MAX_MEMORY_SIZE: usize = 256;

/// Construction parameters for a [`Machine`](crate::Machine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of memory cells.
    pub memory_size: usize,
    /// Initial SP. The stack grows down from here.
    pub stack_pointer: u8,
    /// Maximum number of instructions to execute, if any.
    pub cycle_limit: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            stack_pointer: DEFAULT_STACK_POINTER,
            cycle_limit: None,
        }
    }
}

impl MachineConfig {
    /// Set the cycle limit.
    pub fn with_cycle_limit(mut self, limit: u64) -> Self {
        self.cycle_limit = Some(limit);
        self
    }

    /// Check that the configuration describes a usable machine.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.memory_size == 0 || self.memory_size > MAX_MEMORY_SIZE {
            return Err(RuntimeError::InvalidConfig {
                reason: format!(
                    "memory size {} not in 1..={MAX_MEMORY_SIZE}",
                    self.memory_size
                ),
            });
        }
        if self.stack_pointer as usize > self.memory_size {
            return Err(RuntimeError::InvalidConfig {
                reason: format!(
                    "stack pointer {:#04x} beyond memory size {}",
                    self.stack_pointer, self.memory_size
                ),
            });
        }
        Ok(())
    }
}
