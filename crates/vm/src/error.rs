//! Runtime errors for the LS-8 machine.
//!
//! Every error raised while executing carries the PC of the offending
//! instruction (`at`) for debugging.

use thiserror::Error;

/// Errors that occur while loading into or running the machine.
///
/// None of these are recoverable: the run that produced one is over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Memory access outside `0..size`. Covers fetches running off the end
    /// of memory, pops past the top of memory, and oversized programs.
    #[error("address {address:#04x} out of bounds (memory size {size}) at pc {at:#04x}")]
    OutOfBounds {
        at: usize,
        address: usize,
        size: usize,
    },

    /// A push with SP already at address 0.
    #[error("stack overflow at pc {at:#04x}")]
    StackOverflow { at: usize },

    /// The byte at PC is not an opcode.
    #[error("unknown opcode {opcode:#04x} at pc {at:#04x}")]
    UnknownOpcode { at: usize, opcode: u8 },

    /// The ALU was asked for an operation it does not implement.
    #[error("unsupported ALU operation '{op}'")]
    UnsupportedOperation { op: String },

    /// An operand names a register outside R0-R7.
    #[error("register index {index} out of range at pc {at:#04x}")]
    InvalidRegister { at: usize, index: u8 },

    /// DIV or MOD with a zero divisor.
    #[error("division by zero at pc {at:#04x}")]
    DivisionByZero { at: usize },

    /// The configured cycle limit was reached before HLT.
    #[error("cycle limit {limit} exceeded at pc {at:#04x}")]
    CycleLimitExceeded { at: usize, limit: u64 },

    /// Writing PRN output failed.
    #[error("output error at pc {at:#04x}: {message}")]
    Output { at: usize, message: String },

    /// A `MachineConfig` that cannot describe a working machine.
    #[error("invalid machine configuration: {reason}")]
    InvalidConfig { reason: String },
}
