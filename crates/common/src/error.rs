//! Decode errors for LS-8 instruction words.

use thiserror::Error;

/// Errors that occur while decoding instruction words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The byte is not an opcode in the instruction table.
    #[error("unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),

    /// The opcode declares more operand bytes than are available.
    #[error("{opcode} expects {expected} operand byte(s), found {found}")]
    Truncated {
        opcode: &'static str,
        expected: usize,
        found: usize,
    },
}
