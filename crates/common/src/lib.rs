//! LS-8 common types and instruction decoding.
//!
//! This crate provides the foundational data structures for the LS-8
//! instruction set:
//!
//! - [`Opcode`] — the thirteen opcodes the machine executes
//! - [`Instruction`] — an opcode plus its operand bytes, with decode/encode
//! - [`Program`] — the word image handed from the loader to the machine
//! - [`DecodeError`] — errors from decoding instruction words

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::Program;
