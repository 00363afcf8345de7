//! LS-8 virtual machine — executes programs loaded as raw instruction words.
//!
//! The machine is a small register machine with:
//! - 256 bytes of memory (configurable downward)
//! - Eight 8-bit general-purpose registers, R0-R7
//! - A downward-growing stack starting at 0xF4
//! - A flags register written only by CMP
//!
//! # Usage
//!
//! ```
//! use ls8_common::Program;
//! use ls8_vm::run;
//!
//! // LDI R0,8; LDI R1,9; MUL R0,R1; PRN R0; HLT
//! let program = Program::new(vec![130, 0, 8, 130, 1, 9, 162, 0, 1, 71, 0, 1]);
//!
//! let mut out = Vec::new();
//! let machine = run(&program, &mut out).unwrap();
//! assert_eq!(out, b"72\n");
//! assert!(machine.is_halted());
//! ```

pub mod alu;
pub mod config;
pub mod error;
pub mod execute;
pub mod machine;

pub use alu::AluOp;
pub use config::MachineConfig;
pub use error::RuntimeError;
pub use machine::{Machine, State, FLAG_EQUAL, FLAG_GREATER, FLAG_LESS, REGISTER_COUNT};

use std::io::Write;

use ls8_common::Program;

/// Load a program into a reference machine and run it to HLT.
///
/// PRN output goes to `out`. The halted machine is returned for inspection.
///
/// # Errors
///
/// Returns [`RuntimeError`] if the program does not fit in memory or
/// execution fails.
pub fn run<W: Write>(program: &Program, out: &mut W) -> Result<Machine, RuntimeError> {
    let mut machine = Machine::new();
    machine.load(program)?;
    machine.run(out)?;
    Ok(machine)
}
