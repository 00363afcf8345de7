//! LS-8 program loader — binary text listing → memory image.
//!
//! Program sources hold one instruction word per line, written in base 2.
//! Blank lines and `#` comment lines are skipped:
//!
//! ```text
//! # mult.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! ```
//!
//! # Usage
//!
//! ```
//! use ls8_loader::{disassemble, load};
//!
//! let program = load("10000010\n00000000\n00001000\n00000001\n").unwrap();
//! assert_eq!(program.words(), &[130, 0, 8, 1]);
//! assert_eq!(disassemble(&program), "00: LDI R0, 8\n03: HLT\n");
//! ```

pub mod error;

mod disassembler;
mod lexer;

pub use error::LoadError;

use std::fs;
use std::path::Path;

use lexer::scan_line;
use ls8_common::Program;

/// Load program text into a word image.
///
/// Returns the first error encountered. Nothing is executed, so a
/// malformed file never reaches the machine.
pub fn load(text: &str) -> Result<Program, LoadError> {
    let mut words = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if let Some(word) = scan_line(line, idx + 1)? {
            words.push(word);
        }
    }

    Ok(Program::new(words))
}

/// Read and load a program file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load(&text)
}

/// Disassemble a word image into an addressed listing.
///
/// Used for diagnostics; the listing is not meant to be loaded back.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
