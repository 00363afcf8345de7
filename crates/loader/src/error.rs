//! Error types for the LS-8 program loader.

use thiserror::Error;

/// Errors produced while loading program text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A line that is neither blank nor a comment did not start with an
    /// 8-bit binary literal.
    #[error("line {line}: malformed program line '{token}' (expected a binary word 0-11111111)")]
    MalformedLine { line: usize, token: String },

    /// The program source could not be read.
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },
}
