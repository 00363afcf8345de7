//! Program representation for LS-8 memory images.
//!
//! A program is the flat sequence of instruction words the loader produces,
//! one word per memory cell, destined for address 0 onward.

use crate::error::DecodeError;
use crate::instruction::Instruction;

/// An LS-8 program: instruction words in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The word stream.
    pub words: Vec<u8>,
}

impl Program {
    /// Create a new program from raw words.
    pub fn new(words: Vec<u8>) -> Self {
        Self { words }
    }

    /// Build a program by encoding instructions back to back.
    pub fn from_instructions(instructions: &[Instruction]) -> Self {
        let words = instructions.iter().flat_map(Instruction::encode).collect();
        Self { words }
    }

    /// Decode the word stream linearly from address 0.
    ///
    /// Stops at the first word that does not decode. Data placed after
    /// code will usually fail here, so this is a listing aid rather than a
    /// validity check.
    pub fn decode(&self) -> Result<Vec<Instruction>, DecodeError> {
        let mut instructions = Vec::new();
        let mut addr = 0;
        while addr < self.words.len() {
            let instr = Instruction::decode(&self.words[addr..])?;
            addr += instr.width();
            instructions.push(instr);
        }
        Ok(instructions)
    }

    /// The raw words.
    pub fn words(&self) -> &[u8] {
        &self.words
    }

    /// Number of words in the program.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the program has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
