//! Instruction decoding for the LS-8 instruction set.
//!
//! An instruction occupies one to three consecutive memory cells:
//! ```text
//! Cell 0:    opcode (u8)
//! Cell 1:    operand a (register index or immediate), if declared
//! Cell 2:    operand b, if declared
//! ```

use crate::error::DecodeError;
use crate::opcode::Opcode;

/// A single decoded LS-8 instruction.
///
/// Operand bytes the opcode does not declare are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Raw operand bytes. Meaning depends on opcode.
    pub operands: [u8; 2],
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(opcode: Opcode, operand_a: u8, operand_b: u8) -> Self {
        Self {
            opcode,
            operands: [operand_a, operand_b],
        }
    }

    /// Decode an instruction from the start of `cells`.
    ///
    /// Only the operand bytes the opcode declares are read; anything after
    /// them is ignored.
    pub fn decode(cells: &[u8]) -> Result<Self, DecodeError> {
        let (&first, rest) = cells.split_first().ok_or(DecodeError::Truncated {
            opcode: "<none>",
            expected: 1,
            found: 0,
        })?;
        let opcode = Opcode::try_from(first)?;
        let count = opcode.operand_count();
        if rest.len() < count {
            return Err(DecodeError::Truncated {
                opcode: opcode.mnemonic(),
                expected: count,
                found: rest.len(),
            });
        }

        let mut operands = [0u8; 2];
        operands[..count].copy_from_slice(&rest[..count]);
        Ok(Self { opcode, operands })
    }

    /// Encode this instruction to exactly `width()` cells.
    pub fn encode(&self) -> Vec<u8> {
        let mut cells = Vec::with_capacity(self.width());
        cells.push(self.opcode as u8);
        cells.extend_from_slice(&self.operands[..self.opcode.operand_count()]);
        cells
    }

    /// First operand byte.
    pub fn operand_a(&self) -> u8 {
        self.operands[0]
    }

    /// Second operand byte.
    pub fn operand_b(&self) -> u8 {
        self.operands[1]
    }

    /// Number of memory cells this instruction occupies.
    pub fn width(&self) -> usize {
        self.opcode.width()
    }
}
