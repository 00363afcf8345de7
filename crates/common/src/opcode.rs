//! Opcode definitions for the LS-8 instruction set.
//!
//! Opcode bytes follow the `AABCDDDD` layout:
//!
//! ```text
//! AA    number of operand bytes that follow the opcode (0-2)
//! B     1 if the instruction is an ALU operation
//! C     1 if the instruction sets the PC itself
//! DDDD  instruction identifier
//! ```
//!
//! The machine decodes through the static table below. DOUBLE is the one
//! opcode whose layout bits disagree with the table: its byte claims two
//! operands, but it takes a single register and is two cells wide.

use crate::error::DecodeError;

const ALU_BIT: u8 = 0b0010_0000;
const SETS_PC_BIT: u8 = 0b0001_0000;

/// Identifies the operation to perform.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Machine control
    /// Stop the dispatch loop.
    Hlt = 0b0000_0001,

    // Subroutines and branches
    /// Pop the return address into PC.
    Ret = 0b0001_0001,
    /// Push the address of the next instruction, jump to `registers[a]`.
    Call = 0b0101_0000,
    /// Jump to `registers[a]`.
    Jmp = 0b0101_0100,
    /// Jump to `registers[a]` if the Equal flag is set.
    Jeq = 0b0101_0101,
    /// Jump to `registers[a]` if the Equal flag is clear.
    Jne = 0b0101_0110,

    // Registers and stack
    /// `registers[a] = b`.
    Ldi = 0b1000_0010,
    /// Print `registers[a]` in decimal.
    Prn = 0b0100_0111,
    /// Push `registers[a]` onto the stack.
    Push = 0b0100_0101,
    /// Pop the top of the stack into `registers[a]`.
    Pop = 0b0100_0110,

    // ALU
    /// `registers[a] *= registers[b]`.
    Mul = 0b1010_0010,
    /// Compare `registers[a]` with `registers[b]`, set FL.
    Cmp = 0b1010_0111,
    /// `registers[a] *= 2`.
    Double = 0b1010_0000,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 13] = [
    Opcode::Hlt,
    Opcode::Ret,
    Opcode::Call,
    Opcode::Jmp,
    Opcode::Jeq,
    Opcode::Jne,
    Opcode::Ldi,
    Opcode::Prn,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Mul,
    Opcode::Cmp,
    Opcode::Double,
];

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Opcode::Hlt),
            17 => Ok(Opcode::Ret),
            80 => Ok(Opcode::Call),
            84 => Ok(Opcode::Jmp),
            85 => Ok(Opcode::Jeq),
            86 => Ok(Opcode::Jne),
            130 => Ok(Opcode::Ldi),
            71 => Ok(Opcode::Prn),
            69 => Ok(Opcode::Push),
            70 => Ok(Opcode::Pop),
            162 => Ok(Opcode::Mul),
            167 => Ok(Opcode::Cmp),
            160 => Ok(Opcode::Double),
            _ => Err(DecodeError::UnknownOpcode(value)),
        }
    }
}

impl Opcode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ret => "RET",
            Opcode::Call => "CALL",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Ldi => "LDI",
            Opcode::Prn => "PRN",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Mul => "MUL",
            Opcode::Cmp => "CMP",
            Opcode::Double => "DOUBLE",
        }
    }

    /// Number of operand bytes following the opcode byte.
    pub fn operand_count(&self) -> usize {
        match self {
            Opcode::Hlt | Opcode::Ret => 0,
            Opcode::Call
            | Opcode::Jmp
            | Opcode::Jeq
            | Opcode::Jne
            | Opcode::Prn
            | Opcode::Push
            | Opcode::Pop
            | Opcode::Double => 1,
            Opcode::Ldi | Opcode::Mul | Opcode::Cmp => 2,
        }
    }

    /// Total instruction length in memory cells, opcode included.
    ///
    /// This is the PC increment for every instruction that does not set
    /// the PC itself.
    pub fn width(&self) -> usize {
        1 + self.operand_count()
    }

    /// Whether the opcode belongs to the ALU group.
    pub fn is_alu(&self) -> bool {
        (*self as u8) & ALU_BIT != 0
    }

    /// Whether the instruction may write the PC directly.
    pub fn sets_pc(&self) -> bool {
        (*self as u8) & SETS_PC_BIT != 0
    }
}
