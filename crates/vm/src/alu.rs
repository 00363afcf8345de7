//! Arithmetic/logic unit.
//!
//! Operations take two register indices. Results overwrite the first
//! register and wrap at 8 bits. CMP writes FL instead.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::RuntimeError;
use crate::machine::{Machine, FLAG_EQUAL, FLAG_GREATER, FLAG_LESS};
use ls8_common::Opcode;

const COMPARE_MASK: u8 = FLAG_EQUAL | FLAG_GREATER | FLAG_LESS;

/// An ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    /// Integer division. Zero divisor is a runtime error.
    Div,
    /// Remainder. Zero divisor is a runtime error.
    Mod,
    And,
    Or,
    Xor,
    /// Bitwise complement of the first register; the second is ignored.
    Not,
    /// Shift left; shifting by 8 or more yields 0.
    Shl,
    /// Logical shift right; shifting by 8 or more yields 0.
    Shr,
    /// Compare and set exactly one of E/G/L.
    Cmp,
}

/// All ALU operations, in definition order.
pub const ALL_ALU_OPS: [AluOp; 12] = [
    AluOp::Add,
    AluOp::Sub,
    AluOp::Mul,
    AluOp::Div,
    AluOp::Mod,
    AluOp::And,
    AluOp::Or,
    AluOp::Xor,
    AluOp::Not,
    AluOp::Shl,
    AluOp::Shr,
    AluOp::Cmp,
];

impl AluOp {
    /// Symbolic name, as accepted by `from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::Mul => "MUL",
            AluOp::Div => "DIV",
            AluOp::Mod => "MOD",
            AluOp::And => "AND",
            AluOp::Or => "OR",
            AluOp::Xor => "XOR",
            AluOp::Not => "NOT",
            AluOp::Shl => "SHL",
            AluOp::Shr => "SHR",
            AluOp::Cmp => "CMP",
        }
    }
}

impl FromStr for AluOp {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ALU_OPS
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| RuntimeError::UnsupportedOperation { op: s.to_string() })
    }
}

impl TryFrom<Opcode> for AluOp {
    type Error = RuntimeError;

    /// Map an ALU-group opcode to the operation it performs.
    ///
    /// DOUBLE is ADD of a register with itself.
    fn try_from(opcode: Opcode) -> Result<Self, Self::Error> {
        match opcode {
            Opcode::Mul => Ok(AluOp::Mul),
            Opcode::Cmp => Ok(AluOp::Cmp),
            Opcode::Double => Ok(AluOp::Add),
            other => Err(RuntimeError::UnsupportedOperation {
                op: other.mnemonic().to_string(),
            }),
        }
    }
}

impl Machine {
    /// Apply `op` to registers `reg_a` and `reg_b`.
    pub fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), RuntimeError> {
        let a = self.reg_index(reg_a)?;
        let x = self.registers[a];
        let y = match op {
            AluOp::Not => 0,
            _ => self.register(reg_b)?,
        };

        let result = match op {
            AluOp::Add => x.wrapping_add(y),
            AluOp::Sub => x.wrapping_sub(y),
            AluOp::Mul => x.wrapping_mul(y),
            AluOp::Div => x
                .checked_div(y)
                .ok_or(RuntimeError::DivisionByZero { at: self.pc })?,
            AluOp::Mod => x
                .checked_rem(y)
                .ok_or(RuntimeError::DivisionByZero { at: self.pc })?,
            AluOp::And => x & y,
            AluOp::Or => x | y,
            AluOp::Xor => x ^ y,
            AluOp::Not => !x,
            AluOp::Shl => x.checked_shl(y as u32).unwrap_or(0),
            AluOp::Shr => x.checked_shr(y as u32).unwrap_or(0),
            AluOp::Cmp => {
                self.fl = (self.fl & !COMPARE_MASK) | compare(x, y);
                return Ok(());
            }
        };

        self.registers[a] = result;
        Ok(())
    }
}

fn compare(x: u8, y: u8) -> u8 {
    match x.cmp(&y) {
        Ordering::Equal => FLAG_EQUAL,
        Ordering::Greater => FLAG_GREATER,
        Ordering::Less => FLAG_LESS,
    }
}
