//! Machine state: memory, register file, stack, flags.

use crate::config::MachineConfig;
use crate::error::RuntimeError;
use ls8_common::Program;

/// Number of general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// FL bit set when the last CMP found its operands equal.
pub const FLAG_EQUAL: u8 = 0b0000_0001;
/// FL bit set when the last CMP found `a > b`.
pub const FLAG_GREATER: u8 = 0b0000_0010;
/// FL bit set when the last CMP found `a < b`.
pub const FLAG_LESS: u8 = 0b0000_0100;

/// Run state of the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// The LS-8 machine.
#[derive(Debug, Clone)]
pub struct Machine {
    /// Main memory, zero-initialized.
    pub(crate) memory: Vec<u8>,
    /// R0-R7.
    pub(crate) registers: [u8; REGISTER_COUNT],
    /// Address of the next instruction to fetch.
    pub(crate) pc: usize,
    /// Address of the current top of stack.
    pub(crate) sp: usize,
    /// Comparison flags, `00000LGE`.
    pub(crate) fl: u8,
    pub(crate) state: State,
    /// Instructions executed so far.
    pub(crate) cycles: u64,
    pub(crate) cycle_limit: Option<u64>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Create a machine in the reference configuration.
    pub fn new() -> Self {
        Self::build(MachineConfig::default())
    }

    /// Create a machine from an explicit configuration.
    pub fn with_config(config: MachineConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MachineConfig) -> Self {
        Self {
            memory: vec![0; config.memory_size],
            registers: [0; REGISTER_COUNT],
            pc: 0,
            sp: config.stack_pointer as usize,
            fl: 0,
            state: State::Running,
            cycles: 0,
            cycle_limit: config.cycle_limit,
        }
    }

    /// Copy a program into memory starting at address 0.
    ///
    /// Fails without touching memory if the program does not fit.
    pub fn load(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let words = program.words();
        if words.len() > self.memory.len() {
            return Err(RuntimeError::OutOfBounds {
                at: self.pc,
                address: self.memory.len(),
                size: self.memory.len(),
            });
        }
        self.memory[..words.len()].copy_from_slice(words);
        log::debug!("loaded {} words", words.len());
        Ok(())
    }

    /// Read the byte at `address`.
    pub fn read(&self, address: usize) -> Result<u8, RuntimeError> {
        self.memory
            .get(address)
            .copied()
            .ok_or(RuntimeError::OutOfBounds {
                at: self.pc,
                address,
                size: self.memory.len(),
            })
    }

    /// Store `value` at `address`.
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), RuntimeError> {
        let size = self.memory.len();
        match self.memory.get_mut(address) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(RuntimeError::OutOfBounds {
                at: self.pc,
                address,
                size,
            }),
        }
    }

    /// Decrement SP, then store `value` at the new top of stack.
    pub(crate) fn push(&mut self, value: u8) -> Result<(), RuntimeError> {
        let sp = self
            .sp
            .checked_sub(1)
            .ok_or(RuntimeError::StackOverflow { at: self.pc })?;
        self.write(sp, value)?;
        self.sp = sp;
        Ok(())
    }

    /// Read the top of stack, then increment SP.
    pub(crate) fn pop(&mut self) -> Result<u8, RuntimeError> {
        let value = self.read(self.sp)?;
        self.sp += 1;
        Ok(value)
    }

    /// Validate a register operand.
    pub(crate) fn reg_index(&self, index: u8) -> Result<usize, RuntimeError> {
        let i = index as usize;
        if i < REGISTER_COUNT {
            Ok(i)
        } else {
            Err(RuntimeError::InvalidRegister { at: self.pc, index })
        }
    }

    /// Value of register `index`.
    pub fn register(&self, index: u8) -> Result<u8, RuntimeError> {
        Ok(self.registers[self.reg_index(index)?])
    }

    /// Overwrite register `index`.
    pub fn set_register(&mut self, index: u8, value: u8) -> Result<(), RuntimeError> {
        let i = self.reg_index(index)?;
        self.registers[i] = value;
        Ok(())
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn sp(&self) -> usize {
        self.sp
    }

    pub fn flags(&self) -> u8 {
        self.fl
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Number of instructions executed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// One-line dump of PC, the next three cells, and R0-R7 in hex.
    ///
    /// Cells past the end of memory render as `00`.
    pub fn trace_line(&self) -> String {
        let cell = |address: usize| self.memory.get(address).copied().unwrap_or(0);
        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            self.pc,
            cell(self.pc),
            cell(self.pc + 1),
            cell(self.pc + 2),
        );
        for reg in &self.registers {
            line.push_str(&format!(" {reg:02X}"));
        }
        line
    }
}
