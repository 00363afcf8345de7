//! Fetch-decode-execute loop and opcode dispatch.

use std::io::Write;

use crate::alu::AluOp;
use crate::error::RuntimeError;
use crate::machine::{Machine, State, FLAG_EQUAL};
use ls8_common::{Instruction, Opcode};

impl Machine {
    /// Step until HLT or error.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), RuntimeError> {
        while self.step(out)? == State::Running {}
        Ok(())
    }

    /// Execute the instruction at PC.
    ///
    /// Every instruction updates PC itself; the loop adds nothing. Stepping
    /// a halted machine does nothing.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<State, RuntimeError> {
        if self.state == State::Halted {
            return Ok(State::Halted);
        }
        if let Some(limit) = self.cycle_limit {
            if self.cycles >= limit {
                return Err(RuntimeError::CycleLimitExceeded { at: self.pc, limit });
            }
        }

        log::trace!("{}", self.trace_line());
        let instr = self.fetch()?;
        let a = instr.operand_a();
        let b = instr.operand_b();

        match instr.opcode {
            Opcode::Hlt => {
                self.state = State::Halted;
                log::debug!("halted at pc {:#04x} after {} cycles", self.pc, self.cycles + 1);
            }

            // Subroutines and branches
            Opcode::Ret => self.pc = self.pop()? as usize,
            Opcode::Call => self.exec_call(&instr)?,
            Opcode::Jmp => self.jump(a)?,
            Opcode::Jeq => self.branch_if(self.fl & FLAG_EQUAL != 0, &instr)?,
            Opcode::Jne => self.branch_if(self.fl & FLAG_EQUAL == 0, &instr)?,

            // Registers and stack
            Opcode::Ldi => {
                self.set_register(a, b)?;
                self.advance(&instr);
            }
            Opcode::Prn => {
                let value = self.register(a)?;
                writeln!(out, "{value}").map_err(|e| RuntimeError::Output {
                    at: self.pc,
                    message: e.to_string(),
                })?;
                self.advance(&instr);
            }
            Opcode::Push => {
                let value = self.register(a)?;
                self.push(value)?;
                self.advance(&instr);
            }
            Opcode::Pop => {
                let reg = self.reg_index(a)?;
                self.registers[reg] = self.pop()?;
                self.advance(&instr);
            }

            // ALU
            Opcode::Mul | Opcode::Cmp => {
                self.alu(AluOp::try_from(instr.opcode)?, a, b)?;
                self.advance(&instr);
            }
            Opcode::Double => {
                self.alu(AluOp::try_from(instr.opcode)?, a, a)?;
                self.advance(&instr);
            }
        }

        self.cycles += 1;
        Ok(self.state)
    }

    /// Decode the opcode at PC, then read only the operand bytes it declares.
    fn fetch(&self) -> Result<Instruction, RuntimeError> {
        let byte = self.read(self.pc)?;
        let opcode = Opcode::try_from(byte).map_err(|_| RuntimeError::UnknownOpcode {
            at: self.pc,
            opcode: byte,
        })?;

        let mut operands = [0u8; 2];
        for (i, operand) in operands
            .iter_mut()
            .take(opcode.operand_count())
            .enumerate()
        {
            *operand = self.read(self.pc + 1 + i)?;
        }

        Ok(Instruction { opcode, operands })
    }

    fn advance(&mut self, instr: &Instruction) {
        self.pc += instr.width();
    }

    fn jump(&mut self, reg: u8) -> Result<(), RuntimeError> {
        self.pc = self.register(reg)? as usize;
        Ok(())
    }

    fn branch_if(&mut self, taken: bool, instr: &Instruction) -> Result<(), RuntimeError> {
        if taken {
            self.jump(instr.operand_a())
        } else {
            self.advance(instr);
            Ok(())
        }
    }

    /// Push the address after CALL, then jump.
    fn exec_call(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let target = self.register(instr.operand_a())?;
        let return_addr = self.pc + instr.width();
        // The stack holds 8-bit cells.
        let cell = u8::try_from(return_addr).map_err(|_| RuntimeError::OutOfBounds {
            at: self.pc,
            address: return_addr,
            size: self.memory.len(),
        })?;
        self.push(cell)?;
        self.pc = target as usize;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfig;
    use crate::machine::{FLAG_GREATER, FLAG_LESS};
    use ls8_common::Program;

    fn machine(words: &[u8]) -> Machine {
        let mut m = Machine::new();
        m.load(&Program::new(words.to_vec())).unwrap();
        m
    }

    fn run_words(words: &[u8]) -> (Result<(), RuntimeError>, Machine, String) {
        let mut m = machine(words);
        let mut out = Vec::new();
        let result = m.run(&mut out);
        (result, m, String::from_utf8(out).unwrap())
    }

    #[test]
    fn hlt_stops_without_moving_pc() {
        let (result, m, out) = run_words(&[1]);
        assert_eq!(result, Ok(()));
        assert!(m.is_halted());
        assert_eq!(m.pc(), 0);
        assert_eq!(m.cycles(), 1);
        assert_eq!(out, "");
    }

    #[test]
    fn step_after_halt_is_noop() {
        let mut m = machine(&[1]);
        let mut out = Vec::new();
        assert_eq!(m.step(&mut out), Ok(State::Halted));
        assert_eq!(m.step(&mut out), Ok(State::Halted));
        assert_eq!(m.cycles(), 1);
    }

    #[test]
    fn ldi_advances_three() {
        let mut m = machine(&[130, 3, 99, 1]);
        assert_eq!(m.step(&mut Vec::new()), Ok(State::Running));
        assert_eq!(m.pc(), 3);
        assert_eq!(m.register(3), Ok(99));
    }

    #[test]
    fn prn_writes_decimal_line() {
        let (result, _, out) = run_words(&[130, 0, 200, 71, 0, 1]);
        assert_eq!(result, Ok(()));
        assert_eq!(out, "200\n");
    }

    #[test]
    fn mul_example() {
        let (_, _, out) = run_words(&[130, 0, 8, 130, 1, 9, 162, 0, 1, 71, 0, 1]);
        assert_eq!(out, "72\n");
    }

    #[test]
    fn double_example() {
        let (result, m, out) = run_words(&[130, 0, 5, 160, 0, 71, 0, 1]);
        assert_eq!(result, Ok(()));
        assert_eq!(out, "10\n");
        assert_eq!(m.pc(), 7);
    }

    #[test]
    fn double_advances_two() {
        let mut m = machine(&[160, 0, 1]);
        m.step(&mut Vec::new()).unwrap();
        assert_eq!(m.pc(), 2);
    }

    #[test]
    fn jmp_sets_pc_from_register() {
        // LDI R0,6; JMP R0; HLT(skipped at 5); HLT at 6
        let mut m = machine(&[130, 0, 6, 84, 0, 1, 1]);
        let mut out = Vec::new();
        m.step(&mut out).unwrap();
        m.step(&mut out).unwrap();
        assert_eq!(m.pc(), 6);
    }

    #[test]
    fn jeq_and_jne_follow_equal_flag() {
        // LDI R0,1; LDI R1,1; LDI R2,20; CMP R0,R1; JEQ R2
        let words = [130, 0, 1, 130, 1, 1, 130, 2, 20, 167, 0, 1, 85, 2];
        let mut m = machine(&words);
        let mut out = Vec::new();
        for _ in 0..5 {
            m.step(&mut out).unwrap();
        }
        assert_eq!(m.flags(), FLAG_EQUAL);
        assert_eq!(m.pc(), 20);

        let mut words = words;
        words[12] = 86; // JNE R2
        let mut m = machine(&words);
        for _ in 0..5 {
            m.step(&mut out).unwrap();
        }
        assert_eq!(m.pc(), 14);
    }

    #[test]
    fn cmp_greater_and_less() {
        let mut m = machine(&[130, 0, 9, 130, 1, 3, 167, 0, 1, 167, 1, 0]);
        let mut out = Vec::new();
        for _ in 0..3 {
            m.step(&mut out).unwrap();
        }
        assert_eq!(m.flags(), FLAG_GREATER);
        m.step(&mut out).unwrap();
        assert_eq!(m.flags(), FLAG_LESS);
        assert_eq!(m.pc(), 12);
    }

    #[test]
    fn call_pushes_return_address() {
        // LDI R1,10; CALL R1
        let mut m = machine(&[130, 1, 10, 80, 1]);
        let mut out = Vec::new();
        m.step(&mut out).unwrap();
        m.step(&mut out).unwrap();
        assert_eq!(m.pc(), 10);
        assert_eq!(m.sp(), 0xF3);
        assert_eq!(m.read(0xF3), Ok(5));
    }

    #[test]
    fn unknown_opcode_fails_fast() {
        let (result, m, _) = run_words(&[130, 0, 1, 0xFF]);
        assert_eq!(
            result,
            Err(RuntimeError::UnknownOpcode {
                at: 3,
                opcode: 0xFF
            })
        );
        assert_eq!(m.pc(), 3);
    }

    #[test]
    fn zeroed_memory_is_unknown_opcode() {
        let (result, _, _) = run_words(&[]);
        assert_eq!(result, Err(RuntimeError::UnknownOpcode { at: 0, opcode: 0 }));
    }

    #[test]
    fn fetch_past_end_of_memory() {
        let config = MachineConfig {
            memory_size: 4,
            stack_pointer: 4,
            cycle_limit: None,
        };
        let mut m = Machine::with_config(config).unwrap();
        // LDI R0,0 at 0..3 then JMP at 3 needs a fourth cell.
        m.load(&Program::new(vec![130, 0, 0, 84])).unwrap();
        let result = m.run(&mut Vec::new());
        assert_eq!(
            result,
            Err(RuntimeError::OutOfBounds {
                at: 3,
                address: 4,
                size: 4
            })
        );
    }

    #[test]
    fn invalid_register_operand() {
        let (result, _, _) = run_words(&[71, 8, 1]);
        assert_eq!(result, Err(RuntimeError::InvalidRegister { at: 0, index: 8 }));
    }

    #[test]
    fn pop_with_bad_register_leaves_stack() {
        let mut m = machine(&[70, 12]);
        assert!(m.step(&mut Vec::new()).is_err());
        assert_eq!(m.sp(), 0xF4);
    }

    #[test]
    fn cycle_limit_stops_infinite_loop() {
        let config = MachineConfig::default().with_cycle_limit(100);
        let mut m = Machine::with_config(config).unwrap();
        // LDI R0,3; JMP R0
        m.load(&Program::new(vec![130, 0, 3, 84, 0])).unwrap();
        let result = m.run(&mut Vec::new());
        assert_eq!(
            result,
            Err(RuntimeError::CycleLimitExceeded { at: 3, limit: 100 })
        );
        assert_eq!(m.cycles(), 100);
    }

    #[test]
    fn call_return_address_must_fit_a_cell() {
        let mut m = Machine::new();
        m.write(254, 80).unwrap(); // CALL R0 at 0xFE
        m.write(255, 0).unwrap();
        m.pc = 254;
        assert_eq!(
            m.step(&mut Vec::new()),
            Err(RuntimeError::OutOfBounds {
                at: 254,
                address: 256,
                size: 256
            })
        );
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn output_failure_is_reported() {
        let mut m = machine(&[71, 0, 1]);
        let result = m.run(&mut FailingWriter);
        assert_eq!(
            result,
            Err(RuntimeError::Output {
                at: 0,
                message: "closed".to_string()
            })
        );
    }
}
