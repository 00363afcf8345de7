//! Disassembler: memory image → annotated listing.
//!
//! One line per decoded instruction, prefixed by its address in hex.
//! Bytes that do not decode are listed individually as `DATA`.

use ls8_common::{Instruction, Opcode, Program};

/// Disassemble a program into a listing.
pub fn disassemble(program: &Program) -> String {
    let words = program.words();
    let mut lines = Vec::new();
    let mut addr = 0;

    while addr < words.len() {
        match Instruction::decode(&words[addr..]) {
            Ok(instr) => {
                lines.push(format!("{addr:02X}: {}", render(&instr)));
                addr += instr.width();
            }
            Err(_) => {
                lines.push(format!("{addr:02X}: DATA 0x{:02X}", words[addr]));
                addr += 1;
            }
        }
    }

    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn render(instr: &Instruction) -> String {
    let m = instr.opcode.mnemonic();
    let a = instr.operand_a();
    let b = instr.operand_b();

    match instr.opcode {
        Opcode::Hlt | Opcode::Ret => m.to_string(),

        // Register operand
        Opcode::Call
        | Opcode::Jmp
        | Opcode::Jeq
        | Opcode::Jne
        | Opcode::Prn
        | Opcode::Push
        | Opcode::Pop
        | Opcode::Double => format!("{m} R{a}"),

        // Register, immediate
        Opcode::Ldi => format!("{m} R{a}, {b}"),

        // Register, register
        Opcode::Mul | Opcode::Cmp => format!("{m} R{a}, R{b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program() {
        assert_eq!(disassemble(&Program::default()), "");
    }

    #[test]
    fn mult_listing() {
        let program = Program::new(vec![130, 0, 8, 130, 1, 9, 162, 0, 1, 71, 0, 1]);
        assert_eq!(
            disassemble(&program),
            "00: LDI R0, 8\n03: LDI R1, 9\n06: MUL R0, R1\n09: PRN R0\n0B: HLT\n"
        );
    }

    #[test]
    fn unknown_bytes_are_data() {
        let program = Program::new(vec![0, 1, 0xFF]);
        assert_eq!(
            disassemble(&program),
            "00: DATA 0x00\n01: HLT\n02: DATA 0xFF\n"
        );
    }

    #[test]
    fn truncated_instruction_is_data() {
        let program = Program::new(vec![167, 0]);
        assert_eq!(disassemble(&program), "00: DATA 0xA7\n01: DATA 0x00\n");
    }

    #[test]
    fn subroutine_listing() {
        let program = Program::new(vec![80, 1, 160, 2, 17, 84, 3, 85, 4, 86, 5, 69, 6, 70, 7]);
        assert_eq!(
            disassemble(&program),
            "00: CALL R1\n02: DOUBLE R2\n04: RET\n05: JMP R3\n07: JEQ R4\n\
             09: JNE R5\n0B: PUSH R6\n0D: POP R7\n"
        );
    }
}
