/*
    sim86
    https://github.com/dbalsom/sim86

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    ---------------------------------------------------------------------------

    cpu_808x::execute.rs

    Executes an instruction after it has been decoded. Applies data movement
    and arithmetic semantics to the register file and memory, recomputes the
    flags, and charges the instruction's cycle cost.

    Of the conditional jump and loop forms, only jnz affects control flow;
    the remaining fifteen jumps and the four loop forms are decoded and
    reported as disassembly only. The DF_DISASM capability flag in the decode
    table marks which forms execute.

*/

use crate::{
    cpu_808x::{
        cycle::{alu_base_cycles, mov_base_cycles},
        decode::{DECODE, DF_DISASM},
        instruction::{Instruction, InstructionWidth},
        mnemonic::Mnemonic,
        operands::OperandType,
        Intel808x,
    },
    error::CpuError,
};

impl Intel808x {
    /// Execute the current instruction. At the phase this function is called
    /// the opcode, modrm, displacement and any immediate have been fetched
    /// and resolved into an Instruction, and the decode cursor has advanced
    /// past the instruction's encoded length.
    pub fn execute_instruction(&mut self, i: &Instruction) -> Result<(), CpuError> {
        // Disassembly-only forms are reported to the trace sink; their
        // effect on architectural state is not simulated.
        if DECODE[i.decode_idx].flags & DF_DISASM != 0 {
            let line = i.to_string();
            self.trace_logger.println(line);
            return Ok(());
        }

        match i.mnemonic {
            Mnemonic::MOV => self.op_mov(i),
            Mnemonic::ADD | Mnemonic::SUB | Mnemonic::CMP => self.op_alu(i),
            Mnemonic::JNZ => {
                self.op_jnz(i);
                Ok(())
            }
            _ => unreachable!("execute_instruction(): unexpected mnemonic {:?}", i.mnemonic),
        }
    }

    /// Copy the source operand into the destination. mov never touches the
    /// flags.
    fn op_mov(&mut self, i: &Instruction) -> Result<(), CpuError> {
        match i.width {
            InstructionWidth::Byte => {
                let value = self.read_operand8(i.operand2_type)?;
                self.write_operand8(i.operand1_type, value)?;
            }
            InstructionWidth::Word => {
                let value = self.read_operand16(i.operand2_type)?;
                self.write_operand16(i.operand1_type, value)?;
            }
        }
        self.charge(mov_base_cycles(i.operand1_type, i.operand2_type));
        Ok(())
    }

    /// Compute destination +/- source. The result is written back for add
    /// and sub and discarded for cmp; the flags are recomputed either way.
    fn op_alu(&mut self, i: &Instruction) -> Result<(), CpuError> {
        let dst_val = self.read_operand_signed(i.operand1_type, i.width)?;
        let src_val = self.read_operand_signed(i.operand2_type, i.width)?;

        let result = match i.mnemonic {
            Mnemonic::ADD => dst_val.wrapping_add(src_val),
            Mnemonic::SUB | Mnemonic::CMP => dst_val.wrapping_sub(src_val),
            _ => unreachable!("op_alu(): unexpected mnemonic {:?}", i.mnemonic),
        };

        self.set_szf_from_result(result);

        if i.mnemonic != Mnemonic::CMP {
            match i.width {
                InstructionWidth::Byte => self.write_operand8(i.operand1_type, result as u8)?,
                InstructionWidth::Word => self.write_operand16(i.operand1_type, result as u16)?,
            }
        }

        self.charge(alu_base_cycles(i.mnemonic, i.operand1_type, i.operand2_type));
        Ok(())
    }

    /// Displace the decode cursor when the zero flag is clear. The cursor
    /// has already advanced past the 2-byte instruction.
    fn op_jnz(&mut self, i: &Instruction) {
        if let OperandType::Relative8(rel8) = i.operand1_type {
            if !self.zero {
                self.ip = self.ip.wrapping_add(rel8 as i16 as u16);
            }
        }
    }

    /// Fetch an operand as a signed 16-bit value. 8-bit operands are
    /// sign-extended, so flag computation is uniform at 16 bits across both
    /// operand widths.
    fn read_operand_signed(&self, operand: OperandType, width: InstructionWidth) -> Result<i16, CpuError> {
        match width {
            InstructionWidth::Byte => Ok(self.read_operand8(operand)? as i8 as i16),
            InstructionWidth::Word => Ok(self.read_operand16(operand)? as i16),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_808x::{Register16, Register8, REGISTER16_LUT, REGISTER8_LUT};

    fn cpu_with_program(program: &[u8]) -> Intel808x {
        let mut cpu = Intel808x::new();
        cpu.load_program(program).unwrap();
        cpu
    }

    fn run_program(program: &[u8]) -> Intel808x {
        let mut cpu = cpu_with_program(program);
        cpu.run().unwrap();
        cpu
    }

    #[test]
    fn test_register_immediate_move_scenario() {
        // mov ax, 5: one instruction, register 0 becomes 5, cursor advances
        // by 3, and the register-immediate base cost is charged.
        let cpu = run_program(&[0xB8, 0x05, 0x00]);
        assert_eq!(cpu.get_register16(Register16::AX), 5);
        assert_eq!(cpu.ip(), 3);
        assert_eq!(cpu.cycle_total(), 4);
    }

    #[test]
    fn test_register_to_register_move_scenario() {
        // mov ax, bx with bx preset to -7: ax becomes -7, flags untouched,
        // cursor advances by 2.
        let mut cpu = cpu_with_program(&[0x89, 0xD8]);
        cpu.set_register16(Register16::BX, (-7i16) as u16);
        cpu.set_szf_from_result(0); // zero=true, sign=false
        cpu.run().unwrap();

        assert_eq!(cpu.get_register16(Register16::AX) as i16, -7);
        assert_eq!(cpu.get_register16(Register16::BX) as i16, -7);
        assert!(cpu.zero_flag());
        assert!(!cpu.sign_flag());
        assert_eq!(cpu.ip(), 2);
        assert_eq!(cpu.cycle_total(), 2);
    }

    #[test]
    fn test_all_reg_to_reg_mov_combinations_word() {
        for src in 0..8u8 {
            for dst in 0..8u8 {
                let modrm = 0b11_000_000 | (src << 3) | dst;
                let mut cpu = cpu_with_program(&[0x89, modrm]);
                for (idx, reg) in REGISTER16_LUT.iter().enumerate() {
                    cpu.set_register16(*reg, 0x1000 + idx as u16);
                }
                cpu.run().unwrap();

                assert_eq!(
                    cpu.get_register16(REGISTER16_LUT[dst as usize]),
                    0x1000 + src as u16,
                    "mov {}, {}",
                    REGISTER16_LUT[dst as usize],
                    REGISTER16_LUT[src as usize]
                );
                assert_eq!(cpu.get_register16(REGISTER16_LUT[src as usize]), 0x1000 + src as u16);
            }
        }
    }

    #[test]
    fn test_all_reg_to_reg_mov_combinations_byte() {
        for src in 0..8u8 {
            for dst in 0..8u8 {
                let modrm = 0b11_000_000 | (src << 3) | dst;
                let mut cpu = cpu_with_program(&[0x88, modrm]);
                for (idx, reg) in REGISTER8_LUT.iter().enumerate() {
                    cpu.set_register8(*reg, 0x10 + idx as u8);
                }
                cpu.run().unwrap();

                assert_eq!(
                    cpu.get_register8(REGISTER8_LUT[dst as usize]),
                    0x10 + src as u8,
                    "mov {}, {}",
                    REGISTER8_LUT[dst as usize],
                    REGISTER8_LUT[src as usize]
                );
                assert_eq!(cpu.get_register8(REGISTER8_LUT[src as usize]), 0x10 + src as u8);
            }
        }
    }

    #[test]
    fn test_add_sub_flag_properties() {
        let boundary: [i16; 6] = [0, 32767, -32768, -1, 5, -100];
        for &a in &boundary {
            for &b in &boundary {
                // add ax, bx
                let mut cpu = cpu_with_program(&[0x01, 0xD8]);
                cpu.set_register16(Register16::AX, a as u16);
                cpu.set_register16(Register16::BX, b as u16);
                cpu.run().unwrap();
                let expected = a.wrapping_add(b);
                assert_eq!(cpu.get_register16(Register16::AX) as i16, expected);
                assert_eq!(cpu.zero_flag(), expected == 0, "add {} + {}", a, b);
                assert_eq!(cpu.sign_flag(), expected < 0, "add {} + {}", a, b);

                // sub ax, bx
                let mut cpu = cpu_with_program(&[0x29, 0xD8]);
                cpu.set_register16(Register16::AX, a as u16);
                cpu.set_register16(Register16::BX, b as u16);
                cpu.run().unwrap();
                let expected = a.wrapping_sub(b);
                assert_eq!(cpu.get_register16(Register16::AX) as i16, expected);
                assert_eq!(cpu.zero_flag(), expected == 0, "sub {} - {}", a, b);
                assert_eq!(cpu.sign_flag(), expected < 0, "sub {} - {}", a, b);
            }
        }
    }

    #[test]
    fn test_cmp_mutates_neither_operand() {
        let values: [i16; 4] = [0, 32767, -32768, -1];
        for &a in &values {
            for &b in &values {
                let mut cpu = cpu_with_program(&[0x39, 0xD8]); // cmp ax, bx
                cpu.set_register16(Register16::AX, a as u16);
                cpu.set_register16(Register16::BX, b as u16);
                cpu.run().unwrap();

                assert_eq!(cpu.get_register16(Register16::AX) as i16, a);
                assert_eq!(cpu.get_register16(Register16::BX) as i16, b);
                let expected = a.wrapping_sub(b);
                assert_eq!(cpu.zero_flag(), expected == 0);
                assert_eq!(cpu.sign_flag(), expected < 0);
            }
        }
    }

    #[test]
    fn test_cycle_accounting_is_deterministic() {
        let program = [
            0xB8, 0x05, 0x00, // mov ax, 5      (4)
            0xBB, 0x03, 0x00, // mov bx, 3      (4)
            0x01, 0xD8, //       add ax, bx     (3)
            0x29, 0xD8, //       sub ax, bx     (3)
            0x39, 0xD8, //       cmp ax, bx     (3)
        ];
        let first = run_program(&program);
        let second = run_program(&program);
        assert_eq!(first.cycle_total(), 17);
        assert_eq!(first.cycle_total(), second.cycle_total());
    }

    #[test]
    fn test_memory_move_round_trip() {
        let program = [
            0x89, 0x06, 0xE8, 0x03, // mov [1000], ax   (9 + 6)
            0x8B, 0x0E, 0xE8, 0x03, // mov cx, [1000]   (8 + 6)
        ];
        let mut cpu = cpu_with_program(&program);
        cpu.set_register16(Register16::AX, 0xBEEF);
        cpu.run().unwrap();

        assert_eq!(cpu.memory().read_u16(1000).unwrap(), 0xBEEF);
        assert_eq!(cpu.get_register16(Register16::CX), 0xBEEF);
        assert_eq!(cpu.cycle_total(), 15 + 14);
    }

    #[test]
    fn test_add_to_memory_destination() {
        let mut cpu = cpu_with_program(&[0x01, 0x07]); // add [bx], ax
        cpu.set_register16(Register16::BX, 0x2000);
        cpu.set_register16(Register16::AX, 7);
        cpu.memory_mut().write_u16(0x2000, 35).unwrap();
        cpu.run().unwrap();

        assert_eq!(cpu.memory().read_u16(0x2000).unwrap(), 42);
        assert!(!cpu.zero_flag());
        assert!(!cpu.sign_flag());
        // 16 base cycles plus the [bx] effective address surcharge of 5.
        assert_eq!(cpu.cycle_total(), 21);
    }

    #[test]
    fn test_byte_width_alu_uses_register_halves() {
        // add ah, bl: only the high half of ax changes
        let mut cpu = cpu_with_program(&[0x00, 0xDC]); // modrm: mod=11 reg=BL rm=AH
        cpu.set_register16(Register16::AX, 0x0102);
        cpu.set_register8(Register8::BL, 3);
        cpu.run().unwrap();

        assert_eq!(cpu.get_register8(Register8::AH), 4);
        assert_eq!(cpu.get_register8(Register8::AL), 0x02);
    }

    #[test]
    fn test_jnz_countdown_loop() {
        let program = [
            0xB9, 0x03, 0x00, // mov cx, 3        (4)
            0x83, 0xE9, 0x01, // sub cx, 1        (4 per iteration)
            0x75, 0xFB, //       jnz -5           (uncosted)
        ];
        let cpu = run_program(&program);

        assert_eq!(cpu.get_register16(Register16::CX), 0);
        assert!(cpu.zero_flag());
        assert_eq!(cpu.ip(), 8);
        assert_eq!(cpu.cycle_total(), 4 + 3 * 4);
    }

    #[test]
    fn test_jnz_not_taken_when_zero_set() {
        let program = [
            0xB9, 0x00, 0x00, // mov cx, 0
            0x83, 0xE9, 0x00, // sub cx, 0 -> zero set
            0x75, 0x10, //       jne +16, not taken
        ];
        let cpu = run_program(&program);
        assert_eq!(cpu.ip(), 8);
    }

    #[test]
    fn test_immediate_to_accumulator_executes() {
        let cpu = run_program(&[0x04, 0x05]); // add al, 5
        assert_eq!(cpu.get_register8(Register8::AL), 5);
        assert_eq!(cpu.cycle_total(), 4);
        assert!(!cpu.zero_flag());

        let program = [
            0x05, 0x05, 0x00, // add ax, 5
            0x3D, 0x05, 0x00, // cmp ax, 5 -> zero set
            0x2D, 0x06, 0x00, // sub ax, 6 -> sign set
        ];
        let cpu = run_program(&program);
        assert_eq!(cpu.get_register16(Register16::AX) as i16, -1);
        assert!(!cpu.zero_flag());
        assert!(cpu.sign_flag());
    }

    #[test]
    fn test_disassembly_only_forms_do_not_execute() {
        // Direct accumulator moves decode and trace but alter no state.
        let mut cpu = cpu_with_program(&[0xA1, 0xE8, 0x03]); // mov ax, [1000]
        cpu.memory_mut().write_u16(1000, 0x1234).unwrap();
        cpu.run().unwrap();
        assert_eq!(cpu.get_register16(Register16::AX), 0);
        assert_eq!(cpu.cycle_total(), 0);

        // A conditional jump other than jnz never displaces the cursor.
        let mut cpu = cpu_with_program(&[0x74, 0x10]); // je +16 with zero set
        cpu.set_szf_from_result(0);
        cpu.run().unwrap();
        assert_eq!(cpu.ip(), 2);
        assert_eq!(cpu.cycle_total(), 0);
    }

    #[test]
    fn test_word_access_at_top_of_memory_errors() {
        let mut cpu = cpu_with_program(&[0x89, 0x07]); // mov [bx], ax
        cpu.set_register16(Register16::BX, 0xFFFF);
        assert_eq!(cpu.run(), Err(CpuError::AddressOutOfRange(0xFFFF)));
    }

    #[test]
    fn test_unknown_opcode_preserves_prior_state() {
        let mut cpu = cpu_with_program(&[0xB8, 0x05, 0x00, 0xF4]);
        assert_eq!(cpu.run(), Err(CpuError::UnknownOpcode(0xF4, 3)));
        // The failed instruction applied nothing; the preceding mov stands.
        assert_eq!(cpu.get_register16(Register16::AX), 5);
        assert_eq!(cpu.ip(), 3);
        assert_eq!(cpu.cycle_total(), 4);
    }
}
