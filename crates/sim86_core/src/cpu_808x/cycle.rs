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

    cpu_808x::cycle.rs

    The cycle cost model. Base instruction costs come from the published
    8086 timing table and are keyed by instruction family and operand
    locations; memory-involving forms add the addressing resolver's
    effective-address surcharge on top.

*/

use crate::cpu_808x::{
    mnemonic::Mnemonic,
    modrm::effective_address_cycles,
    operands::OperandType,
    Intel808x,
};

pub const MOV_REG_REG: u32 = 2;
pub const MOV_REG_MEM: u32 = 8;
pub const MOV_MEM_REG: u32 = 9;
pub const MOV_REG_IMM: u32 = 4;
pub const MOV_MEM_IMM: u32 = 10;

pub const ALU_REG_REG: u32 = 3;
pub const ALU_REG_MEM: u32 = 9;
pub const ALU_MEM_REG: u32 = 16;
pub const ALU_REG_IMM: u32 = 4;
pub const ALU_MEM_IMM: u32 = 17;

// cmp never writes its destination back, so its memory-destination forms
// cost the same as the corresponding read-only forms.
pub const CMP_MEM_REG: u32 = 9;
pub const CMP_MEM_IMM: u32 = 10;

/// Base cost of a mov, plus the EA surcharge for memory-involving forms.
pub fn mov_base_cycles(dst: OperandType, src: OperandType) -> u32 {
    use OperandType::*;
    match (dst, src) {
        (Register8(_) | Register16(_), Register8(_) | Register16(_)) => MOV_REG_REG,
        (Register8(_) | Register16(_), Immediate8(_) | Immediate16(_)) => MOV_REG_IMM,
        (Register8(_) | Register16(_), AddressingMode(mode, _)) => MOV_REG_MEM + effective_address_cycles(mode),
        (AddressingMode(mode, _), Register8(_) | Register16(_)) => MOV_MEM_REG + effective_address_cycles(mode),
        (AddressingMode(mode, _), Immediate8(_) | Immediate16(_)) => MOV_MEM_IMM + effective_address_cycles(mode),
        _ => 0,
    }
}

/// Base cost of an add/sub/cmp, plus the EA surcharge for memory-involving
/// forms.
pub fn alu_base_cycles(mnemonic: Mnemonic, dst: OperandType, src: OperandType) -> u32 {
    use OperandType::*;
    match (dst, src) {
        (Register8(_) | Register16(_), Register8(_) | Register16(_)) => ALU_REG_REG,
        (Register8(_) | Register16(_), Immediate8(_) | Immediate8s(_) | Immediate16(_)) => ALU_REG_IMM,
        (Register8(_) | Register16(_), AddressingMode(mode, _)) => ALU_REG_MEM + effective_address_cycles(mode),
        (AddressingMode(mode, _), Register8(_) | Register16(_)) => {
            let base = if let Mnemonic::CMP = mnemonic { CMP_MEM_REG } else { ALU_MEM_REG };
            base + effective_address_cycles(mode)
        }
        (AddressingMode(mode, _), Immediate8(_) | Immediate8s(_) | Immediate16(_)) => {
            let base = if let Mnemonic::CMP = mnemonic { CMP_MEM_IMM } else { ALU_MEM_IMM };
            base + effective_address_cycles(mode)
        }
        _ => 0,
    }
}

impl Intel808x {
    /// Add an instruction's charged cost to the running total. The total
    /// only ever increases.
    #[inline(always)]
    pub fn charge(&mut self, cycles: u32) {
        self.cycle_total += cycles as u64;
    }

    /// Emit the running cycle-total trace line.
    pub(crate) fn trace_cycle_total(&mut self) {
        if self.trace_logger.is_some() {
            let line = format!("Estimated cycles so far: {}", self.cycle_total);
            self.trace_logger.println(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_808x::{
        addressing::{AddressingMode, Displacement},
        operands::OperandSize,
        Register16,
        Register8,
    };

    #[test]
    fn test_mov_base_costs() {
        let reg = OperandType::Register16(Register16::AX);
        let reg8 = OperandType::Register8(Register8::AL);
        let imm = OperandType::Immediate16(5);
        let direct = OperandType::AddressingMode(
            AddressingMode::Disp16(Displacement::Disp16(1000)),
            OperandSize::Operand16,
        );

        assert_eq!(mov_base_cycles(reg, reg), 2);
        assert_eq!(mov_base_cycles(reg8, reg8), 2);
        assert_eq!(mov_base_cycles(reg, imm), 4);
        assert_eq!(mov_base_cycles(reg, direct), 8 + 6);
        assert_eq!(mov_base_cycles(direct, reg), 9 + 6);
        assert_eq!(mov_base_cycles(direct, imm), 10 + 6);
    }

    #[test]
    fn test_alu_base_costs() {
        let reg = OperandType::Register16(Register16::AX);
        let imm = OperandType::Immediate8s(5);
        let mem = OperandType::AddressingMode(AddressingMode::Bx, OperandSize::Operand16);

        assert_eq!(alu_base_cycles(Mnemonic::ADD, reg, reg), 3);
        assert_eq!(alu_base_cycles(Mnemonic::SUB, reg, imm), 4);
        assert_eq!(alu_base_cycles(Mnemonic::ADD, reg, mem), 9 + 5);
        assert_eq!(alu_base_cycles(Mnemonic::ADD, mem, reg), 16 + 5);
        assert_eq!(alu_base_cycles(Mnemonic::SUB, mem, reg), 16 + 5);
        assert_eq!(alu_base_cycles(Mnemonic::CMP, mem, reg), 9 + 5);
        assert_eq!(alu_base_cycles(Mnemonic::ADD, mem, imm), 17 + 5);
        assert_eq!(alu_base_cycles(Mnemonic::CMP, mem, imm), 10 + 5);
    }
}
