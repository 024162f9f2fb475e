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

    cpu_808x::decode.rs

    Opcode fetch and instruction decoding routines.

    This module is implemented as an associated function, decode(), which
    operates on implementors of ByteQueue. Dispatch goes through a const
    template table covering every opcode byte, with secondary entries for the
    arithmetic immediate group whose operation lives in the modrm 'reg'
    field. Opcode bytes outside the supported subset resolve to an invalid
    marker and fail decode with UnknownOpcode.

*/

use crate::{
    bytequeue::ByteQueue,
    cpu_808x::{
        addressing::Displacement,
        instruction::{Instruction, InstructionWidth},
        mnemonic::Mnemonic,
        modrm::ModRmByte,
        operands::{OperandSize, OperandType},
        Intel808x,
        Register16,
        Register8,
    },
    error::CpuError,
};

#[derive(Copy, Clone, PartialEq)]
pub enum OperandTemplate {
    NoOperand,
    ModRM8,
    ModRM16,
    Register8,
    Register16,
    Immediate8,
    Immediate16,
    Immediate8SignExtended,
    Relative8,
    Offset8,
    Offset16,
    FixedRegister8(Register8),
    FixedRegister16(Register16),
}

impl OperandTemplate {
    pub fn resolve_operand(
        &self,
        bytes: &mut impl ByteQueue,
        modrm: &ModRmByte,
        displacement: Displacement,
        size: &mut u32,
    ) -> OperandType {
        match self {
            OperandTemplate::ModRM8 => {
                let addr_mode = modrm.addressing_mode(displacement);
                match addr_mode {
                    crate::cpu_808x::AddressingMode::RegisterMode => OperandType::Register8(modrm.op1_reg8()),
                    _ => OperandType::AddressingMode(addr_mode, OperandSize::Operand8),
                }
            }
            OperandTemplate::ModRM16 => {
                let addr_mode = modrm.addressing_mode(displacement);
                match addr_mode {
                    crate::cpu_808x::AddressingMode::RegisterMode => OperandType::Register16(modrm.op1_reg16()),
                    _ => OperandType::AddressingMode(addr_mode, OperandSize::Operand16),
                }
            }
            OperandTemplate::Register8 => OperandType::Register8(modrm.op2_reg8()),
            OperandTemplate::Register16 => OperandType::Register16(modrm.op2_reg16()),
            OperandTemplate::Immediate8 => {
                let operand = bytes.q_read_u8();
                *size += 1;
                OperandType::Immediate8(operand)
            }
            OperandTemplate::Immediate16 => {
                let operand = bytes.q_read_u16();
                *size += 2;
                OperandType::Immediate16(operand)
            }
            OperandTemplate::Immediate8SignExtended => {
                let operand = bytes.q_read_i8();
                *size += 1;
                OperandType::Immediate8s(operand)
            }
            OperandTemplate::Relative8 => {
                let operand = bytes.q_read_i8();
                *size += 1;
                OperandType::Relative8(operand)
            }
            OperandTemplate::Offset8 => {
                let operand = bytes.q_read_u16();
                *size += 2;
                OperandType::Offset8(operand)
            }
            OperandTemplate::Offset16 => {
                let operand = bytes.q_read_u16();
                *size += 2;
                OperandType::Offset16(operand)
            }
            OperandTemplate::FixedRegister8(r8) => OperandType::Register8(*r8),
            OperandTemplate::FixedRegister16(r16) => OperandType::Register16(*r16),
            _ => OperandType::NoOperand,
        }
    }
}

type Ot = OperandTemplate;

// Decode flags.
pub const DF_NONE: u16 = 0b0000_0000;
// Instruction has a modrm byte
pub const DF_MODRM: u16 = 0b0000_0001;
// Instruction is decoded and traced as disassembly only; it is not executed
pub const DF_DISASM: u16 = 0b0000_0010;

pub struct InstTemplate {
    pub grp: u8,
    pub flags: u16,
    pub mnemonic: Mnemonic,
    pub operand1: OperandTemplate,
    pub operand2: OperandTemplate,
}

impl InstTemplate {
    fn width(&self) -> InstructionWidth {
        use OperandTemplate::*;
        match (self.operand1, self.operand2) {
            (ModRM8, _) | (_, ModRM8) => InstructionWidth::Byte,
            (Register8, _) | (_, Register8) => InstructionWidth::Byte,
            (FixedRegister8(_), _) | (_, FixedRegister8(_)) => InstructionWidth::Byte,
            (Offset8, _) | (_, Offset8) => InstructionWidth::Byte,
            _ => InstructionWidth::Word,
        }
    }
}

macro_rules! inst {
    ($op:literal, $grp:literal, $flags:expr, $m:ident, $o1:expr, $o2:expr) => {
        InstTemplate {
            grp: $grp,
            flags: $flags,
            mnemonic: Mnemonic::$m,
            operand1: $o1,
            operand2: $o2,
        }
    };
}

#[rustfmt::skip]
pub const DECODE: [InstTemplate; 288] = [
    inst!( 0x00, 0, DF_MODRM,  ADD,           Ot::ModRM8,                          Ot::Register8),
    inst!( 0x01, 0, DF_MODRM,  ADD,           Ot::ModRM16,                         Ot::Register16),
    inst!( 0x02, 0, DF_MODRM,  ADD,           Ot::Register8,                       Ot::ModRM8),
    inst!( 0x03, 0, DF_MODRM,  ADD,           Ot::Register16,                      Ot::ModRM16),
    inst!( 0x04, 0, DF_NONE,   ADD,           Ot::FixedRegister8(Register8::AL),   Ot::Immediate8),
    inst!( 0x05, 0, DF_NONE,   ADD,           Ot::FixedRegister16(Register16::AX), Ot::Immediate16),
    inst!( 0x06, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x07, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x08, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x09, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x0A, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x0B, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x0C, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x0D, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x0E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x0F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x10, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x11, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x12, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x13, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x14, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x15, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x16, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x17, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x18, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x19, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x1A, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x1B, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x1C, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x1D, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x1E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x1F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x20, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x21, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x22, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x23, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x24, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x25, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x26, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x27, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x28, 0, DF_MODRM,  SUB,           Ot::ModRM8,                          Ot::Register8),
    inst!( 0x29, 0, DF_MODRM,  SUB,           Ot::ModRM16,                         Ot::Register16),
    inst!( 0x2A, 0, DF_MODRM,  SUB,           Ot::Register8,                       Ot::ModRM8),
    inst!( 0x2B, 0, DF_MODRM,  SUB,           Ot::Register16,                      Ot::ModRM16),
    inst!( 0x2C, 0, DF_NONE,   SUB,           Ot::FixedRegister8(Register8::AL),   Ot::Immediate8),
    inst!( 0x2D, 0, DF_NONE,   SUB,           Ot::FixedRegister16(Register16::AX), Ot::Immediate16),
    inst!( 0x2E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x2F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x30, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x31, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x32, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x33, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x34, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x35, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x36, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x37, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x38, 0, DF_MODRM,  CMP,           Ot::ModRM8,                          Ot::Register8),
    inst!( 0x39, 0, DF_MODRM,  CMP,           Ot::ModRM16,                         Ot::Register16),
    inst!( 0x3A, 0, DF_MODRM,  CMP,           Ot::Register8,                       Ot::ModRM8),
    inst!( 0x3B, 0, DF_MODRM,  CMP,           Ot::Register16,                      Ot::ModRM16),
    inst!( 0x3C, 0, DF_NONE,   CMP,           Ot::FixedRegister8(Register8::AL),   Ot::Immediate8),
    inst!( 0x3D, 0, DF_NONE,   CMP,           Ot::FixedRegister16(Register16::AX), Ot::Immediate16),
    inst!( 0x3E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x3F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x40, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x41, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x42, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x43, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x44, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x45, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x46, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x47, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x48, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x49, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x4A, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x4B, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x4C, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x4D, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x4E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x4F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x50, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x51, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x52, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x53, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x54, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x55, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x56, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x57, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x58, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x59, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x5A, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x5B, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x5C, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x5D, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x5E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x5F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x60, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x61, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x62, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x63, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x64, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x65, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x66, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x67, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x68, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x69, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x6A, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x6B, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x6C, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x6D, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x6E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x6F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x70, 0, DF_DISASM, JO,            Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x71, 0, DF_DISASM, JNO,           Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x72, 0, DF_DISASM, JB,            Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x73, 0, DF_DISASM, JNB,           Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x74, 0, DF_DISASM, JZ,            Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x75, 0, DF_NONE,   JNZ,           Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x76, 0, DF_DISASM, JBE,           Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x77, 0, DF_DISASM, JNBE,          Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x78, 0, DF_DISASM, JS,            Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x79, 0, DF_DISASM, JNS,           Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x7A, 0, DF_DISASM, JP,            Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x7B, 0, DF_DISASM, JNP,           Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x7C, 0, DF_DISASM, JL,            Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x7D, 0, DF_DISASM, JNL,           Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x7E, 0, DF_DISASM, JLE,           Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x7F, 0, DF_DISASM, JNLE,          Ot::Relative8,                       Ot::NoOperand),
    inst!( 0x80, 1, DF_MODRM,  Group,         Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x81, 2, DF_MODRM,  Group,         Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x82, 3, DF_MODRM,  Group,         Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x83, 4, DF_MODRM,  Group,         Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x84, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x85, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x86, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x87, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x88, 0, DF_MODRM,  MOV,           Ot::ModRM8,                          Ot::Register8),
    inst!( 0x89, 0, DF_MODRM,  MOV,           Ot::ModRM16,                         Ot::Register16),
    inst!( 0x8A, 0, DF_MODRM,  MOV,           Ot::Register8,                       Ot::ModRM8),
    inst!( 0x8B, 0, DF_MODRM,  MOV,           Ot::Register16,                      Ot::ModRM16),
    inst!( 0x8C, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x8D, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x8E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x8F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x90, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x91, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x92, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x93, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x94, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x95, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x96, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x97, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x98, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x99, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x9A, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x9B, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x9C, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x9D, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x9E, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x9F, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xA0, 0, DF_DISASM, MOV,           Ot::FixedRegister8(Register8::AL),   Ot::Offset8),
    inst!( 0xA1, 0, DF_DISASM, MOV,           Ot::FixedRegister16(Register16::AX), Ot::Offset16),
    inst!( 0xA2, 0, DF_DISASM, MOV,           Ot::Offset8,                         Ot::FixedRegister8(Register8::AL)),
    inst!( 0xA3, 0, DF_DISASM, MOV,           Ot::Offset16,                        Ot::FixedRegister16(Register16::AX)),
    inst!( 0xA4, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xA5, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xA6, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xA7, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xA8, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xA9, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xAA, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xAB, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xAC, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xAD, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xAE, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xAF, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xB0, 0, DF_NONE,   MOV,           Ot::FixedRegister8(Register8::AL),   Ot::Immediate8),
    inst!( 0xB1, 0, DF_NONE,   MOV,           Ot::FixedRegister8(Register8::CL),   Ot::Immediate8),
    inst!( 0xB2, 0, DF_NONE,   MOV,           Ot::FixedRegister8(Register8::DL),   Ot::Immediate8),
    inst!( 0xB3, 0, DF_NONE,   MOV,           Ot::FixedRegister8(Register8::BL),   Ot::Immediate8),
    inst!( 0xB4, 0, DF_NONE,   MOV,           Ot::FixedRegister8(Register8::AH),   Ot::Immediate8),
    inst!( 0xB5, 0, DF_NONE,   MOV,           Ot::FixedRegister8(Register8::CH),   Ot::Immediate8),
    inst!( 0xB6, 0, DF_NONE,   MOV,           Ot::FixedRegister8(Register8::DH),   Ot::Immediate8),
    inst!( 0xB7, 0, DF_NONE,   MOV,           Ot::FixedRegister8(Register8::BH),   Ot::Immediate8),
    inst!( 0xB8, 0, DF_NONE,   MOV,           Ot::FixedRegister16(Register16::AX), Ot::Immediate16),
    inst!( 0xB9, 0, DF_NONE,   MOV,           Ot::FixedRegister16(Register16::CX), Ot::Immediate16),
    inst!( 0xBA, 0, DF_NONE,   MOV,           Ot::FixedRegister16(Register16::DX), Ot::Immediate16),
    inst!( 0xBB, 0, DF_NONE,   MOV,           Ot::FixedRegister16(Register16::BX), Ot::Immediate16),
    inst!( 0xBC, 0, DF_NONE,   MOV,           Ot::FixedRegister16(Register16::SP), Ot::Immediate16),
    inst!( 0xBD, 0, DF_NONE,   MOV,           Ot::FixedRegister16(Register16::BP), Ot::Immediate16),
    inst!( 0xBE, 0, DF_NONE,   MOV,           Ot::FixedRegister16(Register16::SI), Ot::Immediate16),
    inst!( 0xBF, 0, DF_NONE,   MOV,           Ot::FixedRegister16(Register16::DI), Ot::Immediate16),
    inst!( 0xC0, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xC1, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xC2, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xC3, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xC4, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xC5, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xC6, 0, DF_MODRM,  MOV,           Ot::ModRM8,                          Ot::Immediate8),
    inst!( 0xC7, 0, DF_MODRM,  MOV,           Ot::ModRM16,                         Ot::Immediate16),
    inst!( 0xC8, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xC9, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xCA, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xCB, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xCC, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xCD, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xCE, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xCF, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD0, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD1, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD2, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD3, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD4, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD5, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD6, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD7, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD8, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xD9, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xDA, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xDB, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xDC, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xDD, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xDE, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xDF, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xE0, 0, DF_DISASM, LOOPNE,        Ot::Relative8,                       Ot::NoOperand),
    inst!( 0xE1, 0, DF_DISASM, LOOPE,         Ot::Relative8,                       Ot::NoOperand),
    inst!( 0xE2, 0, DF_DISASM, LOOP,          Ot::Relative8,                       Ot::NoOperand),
    inst!( 0xE3, 0, DF_DISASM, JCXZ,          Ot::Relative8,                       Ot::NoOperand),
    inst!( 0xE4, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xE5, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xE6, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xE7, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xE8, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xE9, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xEA, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xEB, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xEC, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xED, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xEE, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xEF, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF0, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF1, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF2, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF3, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF4, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF5, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF6, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF7, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF8, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xF9, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xFA, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xFB, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xFC, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xFD, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xFE, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0xFF, 0, DF_NONE,   InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    // Group 0x80: operation encoded in the modrm 'reg' field (0=add, 5=sub, 7=cmp)
    inst!( 0x80, 1, DF_MODRM,  ADD,           Ot::ModRM8,                          Ot::Immediate8),
    inst!( 0x80, 1, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x80, 1, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x80, 1, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x80, 1, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x80, 1, DF_MODRM,  SUB,           Ot::ModRM8,                          Ot::Immediate8),
    inst!( 0x80, 1, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x80, 1, DF_MODRM,  CMP,           Ot::ModRM8,                          Ot::Immediate8),
    // Group 0x81
    inst!( 0x81, 2, DF_MODRM,  ADD,           Ot::ModRM16,                         Ot::Immediate16),
    inst!( 0x81, 2, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x81, 2, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x81, 2, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x81, 2, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x81, 2, DF_MODRM,  SUB,           Ot::ModRM16,                         Ot::Immediate16),
    inst!( 0x81, 2, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x81, 2, DF_MODRM,  CMP,           Ot::ModRM16,                         Ot::Immediate16),
    // Group 0x82 (byte-form alias of 0x80)
    inst!( 0x82, 3, DF_MODRM,  ADD,           Ot::ModRM8,                          Ot::Immediate8),
    inst!( 0x82, 3, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x82, 3, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x82, 3, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x82, 3, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x82, 3, DF_MODRM,  SUB,           Ot::ModRM8,                          Ot::Immediate8),
    inst!( 0x82, 3, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x82, 3, DF_MODRM,  CMP,           Ot::ModRM8,                          Ot::Immediate8),
    // Group 0x83: word destination, byte immediate sign-extended to 16 bits
    inst!( 0x83, 4, DF_MODRM,  ADD,           Ot::ModRM16,                         Ot::Immediate8SignExtended),
    inst!( 0x83, 4, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x83, 4, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x83, 4, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x83, 4, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x83, 4, DF_MODRM,  SUB,           Ot::ModRM16,                         Ot::Immediate8SignExtended),
    inst!( 0x83, 4, DF_MODRM,  InvalidOpcode, Ot::NoOperand,                       Ot::NoOperand),
    inst!( 0x83, 4, DF_MODRM,  CMP,           Ot::ModRM16,                         Ot::Immediate8SignExtended),
];

impl Intel808x {
    /// Decode a single instruction from the byte queue, which is positioned
    /// at the instruction's first byte. The returned Instruction's size
    /// always matches the exact number of bytes consumed: opcode, mode byte,
    /// displacement and immediate.
    pub fn decode(bytes: &mut impl ByteQueue) -> Result<Instruction, CpuError> {
        let instruction_address = bytes.tell();
        let opcode = bytes.q_read_u8();
        let mut size: u32 = 1;

        let mut decode_idx = opcode as usize;
        let mut op_lu = &DECODE[decode_idx];

        let mut modrm = ModRmByte::default_ref();
        let mut displacement = Displacement::NoDisp;
        let mut loaded_modrm = false;

        // Check if the resolved opcode is a group instruction. All group
        // instructions have a modrm; load it now and perform a secondary
        // lookup of opcode group + extension.
        if op_lu.grp != 0 {
            let modrm_len;
            (modrm, displacement, modrm_len) = ModRmByte::read(bytes);
            size += modrm_len;
            loaded_modrm = true;

            decode_idx = 256 + ((op_lu.grp as usize - 1) * 8) + modrm.op_extension() as usize;
            op_lu = &DECODE[decode_idx];
        }

        if matches!(op_lu.mnemonic, Mnemonic::InvalidOpcode) {
            return Err(CpuError::UnknownOpcode(opcode, instruction_address as u32));
        }

        // Load the modrm byte if required, and we didn't already load it to
        // decode a group.
        if (op_lu.flags & DF_MODRM != 0) && !loaded_modrm {
            let modrm_len;
            (modrm, displacement, modrm_len) = ModRmByte::read(bytes);
            size += modrm_len;
        }

        // Resolve operand templates into OperandTypes
        let operand1_type = op_lu.operand1.resolve_operand(bytes, modrm, displacement, &mut size);
        let operand2_type = op_lu.operand2.resolve_operand(bytes, modrm, displacement, &mut size);

        Ok(Instruction {
            decode_idx,
            opcode,
            address: instruction_address,
            size,
            width: op_lu.width(),
            mnemonic: op_lu.mnemonic,
            operand1_type,
            operand2_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bytequeue::MemoryQueue, memory::Memory};

    fn decode_bytes(bytes: &[u8]) -> Result<Instruction, CpuError> {
        let mut mem = Memory::new();
        mem.load_program(bytes).unwrap();
        let mut q = MemoryQueue::new(&mem, 0);
        Intel808x::decode(&mut q)
    }

    #[test]
    fn test_decode_register_immediate_move() {
        let i = decode_bytes(&[0xB8, 0x05, 0x00]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::MOV);
        assert_eq!(i.size, 3);
        assert_eq!(i.operand1_type, OperandType::Register16(Register16::AX));
        assert_eq!(i.operand2_type, OperandType::Immediate16(5));
        assert_eq!(i.width, InstructionWidth::Word);

        let i = decode_bytes(&[0xB1, 0x0C]).unwrap();
        assert_eq!(i.size, 2);
        assert_eq!(i.operand1_type, OperandType::Register8(Register8::CL));
        assert_eq!(i.operand2_type, OperandType::Immediate8(12));
        assert_eq!(i.width, InstructionWidth::Byte);
    }

    #[test]
    fn test_decode_register_to_register_move() {
        // mov ax, bx (dest in rm field, source in reg field)
        let i = decode_bytes(&[0x89, 0xD8]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::MOV);
        assert_eq!(i.size, 2);
        assert_eq!(i.operand1_type, OperandType::Register16(Register16::AX));
        assert_eq!(i.operand2_type, OperandType::Register16(Register16::BX));

        // d bit flips operand order: 0x8A names the destination in reg
        let i = decode_bytes(&[0x8A, 0xD8]).unwrap();
        assert_eq!(i.operand1_type, OperandType::Register8(Register8::BL));
        assert_eq!(i.operand2_type, OperandType::Register8(Register8::AL));
    }

    #[test]
    fn test_decode_memory_operand_sizes() {
        // mov [bx + si], ax: no displacement
        let i = decode_bytes(&[0x89, 0x00]).unwrap();
        assert_eq!(i.size, 2);
        assert!(i.operand1_type.is_address());

        // mov [bx + si + 4], ax: 1-byte displacement
        let i = decode_bytes(&[0x89, 0x40, 0x04]).unwrap();
        assert_eq!(i.size, 3);

        // mov [bx + si + 1000], ax: 2-byte displacement
        let i = decode_bytes(&[0x89, 0x80, 0xE8, 0x03]).unwrap();
        assert_eq!(i.size, 4);

        // mov [1000], ax: direct address
        let i = decode_bytes(&[0x89, 0x06, 0xE8, 0x03]).unwrap();
        assert_eq!(i.size, 4);
        assert_eq!(
            i.operand1_type,
            OperandType::AddressingMode(
                crate::cpu_808x::AddressingMode::Disp16(Displacement::Disp16(1000)),
                OperandSize::Operand16
            )
        );
    }

    #[test]
    fn test_decode_arithmetic_group() {
        // sub cx, 5 via the sign-extended immediate form
        let i = decode_bytes(&[0x83, 0xE9, 0x05]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::SUB);
        assert_eq!(i.size, 3);
        assert_eq!(i.operand1_type, OperandType::Register16(Register16::CX));
        assert_eq!(i.operand2_type, OperandType::Immediate8s(5));

        // add word [1000], 100
        let i = decode_bytes(&[0x81, 0x06, 0xE8, 0x03, 0x64, 0x00]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::ADD);
        assert_eq!(i.size, 6);

        // cmp byte [bx], 9
        let i = decode_bytes(&[0x80, 0x3F, 0x09]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::CMP);
        assert_eq!(i.size, 3);
    }

    #[test]
    fn test_decode_group_rejects_unsupported_extension() {
        // 0x80 with reg extension 2 would be adc, outside the subset
        assert_eq!(
            decode_bytes(&[0x80, 0xD1, 0x01]),
            Err(CpuError::UnknownOpcode(0x80, 0))
        );
    }

    #[test]
    fn test_decode_unknown_opcode() {
        assert_eq!(decode_bytes(&[0xF4]), Err(CpuError::UnknownOpcode(0xF4, 0)));
        assert_eq!(decode_bytes(&[0x90]), Err(CpuError::UnknownOpcode(0x90, 0)));
    }

    #[test]
    fn test_decode_conditional_jumps_and_loops() {
        let i = decode_bytes(&[0x74, 0xFB]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::JZ);
        assert_eq!(i.size, 2);
        assert_eq!(i.operand1_type, OperandType::Relative8(-5));

        let i = decode_bytes(&[0x75, 0x10]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::JNZ);
        assert_eq!(DECODE[i.decode_idx].flags & DF_DISASM, 0);

        let i = decode_bytes(&[0xE2, 0xF4]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::LOOP);
        assert_eq!(i.operand1_type, OperandType::Relative8(-12));
        assert_ne!(DECODE[i.decode_idx].flags & DF_DISASM, 0);
    }

    #[test]
    fn test_decode_direct_accumulator_moves() {
        let i = decode_bytes(&[0xA1, 0xE8, 0x03]).unwrap();
        assert_eq!(i.mnemonic, Mnemonic::MOV);
        assert_eq!(i.size, 3);
        assert_eq!(i.operand1_type, OperandType::Register16(Register16::AX));
        assert_eq!(i.operand2_type, OperandType::Offset16(1000));
        assert_eq!(i.to_string(), "mov ax, [1000]");

        let i = decode_bytes(&[0xA3, 0xE8, 0x03]).unwrap();
        assert_eq!(i.operand1_type, OperandType::Offset16(1000));
        assert_eq!(i.to_string(), "mov [1000], ax");
    }

    #[test]
    fn test_decode_table_dimensions() {
        assert_eq!(DECODE.len(), 288);
    }
}
