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

    cpu_808x::addressing.rs

    Implements addressing mode resolution and operand loading routines.
    Effective addresses are flat 16-bit offsets; signed displacements rely on
    two's complement wrapping arithmetic.

*/

use std::{fmt, fmt::Display};

use crate::{
    cpu_808x::{operands::OperandType, Intel808x},
    error::CpuError,
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Displacement {
    NoDisp,
    Pending8,
    Pending16,
    Disp8(i8),
    Disp16(i16),
}

impl Displacement {
    pub fn get_i16(&self) -> i16 {
        match self {
            Displacement::Disp8(disp) => *disp as i16,
            Displacement::Disp16(disp) => *disp,
            _ => 0,
        }
    }
    pub fn get_u16(&self) -> u16 {
        self.get_i16() as u16
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AddressingMode {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Disp16(Displacement),
    Bx,
    BxSiDisp8(Displacement),
    BxDiDisp8(Displacement),
    BpSiDisp8(Displacement),
    BpDiDisp8(Displacement),
    SiDisp8(Displacement),
    DiDisp8(Displacement),
    BpDisp8(Displacement),
    BxDisp8(Displacement),
    BxSiDisp16(Displacement),
    BxDiDisp16(Displacement),
    BpSiDisp16(Displacement),
    BpDiDisp16(Displacement),
    SiDisp16(Displacement),
    DiDisp16(Displacement),
    BpDisp16(Displacement),
    BxDisp16(Displacement),
    RegisterMode,
}

pub(crate) struct WithPlusSign<T>(pub T);

impl Display for WithPlusSign<Displacement> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disp = self.0.get_i16();
        if disp < 0 {
            write!(f, " - {}", -(disp as i32))
        }
        else {
            write!(f, " + {}", disp)
        }
    }
}

impl Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AddressingMode::*;
        match self {
            BxSi => write!(f, "[bx + si]"),
            BxDi => write!(f, "[bx + di]"),
            BpSi => write!(f, "[bp + si]"),
            BpDi => write!(f, "[bp + di]"),
            Si => write!(f, "[si]"),
            Di => write!(f, "[di]"),
            Disp16(d) => write!(f, "[{}]", d.get_u16()),
            Bx => write!(f, "[bx]"),
            BxSiDisp8(d) | BxSiDisp16(d) => write!(f, "[bx + si{}]", WithPlusSign(*d)),
            BxDiDisp8(d) | BxDiDisp16(d) => write!(f, "[bx + di{}]", WithPlusSign(*d)),
            BpSiDisp8(d) | BpSiDisp16(d) => write!(f, "[bp + si{}]", WithPlusSign(*d)),
            BpDiDisp8(d) | BpDiDisp16(d) => write!(f, "[bp + di{}]", WithPlusSign(*d)),
            SiDisp8(d) | SiDisp16(d) => write!(f, "[si{}]", WithPlusSign(*d)),
            DiDisp8(d) | DiDisp16(d) => write!(f, "[di{}]", WithPlusSign(*d)),
            BpDisp8(d) | BpDisp16(d) => write!(f, "[bp{}]", WithPlusSign(*d)),
            BxDisp8(d) | BxDisp16(d) => write!(f, "[bx{}]", WithPlusSign(*d)),
            RegisterMode => write!(f, "[invalid]"),
        }
    }
}

#[rustfmt::skip]
impl Intel808x {
    /// Calculate the effective address for the given AddressingMode enum.
    /// The address space is flat, so the result is simply the base/index sum
    /// plus any displacement, wrapping at 16 bits.
    pub fn calc_effective_address(&self, mode: AddressingMode) -> u16 {
        use AddressingMode::*;
        match mode {
            BxSi                              => self.b.x().wrapping_add(self.si),
            BxDi                              => self.b.x().wrapping_add(self.di),
            BpSi                              => self.bp.wrapping_add(self.si),
            BpDi                              => self.bp.wrapping_add(self.di),
            Si                                => self.si,
            Di                                => self.di,
            Disp16(disp)                      => disp.get_u16(),
            Bx                                => self.b.x(),
            BxSiDisp8(d) | BxSiDisp16(d)      => self.b.x().wrapping_add(self.si.wrapping_add(d.get_u16())),
            BxDiDisp8(d) | BxDiDisp16(d)      => self.b.x().wrapping_add(self.di.wrapping_add(d.get_u16())),
            BpSiDisp8(d) | BpSiDisp16(d)      => self.bp.wrapping_add(self.si.wrapping_add(d.get_u16())),
            BpDiDisp8(d) | BpDiDisp16(d)      => self.bp.wrapping_add(self.di.wrapping_add(d.get_u16())),
            SiDisp8(d)   | SiDisp16(d)        => self.si.wrapping_add(d.get_u16()),
            DiDisp8(d)   | DiDisp16(d)        => self.di.wrapping_add(d.get_u16()),
            BpDisp8(d)   | BpDisp16(d)        => self.bp.wrapping_add(d.get_u16()),
            BxDisp8(d)   | BxDisp16(d)        => self.b.x().wrapping_add(d.get_u16()),

            // The instruction decoder converts modrm operands that specify
            // registers to Register type operands, so this shouldn't happen.
            RegisterMode => panic!("Can't calculate EA for register operand"),
        }
    }
}

impl Intel808x {
    /// Return the value of an 8-bit operand.
    pub fn read_operand8(&self, operand: OperandType) -> Result<u8, CpuError> {
        match operand {
            OperandType::Immediate8(imm8) => Ok(imm8),
            OperandType::Register8(reg8) => Ok(self.get_register8(reg8)),
            OperandType::AddressingMode(mode, _) => {
                let offset = self.calc_effective_address(mode);
                self.memory.read_u8(offset as u32)
            }
            _ => panic!("read_operand8(): Invalid OperandType: {:?}", operand),
        }
    }

    /// Return the value of a 16-bit operand. 8-bit signed immediates are
    /// sign-extended.
    pub fn read_operand16(&self, operand: OperandType) -> Result<u16, CpuError> {
        match operand {
            OperandType::Immediate16(imm16) => Ok(imm16),
            OperandType::Immediate8s(imm8s) => Ok(imm8s as i16 as u16),
            OperandType::Register16(reg16) => Ok(self.get_register16(reg16)),
            OperandType::AddressingMode(mode, _) => {
                let offset = self.calc_effective_address(mode);
                self.memory.read_u16(offset as u32)
            }
            _ => panic!("read_operand16(): Invalid OperandType: {:?}", operand),
        }
    }

    /// Write a value to an 8-bit operand destination.
    pub fn write_operand8(&mut self, operand: OperandType, value: u8) -> Result<(), CpuError> {
        match operand {
            OperandType::Register8(reg8) => {
                self.set_register8(reg8, value);
                Ok(())
            }
            OperandType::AddressingMode(mode, _) => {
                let offset = self.calc_effective_address(mode);
                self.memory.write_u8(offset as u32, value)
            }
            _ => panic!("write_operand8(): Invalid OperandType: {:?}", operand),
        }
    }

    /// Write a value to a 16-bit operand destination.
    pub fn write_operand16(&mut self, operand: OperandType, value: u16) -> Result<(), CpuError> {
        match operand {
            OperandType::Register16(reg16) => {
                self.set_register16(reg16, value);
                Ok(())
            }
            OperandType::AddressingMode(mode, _) => {
                let offset = self.calc_effective_address(mode);
                self.memory.write_u16(offset as u32, value)
            }
            _ => panic!("write_operand16(): Invalid OperandType: {:?}", operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_808x::Register16;

    #[test]
    fn test_base_index_sums() {
        let mut cpu = Intel808x::new();
        cpu.set_register16(Register16::BX, 0x1000);
        cpu.set_register16(Register16::SI, 0x0234);
        cpu.set_register16(Register16::BP, 0x2000);
        cpu.set_register16(Register16::DI, 0x0008);

        assert_eq!(cpu.calc_effective_address(AddressingMode::BxSi), 0x1234);
        assert_eq!(cpu.calc_effective_address(AddressingMode::BpDi), 0x2008);
        assert_eq!(cpu.calc_effective_address(AddressingMode::Si), 0x0234);
        assert_eq!(
            cpu.calc_effective_address(AddressingMode::Disp16(Displacement::Disp16(0x1000))),
            0x1000
        );
    }

    #[test]
    fn test_negative_displacement_wraps() {
        let mut cpu = Intel808x::new();
        cpu.set_register16(Register16::BX, 0x0010);
        assert_eq!(
            cpu.calc_effective_address(AddressingMode::BxDisp8(Displacement::Disp8(-0x20))),
            0xFFF0
        );
        assert_eq!(
            cpu.calc_effective_address(AddressingMode::BxDisp16(Displacement::Disp16(-16))),
            0x0000
        );
    }

    #[test]
    fn test_mode_display_is_decimal() {
        assert_eq!(AddressingMode::BxSi.to_string(), "[bx + si]");
        assert_eq!(
            AddressingMode::BpDisp8(Displacement::Disp8(-5)).to_string(),
            "[bp - 5]"
        );
        assert_eq!(
            AddressingMode::BxSiDisp16(Displacement::Disp16(1000)).to_string(),
            "[bx + si + 1000]"
        );
        assert_eq!(
            AddressingMode::Disp16(Displacement::Disp16(1000)).to_string(),
            "[1000]"
        );
    }
}
