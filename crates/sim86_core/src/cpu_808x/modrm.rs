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

    cpu_808x::modrm.rs

    Module for handling ModRM bytes in x86 instructions.
    [ModRmByte] is designed to be `'static`; reading a ModRM byte resolves to
    a static reference in a const table of [ModRmByte], plus a displacement
    which can later be passed to `ModRmByte::addressing_mode()` for
    resolution. The effective-address cycle surcharge tables live here so the
    resolver can be audited against the hardware timing table line by line.

*/

use crate::{
    bytequeue::ByteQueue,
    cpu_808x::{
        addressing::{AddressingMode, Displacement},
        Register16,
        Register8,
        REGISTER16_LUT,
        REGISTER8_LUT,
    },
};

pub const MODRM_REG_MASK: u8 = 0b00_111_000;
pub const MODRM_ADDR_MASK: u8 = 0b11_000_111;

const MODRM_ADDR_BX_SI: u8 = 0b00_000_000;
const MODRM_ADDR_BX_DI: u8 = 0b00_000_001;
const MODRM_ADDR_BP_SI: u8 = 0b00_000_010;
const MODRM_ADDR_BP_DI: u8 = 0b00_000_011;
const MODRM_ADDR_SI: u8 = 0b00_000_100;
const MODRM_ADDR_DI: u8 = 0b00_000_101;
const MODRM_ADDR_DISP16: u8 = 0b00_000_110;
const MODRM_ADDR_BX: u8 = 0b00_000_111;

const MODRM_ADDR_BX_SI_DISP8: u8 = 0b01_000_000;
const MODRM_ADDR_BX_DI_DISP8: u8 = 0b01_000_001;
const MODRM_ADDR_BP_SI_DISP8: u8 = 0b01_000_010;
const MODRM_ADDR_BP_DI_DISP8: u8 = 0b01_000_011;
const MODRM_ADDR_SI_DISP8: u8 = 0b01_000_100;
const MODRM_ADDR_DI_DISP8: u8 = 0b01_000_101;
const MODRM_ADDR_BP_DISP8: u8 = 0b01_000_110;
const MODRM_ADDR_BX_DISP8: u8 = 0b01_000_111;

const MODRM_ADDR_BX_SI_DISP16: u8 = 0b10_000_000;
const MODRM_ADDR_BX_DI_DISP16: u8 = 0b10_000_001;
const MODRM_ADDR_BP_SI_DISP16: u8 = 0b10_000_010;
const MODRM_ADDR_BP_DI_DISP16: u8 = 0b10_000_011;
const MODRM_ADDR_SI_DISP16: u8 = 0b10_000_100;
const MODRM_ADDR_DI_DISP16: u8 = 0b10_000_101;
const MODRM_ADDR_BP_DISP16: u8 = 0b10_000_110;
const MODRM_ADDR_BX_DISP16: u8 = 0b10_000_111;

// Effective address cycle surcharges from the 8086 timing table, indexed by
// the 3-bit R/M field. Base+index pairs cost more than a single base or
// index register; bp+di and bx+si are a cycle cheaper than bp+si and bx+di.
pub const EA_CYCLES_BASE: [u32; 8] = [7, 8, 8, 7, 5, 5, 5, 5];
pub const EA_CYCLES_DISP: [u32; 8] = [11, 12, 12, 11, 9, 9, 9, 9];
pub const EA_CYCLES_DIRECT: u32 = 6;

#[derive(Copy, Clone)]
pub struct ModRmByte {
    _byte: u8,
    b_mod: u8,
    b_reg: u8,
    b_rm: u8,
    disp: Displacement,
    addressing_mode: AddressingMode,
}

const MODRM_TABLE: [ModRmByte; 256] = {
    let mut table: [ModRmByte; 256] = [ModRmByte {
        _byte: 0,
        b_mod: 0,
        b_reg: 0,
        b_rm: 0,
        disp: Displacement::NoDisp,
        addressing_mode: AddressingMode::BxSi,
    }; 256];
    let mut byte = 0;

    loop {
        let b_mod = (byte >> 6) & 0x03;

        // Displacement to load after the mode byte. 0b01 signifies an 8 bit
        // displacement (sign-extended to 16), 0b10 a 16 bit displacement.
        // The [disp16] direct mode is a single encoding within 0b00.
        let displacement = match b_mod {
            0b00 => {
                if byte & MODRM_ADDR_MASK == MODRM_ADDR_DISP16 {
                    Displacement::Pending16
                }
                else {
                    Displacement::NoDisp
                }
            }
            0b01 => Displacement::Pending8,
            0b10 => Displacement::Pending16,
            _ => Displacement::NoDisp,
        };

        // Set the addressing mode based on the combination of Mod and R/M bitfields.
        let addressing_mode = match byte & MODRM_ADDR_MASK {
            MODRM_ADDR_BX_SI => AddressingMode::BxSi,
            MODRM_ADDR_BX_DI => AddressingMode::BxDi,
            MODRM_ADDR_BP_SI => AddressingMode::BpSi,
            MODRM_ADDR_BP_DI => AddressingMode::BpDi,
            MODRM_ADDR_SI => AddressingMode::Si,
            MODRM_ADDR_DI => AddressingMode::Di,
            MODRM_ADDR_DISP16 => AddressingMode::Disp16(displacement),
            MODRM_ADDR_BX => AddressingMode::Bx,
            MODRM_ADDR_BX_SI_DISP8 => AddressingMode::BxSiDisp8(displacement),
            MODRM_ADDR_BX_DI_DISP8 => AddressingMode::BxDiDisp8(displacement),
            MODRM_ADDR_BP_SI_DISP8 => AddressingMode::BpSiDisp8(displacement),
            MODRM_ADDR_BP_DI_DISP8 => AddressingMode::BpDiDisp8(displacement),
            MODRM_ADDR_SI_DISP8 => AddressingMode::SiDisp8(displacement),
            MODRM_ADDR_DI_DISP8 => AddressingMode::DiDisp8(displacement),
            MODRM_ADDR_BP_DISP8 => AddressingMode::BpDisp8(displacement),
            MODRM_ADDR_BX_DISP8 => AddressingMode::BxDisp8(displacement),
            MODRM_ADDR_BX_SI_DISP16 => AddressingMode::BxSiDisp16(displacement),
            MODRM_ADDR_BX_DI_DISP16 => AddressingMode::BxDiDisp16(displacement),
            MODRM_ADDR_BP_SI_DISP16 => AddressingMode::BpSiDisp16(displacement),
            MODRM_ADDR_BP_DI_DISP16 => AddressingMode::BpDiDisp16(displacement),
            MODRM_ADDR_SI_DISP16 => AddressingMode::SiDisp16(displacement),
            MODRM_ADDR_DI_DISP16 => AddressingMode::DiDisp16(displacement),
            MODRM_ADDR_BP_DISP16 => AddressingMode::BpDisp16(displacement),
            MODRM_ADDR_BX_DISP16 => AddressingMode::BxDisp16(displacement),
            _ => AddressingMode::RegisterMode,
        };

        // 'REG' field specifies either a register operand or an opcode
        // extension. There's no way to know without the opcode itself.
        let b_reg: u8 = (byte >> 3) & 0x07;

        // 'R/M' field is the last three bits.
        let b_rm: u8 = byte & 0x07;

        table[byte as usize] = ModRmByte {
            _byte: byte,
            b_mod,
            b_reg,
            b_rm,
            disp: displacement,
            addressing_mode,
        };

        if byte < 255 {
            byte += 1;
        }
        else {
            break;
        }
    }

    table
};

impl ModRmByte {
    pub fn default_ref() -> &'static ModRmByte {
        &MODRM_TABLE[0]
    }

    /// Read the modrm byte and look up the appropriate value from the modrm
    /// table. Load any displacement, then return the modrm struct, the
    /// resolved displacement, and the size of modrm + displacement.
    pub fn read(bytes: &mut impl ByteQueue) -> (&'static ModRmByte, Displacement, u32) {
        let byte = bytes.q_read_u8();
        let modrm = &MODRM_TABLE[byte as usize];
        let (disp, disp_size) = modrm.read_displacement(bytes);
        (modrm, disp, disp_size + 1)
    }

    /// Read any displacement the modrm might have. Return the Displacement
    /// and size of displacement.
    fn read_displacement(&self, bytes: &mut impl ByteQueue) -> (Displacement, u32) {
        match self.disp {
            Displacement::Pending8 => {
                let tdisp = bytes.q_read_i8();
                (Displacement::Disp8(tdisp), 1)
            }
            Displacement::Pending16 => {
                let tdisp = bytes.q_read_i16();
                (Displacement::Disp16(tdisp), 2)
            }
            _ => (Displacement::NoDisp, 0),
        }
    }

    // Interpret the 'R/M' field as an 8 bit register selector
    #[inline(always)]
    pub fn op1_reg8(&self) -> Register8 {
        REGISTER8_LUT[self.b_rm as usize]
    }
    // Interpret the 'R/M' field as a 16 bit register selector
    #[inline(always)]
    pub fn op1_reg16(&self) -> Register16 {
        REGISTER16_LUT[self.b_rm as usize]
    }
    // Interpret the 'REG' field as an 8 bit register selector
    #[inline(always)]
    pub fn op2_reg8(&self) -> Register8 {
        REGISTER8_LUT[self.b_reg as usize]
    }
    // Interpret the 'REG' field as a 16 bit register selector
    #[inline(always)]
    pub fn op2_reg16(&self) -> Register16 {
        REGISTER16_LUT[self.b_reg as usize]
    }
    // Interpret the 'REG' field as a 3 bit opcode extension
    #[inline(always)]
    pub fn op_extension(&self) -> u8 {
        self.b_reg
    }
    // Return whether the modrm byte specifies a memory addressing mode
    #[inline(always)]
    pub fn is_addressing_mode(&self) -> bool {
        self.b_mod != 0b11
    }
    #[inline(always)]
    pub fn b_mod(&self) -> u8 {
        self.b_mod
    }
    #[inline(always)]
    pub fn b_reg(&self) -> u8 {
        self.b_reg
    }
    #[inline(always)]
    pub fn b_rm(&self) -> u8 {
        self.b_rm
    }

    /// Produce an [AddressingMode] enum with the provided [Displacement] inserted.
    #[inline(always)]
    pub fn addressing_mode(&self, displacement: Displacement) -> AddressingMode {
        match self.addressing_mode {
            AddressingMode::Disp16(_) => AddressingMode::Disp16(displacement),
            AddressingMode::BxSiDisp8(_) => AddressingMode::BxSiDisp8(displacement),
            AddressingMode::BxDiDisp8(_) => AddressingMode::BxDiDisp8(displacement),
            AddressingMode::BpSiDisp8(_) => AddressingMode::BpSiDisp8(displacement),
            AddressingMode::BpDiDisp8(_) => AddressingMode::BpDiDisp8(displacement),
            AddressingMode::SiDisp8(_) => AddressingMode::SiDisp8(displacement),
            AddressingMode::DiDisp8(_) => AddressingMode::DiDisp8(displacement),
            AddressingMode::BpDisp8(_) => AddressingMode::BpDisp8(displacement),
            AddressingMode::BxDisp8(_) => AddressingMode::BxDisp8(displacement),
            AddressingMode::BxSiDisp16(_) => AddressingMode::BxSiDisp16(displacement),
            AddressingMode::BxDiDisp16(_) => AddressingMode::BxDiDisp16(displacement),
            AddressingMode::BpSiDisp16(_) => AddressingMode::BpSiDisp16(displacement),
            AddressingMode::BpDiDisp16(_) => AddressingMode::BpDiDisp16(displacement),
            AddressingMode::SiDisp16(_) => AddressingMode::SiDisp16(displacement),
            AddressingMode::DiDisp16(_) => AddressingMode::DiDisp16(displacement),
            AddressingMode::BpDisp16(_) => AddressingMode::BpDisp16(displacement),
            AddressingMode::BxDisp16(_) => AddressingMode::BxDisp16(displacement),
            _ => self.addressing_mode,
        }
    }
}

/// Return the effective-address cycle surcharge for a resolved addressing
/// mode, per the 8086 timing table. A zero 8-bit displacement from a bp base
/// (the encoding assemblers emit for a plain `[bp]` reference, since mod=00
/// rm=110 means a direct address instead) is charged as the plain
/// base-register case, not as base + displacement.
pub fn effective_address_cycles(mode: AddressingMode) -> u32 {
    use AddressingMode::*;
    match mode {
        RegisterMode => 0,
        BxSi => EA_CYCLES_BASE[0],
        BxDi => EA_CYCLES_BASE[1],
        BpSi => EA_CYCLES_BASE[2],
        BpDi => EA_CYCLES_BASE[3],
        Si => EA_CYCLES_BASE[4],
        Di => EA_CYCLES_BASE[5],
        Bx => EA_CYCLES_BASE[7],
        Disp16(_) => EA_CYCLES_DIRECT,
        BxSiDisp8(_) | BxSiDisp16(_) => EA_CYCLES_DISP[0],
        BxDiDisp8(_) | BxDiDisp16(_) => EA_CYCLES_DISP[1],
        BpSiDisp8(_) | BpSiDisp16(_) => EA_CYCLES_DISP[2],
        BpDiDisp8(_) | BpDiDisp16(_) => EA_CYCLES_DISP[3],
        SiDisp8(_) | SiDisp16(_) => EA_CYCLES_DISP[4],
        DiDisp8(_) | DiDisp16(_) => EA_CYCLES_DISP[5],
        BpDisp8(Displacement::Disp8(0)) => EA_CYCLES_BASE[6],
        BpDisp8(_) | BpDisp16(_) => EA_CYCLES_DISP[6],
        BxDisp8(_) | BxDisp16(_) => EA_CYCLES_DISP[7],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;

    #[test]
    fn test_modrm_field_round_trip() {
        // Reassembling the decoded fields must reproduce the original byte
        // for every mod/reg/rm combination.
        for byte in 0..=255u8 {
            let modrm = &MODRM_TABLE[byte as usize];
            let reassembled = (modrm.b_mod() << 6) | (modrm.b_reg() << 3) | modrm.b_rm();
            assert_eq!(reassembled, byte);
        }
    }

    #[test]
    fn test_register_mode_has_no_displacement() {
        for byte in 0xC0..=0xFFu8 {
            let modrm = &MODRM_TABLE[byte as usize];
            assert!(!modrm.is_addressing_mode());
            assert_eq!(modrm.disp, Displacement::NoDisp);
        }
    }

    #[test]
    fn test_displacement_loading() {
        let mut mem = Memory::new();
        // mod=01 rm=000 (bx+si+disp8), disp8 of -2
        mem.load_program(&[0b01_000_000, 0xFE]).unwrap();
        let mut q = crate::bytequeue::MemoryQueue::new(&mem, 0);
        let (modrm, disp, size) = ModRmByte::read(&mut q);
        assert_eq!(size, 2);
        assert_eq!(disp, Displacement::Disp8(-2));
        assert_eq!(
            modrm.addressing_mode(disp),
            AddressingMode::BxSiDisp8(Displacement::Disp8(-2))
        );

        // mod=00 rm=110 is a direct address, not bp+0
        let mut mem = Memory::new();
        mem.load_program(&[0b00_000_110, 0x00, 0x10]).unwrap();
        let mut q = crate::bytequeue::MemoryQueue::new(&mem, 0);
        let (modrm, disp, size) = ModRmByte::read(&mut q);
        assert_eq!(size, 3);
        assert_eq!(disp, Displacement::Disp16(0x1000));
        assert_eq!(
            modrm.addressing_mode(disp),
            AddressingMode::Disp16(Displacement::Disp16(0x1000))
        );
    }

    #[test]
    fn test_effective_address_cycles() {
        assert_eq!(effective_address_cycles(AddressingMode::BxSi), 7);
        assert_eq!(effective_address_cycles(AddressingMode::BxDi), 8);
        assert_eq!(effective_address_cycles(AddressingMode::Si), 5);
        assert_eq!(
            effective_address_cycles(AddressingMode::Disp16(Displacement::Disp16(0x1000))),
            6
        );
        assert_eq!(
            effective_address_cycles(AddressingMode::BxSiDisp8(Displacement::Disp8(4))),
            11
        );
        assert_eq!(
            effective_address_cycles(AddressingMode::BpSiDisp16(Displacement::Disp16(4))),
            12
        );
        assert_eq!(
            effective_address_cycles(AddressingMode::BpDisp8(Displacement::Disp8(4))),
            9
        );
        // [bp + 0] is charged as a plain base register reference.
        assert_eq!(
            effective_address_cycles(AddressingMode::BpDisp8(Displacement::Disp8(0))),
            5
        );
        // The special case does not extend to a zero 16-bit displacement.
        assert_eq!(
            effective_address_cycles(AddressingMode::BpDisp16(Displacement::Disp16(0))),
            9
        );
    }
}
