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

    cpu_808x::mod.rs

    Implements the simulated CPU state: the general register file with
    high/low byte access, the zero and sign flags, the decode cursor, the
    memory buffer and the cycle counter, along with the step/run loop that
    drives decode and execution.

*/

pub mod addressing;
pub mod cycle;
pub mod decode;
pub mod execute;
pub mod instruction;
pub mod mnemonic;
pub mod modrm;
pub mod operands;

use std::fmt;

pub use addressing::{AddressingMode, Displacement};
pub use instruction::Instruction;
pub use mnemonic::Mnemonic;
pub use operands::{OperandSize, OperandType};

use crate::{
    bytequeue::MemoryQueue,
    error::CpuError,
    memory::Memory,
    tracelogger::TraceLogger,
};

#[repr(C)]
#[derive(Copy, Clone, Default)]
pub struct GeneralRegisterBytes {
    pub l: u8,
    pub h: u8,
}

#[repr(C)]
pub union GeneralRegister {
    b: GeneralRegisterBytes,
    w: u16,
}
impl Default for GeneralRegister {
    fn default() -> Self {
        GeneralRegister { w: 0 }
    }
}

impl GeneralRegister {
    // Safety: It is safe to access fields of a union comprised of unsigned integer types.
    #[inline(always)]
    pub fn x(&self) -> u16 {
        unsafe { self.w }
    }
    #[inline(always)]
    pub fn set_x(&mut self, value: u16) {
        self.w = value;
    }
    #[inline(always)]
    pub fn h(&self) -> u8 {
        unsafe { self.b.h }
    }
    #[inline(always)]
    pub fn set_h(&mut self, value: u8) {
        self.b.h = value;
    }
    #[inline(always)]
    pub fn l(&self) -> u8 {
        unsafe { self.b.l }
    }
    #[inline(always)]
    pub fn set_l(&mut self, value: u8) {
        self.b.l = value;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Register8 {
    AL,
    CL,
    DL,
    BL,
    AH,
    CH,
    DH,
    BH,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Register16 {
    AX,
    CX,
    DX,
    BX,
    SP,
    BP,
    SI,
    DI,
}

// Register order as encoded by the 3-bit reg/rm fields.
pub const REGISTER8_LUT: [Register8; 8] = [
    Register8::AL,
    Register8::CL,
    Register8::DL,
    Register8::BL,
    Register8::AH,
    Register8::CH,
    Register8::DH,
    Register8::BH,
];

pub const REGISTER16_LUT: [Register16; 8] = [
    Register16::AX,
    Register16::CX,
    Register16::DX,
    Register16::BX,
    Register16::SP,
    Register16::BP,
    Register16::SI,
    Register16::DI,
];

impl fmt::Display for Register8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register8::AL => "al",
            Register8::CL => "cl",
            Register8::DL => "dl",
            Register8::BL => "bl",
            Register8::AH => "ah",
            Register8::CH => "ch",
            Register8::DH => "dh",
            Register8::BH => "bh",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Register16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register16::AX => "ax",
            Register16::CX => "cx",
            Register16::DX => "dx",
            Register16::BX => "bx",
            Register16::SP => "sp",
            Register16::BP => "bp",
            Register16::SI => "si",
            Register16::DI => "di",
        };
        write!(f, "{}", name)
    }
}

pub struct Intel808x {
    a: GeneralRegister,
    b: GeneralRegister,
    c: GeneralRegister,
    d: GeneralRegister,
    sp: u16,
    bp: u16,
    si: u16,
    di: u16,
    ip: u16,

    zero: bool,
    sign: bool,

    memory: Memory,
    program_end: usize,
    cycle_total: u64,
    trace_logger: TraceLogger,
}

impl Default for Intel808x {
    fn default() -> Self {
        Intel808x::new()
    }
}

impl Intel808x {
    pub fn new() -> Self {
        Self {
            a: GeneralRegister::default(),
            b: GeneralRegister::default(),
            c: GeneralRegister::default(),
            d: GeneralRegister::default(),
            sp: 0,
            bp: 0,
            si: 0,
            di: 0,
            ip: 0,
            zero: false,
            sign: false,
            memory: Memory::new(),
            program_end: 0,
            cycle_total: 0,
            trace_logger: TraceLogger::None,
        }
    }

    /// Reset registers, flags, cursor and cycle count. Memory contents are
    /// left intact.
    pub fn reset(&mut self) {
        self.a.set_x(0);
        self.b.set_x(0);
        self.c.set_x(0);
        self.d.set_x(0);
        self.sp = 0;
        self.bp = 0;
        self.si = 0;
        self.di = 0;
        self.ip = 0;
        self.zero = false;
        self.sign = false;
        self.cycle_total = 0;
    }

    /// Load a program image into simulated memory at address 0 and point the
    /// decode cursor at it.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), CpuError> {
        self.program_end = self.memory.load_program(image)?;
        self.ip = 0;
        log::debug!("Loaded program image, {} bytes", self.program_end);
        Ok(())
    }

    pub fn set_trace_logger(&mut self, logger: TraceLogger) {
        self.trace_logger = logger;
    }

    pub fn get_register16(&self, reg: Register16) -> u16 {
        match reg {
            Register16::AX => self.a.x(),
            Register16::CX => self.c.x(),
            Register16::DX => self.d.x(),
            Register16::BX => self.b.x(),
            Register16::SP => self.sp,
            Register16::BP => self.bp,
            Register16::SI => self.si,
            Register16::DI => self.di,
        }
    }

    pub fn set_register16(&mut self, reg: Register16, value: u16) {
        match reg {
            Register16::AX => self.a.set_x(value),
            Register16::CX => self.c.set_x(value),
            Register16::DX => self.d.set_x(value),
            Register16::BX => self.b.set_x(value),
            Register16::SP => self.sp = value,
            Register16::BP => self.bp = value,
            Register16::SI => self.si = value,
            Register16::DI => self.di = value,
        }
    }

    pub fn get_register8(&self, reg: Register8) -> u8 {
        match reg {
            Register8::AL => self.a.l(),
            Register8::CL => self.c.l(),
            Register8::DL => self.d.l(),
            Register8::BL => self.b.l(),
            Register8::AH => self.a.h(),
            Register8::CH => self.c.h(),
            Register8::DH => self.d.h(),
            Register8::BH => self.b.h(),
        }
    }

    pub fn set_register8(&mut self, reg: Register8, value: u8) {
        match reg {
            Register8::AL => self.a.set_l(value),
            Register8::CL => self.c.set_l(value),
            Register8::DL => self.d.set_l(value),
            Register8::BL => self.b.set_l(value),
            Register8::AH => self.a.set_h(value),
            Register8::CH => self.c.set_h(value),
            Register8::DH => self.d.set_h(value),
            Register8::BH => self.b.set_h(value),
        }
    }

    #[inline(always)]
    pub fn zero_flag(&self) -> bool {
        self.zero
    }

    #[inline(always)]
    pub fn sign_flag(&self) -> bool {
        self.sign
    }

    /// Recompute the flags from an operation result. The result is always
    /// interpreted as a signed 16-bit value regardless of operand width;
    /// 8-bit results are not separately sign-tested.
    #[inline(always)]
    pub fn set_szf_from_result(&mut self, result: i16) {
        self.zero = result == 0;
        self.sign = result < 0;
    }

    #[inline(always)]
    pub fn ip(&self) -> u16 {
        self.ip
    }

    #[inline(always)]
    pub fn cycle_total(&self) -> u64 {
        self.cycle_total
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn snapshot_window(&self) -> &[u8] {
        self.memory.snapshot_window()
    }

    /// Decode and execute the instruction at the decode cursor, advancing the
    /// cursor by the instruction's encoded length and charging its cycle cost.
    pub fn step(&mut self) -> Result<(), CpuError> {
        let mut bytes = MemoryQueue::new(&self.memory, self.ip);
        let i = Intel808x::decode(&mut bytes)?;

        self.ip = self.ip.wrapping_add(i.size as u16);
        self.execute_instruction(&i)?;
        self.trace_cycle_total();
        Ok(())
    }

    /// Run from the current cursor position to the end of the loaded program
    /// region, or until a fatal error.
    pub fn run(&mut self) -> Result<(), CpuError> {
        while (self.ip as usize) < self.program_end {
            self.step()?;
        }
        self.trace_logger.flush();
        log::debug!("Run complete, {} cycles charged", self.cycle_total);
        Ok(())
    }

    /// Render the final register file and flag state. Register values print
    /// as unsigned 16-bit numbers.
    pub fn state_string(&self) -> String {
        let mut state = String::new();
        for reg in REGISTER16_LUT {
            state.push_str(&format!("{} {}\n", reg, self.get_register16(reg)));
        }
        state.push_str(&format!("zero: {} sign: {}", self.zero, self.sign));
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_halves_are_independent() {
        let mut cpu = Intel808x::new();
        cpu.set_register16(Register16::AX, 0x1234);
        assert_eq!(cpu.get_register8(Register8::AH), 0x12);
        assert_eq!(cpu.get_register8(Register8::AL), 0x34);

        cpu.set_register8(Register8::AH, 0xFF);
        assert_eq!(cpu.get_register16(Register16::AX), 0xFF34);
        cpu.set_register8(Register8::AL, 0x01);
        assert_eq!(cpu.get_register16(Register16::AX), 0xFF01);
    }

    #[test]
    fn test_register_lut_matches_field_encoding() {
        assert_eq!(REGISTER16_LUT[0], Register16::AX);
        assert_eq!(REGISTER16_LUT[3], Register16::BX);
        assert_eq!(REGISTER16_LUT[5], Register16::BP);
        assert_eq!(REGISTER8_LUT[4], Register8::AH);
    }

    #[test]
    fn test_state_string_reports_unsigned_values() {
        let mut cpu = Intel808x::new();
        cpu.set_register16(Register16::CX, 0xFFFF);
        let state = cpu.state_string();
        assert!(state.contains("cx 65535"));
        assert!(state.contains("zero: false sign: false"));
    }
}
