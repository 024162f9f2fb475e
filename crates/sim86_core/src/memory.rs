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

    memory.rs

    Implements the simulated memory buffer. The full 16-bit address space is
    backed by a flat 64KiB buffer; no segmentation is modeled. 16-bit values
    are stored little-endian. All checked accessors return AddressOutOfRange
    for accesses past the end of the buffer.

*/

use crate::error::CpuError;

pub const MEM_SIZE: usize = 0x10000;

// Window of memory persisted by the snapshot exporter after a run.
pub const SNAPSHOT_OFFSET: usize = 0x100;
pub const SNAPSHOT_LEN: usize = 0x4000;

pub struct Memory {
    buf: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; MEM_SIZE],
        }
    }

    /// Copy a program image into memory starting at address 0. Returns the
    /// image length, which bounds the decode loop.
    pub fn load_program(&mut self, image: &[u8]) -> Result<usize, CpuError> {
        if image.len() > MEM_SIZE {
            return Err(CpuError::AddressOutOfRange(image.len() as u32));
        }
        self.buf[0..image.len()].copy_from_slice(image);
        Ok(image.len())
    }

    /// Unchecked byte fetch for the instruction queue. A 16-bit address can
    /// never fall outside the buffer.
    #[inline(always)]
    pub fn peek_u8(&self, addr: u16) -> u8 {
        self.buf[addr as usize]
    }

    pub fn read_u8(&self, addr: u32) -> Result<u8, CpuError> {
        if (addr as usize) < MEM_SIZE {
            Ok(self.buf[addr as usize])
        }
        else {
            Err(CpuError::AddressOutOfRange(addr))
        }
    }

    pub fn write_u8(&mut self, addr: u32, data: u8) -> Result<(), CpuError> {
        if (addr as usize) < MEM_SIZE {
            self.buf[addr as usize] = data;
            Ok(())
        }
        else {
            Err(CpuError::AddressOutOfRange(addr))
        }
    }

    pub fn read_u16(&self, addr: u32) -> Result<u16, CpuError> {
        if (addr as usize) + 1 < MEM_SIZE {
            Ok(u16::from_le_bytes([self.buf[addr as usize], self.buf[addr as usize + 1]]))
        }
        else {
            Err(CpuError::AddressOutOfRange(addr))
        }
    }

    pub fn write_u16(&mut self, addr: u32, data: u16) -> Result<(), CpuError> {
        if (addr as usize) + 1 < MEM_SIZE {
            let bytes = data.to_le_bytes();
            self.buf[addr as usize] = bytes[0];
            self.buf[addr as usize + 1] = bytes[1];
            Ok(())
        }
        else {
            Err(CpuError::AddressOutOfRange(addr))
        }
    }

    #[inline]
    pub fn read_i16(&self, addr: u32) -> Result<i16, CpuError> {
        self.read_u16(addr).map(|w| w as i16)
    }

    #[inline]
    pub fn write_i16(&mut self, addr: u32, data: i16) -> Result<(), CpuError> {
        self.write_u16(addr, data as u16)
    }

    /// The fixed window of memory exported verbatim after a run.
    pub fn snapshot_window(&self) -> &[u8] {
        &self.buf[SNAPSHOT_OFFSET..SNAPSHOT_OFFSET + SNAPSHOT_LEN]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_access_is_little_endian() {
        let mut mem = Memory::new();
        mem.write_u16(0x1000, 0x1234).unwrap();
        assert_eq!(mem.read_u8(0x1000).unwrap(), 0x34);
        assert_eq!(mem.read_u8(0x1001).unwrap(), 0x12);
        assert_eq!(mem.read_u16(0x1000).unwrap(), 0x1234);
        assert_eq!(mem.read_i16(0x1000).unwrap(), 0x1234);
    }

    #[test]
    fn test_bounds_checking() {
        let mut mem = Memory::new();
        assert_eq!(mem.read_u8(0xFFFF).unwrap(), 0);
        assert_eq!(mem.read_u16(0x10000), Err(CpuError::AddressOutOfRange(0x10000)));
        // A word access at the top of memory straddles the end of the buffer.
        assert_eq!(mem.read_u16(0xFFFF), Err(CpuError::AddressOutOfRange(0xFFFF)));
        assert_eq!(mem.write_u16(0xFFFF, 0), Err(CpuError::AddressOutOfRange(0xFFFF)));
    }

    #[test]
    fn test_snapshot_window() {
        let mut mem = Memory::new();
        mem.write_u8(SNAPSHOT_OFFSET as u32, 0xAA).unwrap();
        let window = mem.snapshot_window();
        assert_eq!(window.len(), SNAPSHOT_LEN);
        assert_eq!(window[0], 0xAA);
    }

    #[test]
    fn test_oversized_program_rejected() {
        let mut mem = Memory::new();
        let image = vec![0u8; MEM_SIZE + 1];
        assert!(mem.load_program(&image).is_err());
    }
}
