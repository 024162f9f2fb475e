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

    bytequeue.rs

    Implements the ByteQueue trait. The instruction decoder operates on any
    implementor, permitting decode from simulated memory or from raw byte
    buffers in tests. The queue cursor is a 16-bit offset and wraps at the
    top of the address space, as the hardware's instruction pointer does.

*/

use crate::memory::Memory;

pub trait ByteQueue {
    fn tell(&self) -> u16;

    fn q_read_u8(&mut self) -> u8;
    fn q_read_i8(&mut self) -> i8;
    fn q_read_u16(&mut self) -> u16;
    fn q_read_i16(&mut self) -> i16;
}

pub struct MemoryQueue<'a> {
    mem: &'a Memory,
    pos: u16,
}

impl<'a> MemoryQueue<'a> {
    pub fn new(mem: &'a Memory, pos: u16) -> Self {
        Self { mem, pos }
    }
}

impl ByteQueue for MemoryQueue<'_> {
    #[inline(always)]
    fn tell(&self) -> u16 {
        self.pos
    }

    fn q_read_u8(&mut self) -> u8 {
        let byte = self.mem.peek_u8(self.pos);
        self.pos = self.pos.wrapping_add(1);
        byte
    }

    fn q_read_i8(&mut self) -> i8 {
        self.q_read_u8() as i8
    }

    fn q_read_u16(&mut self) -> u16 {
        let lo = self.q_read_u8();
        let hi = self.q_read_u8();
        u16::from_le_bytes([lo, hi])
    }

    fn q_read_i16(&mut self) -> i16 {
        self.q_read_u16() as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_reads_little_endian() {
        let mut mem = Memory::new();
        mem.load_program(&[0x05, 0x34, 0x12, 0xFB]).unwrap();

        let mut q = MemoryQueue::new(&mem, 0);
        assert_eq!(q.q_read_u8(), 0x05);
        assert_eq!(q.tell(), 1);
        assert_eq!(q.q_read_u16(), 0x1234);
        assert_eq!(q.q_read_i8(), -5);
        assert_eq!(q.tell(), 4);
    }

    #[test]
    fn test_queue_cursor_wraps() {
        let mem = Memory::new();
        let mut q = MemoryQueue::new(&mem, 0xFFFF);
        let _ = q.q_read_u16();
        assert_eq!(q.tell(), 1);
    }
}
