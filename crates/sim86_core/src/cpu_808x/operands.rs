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

    cpu_808x::operands.rs

    Defines operand types and sizes produced by instruction decode.

*/

use crate::cpu_808x::{addressing::AddressingMode, Register16, Register8};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OperandSize {
    Operand8,
    Operand16,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OperandType {
    Immediate8(u8),
    Immediate8s(i8),
    Immediate16(u16),
    Relative8(i8),
    Offset8(u16),
    Offset16(u16),
    Register8(Register8),
    Register16(Register16),
    AddressingMode(AddressingMode, OperandSize),
    NoOperand,
}

impl OperandType {
    #[inline(always)]
    pub fn is_address(&self) -> bool {
        matches!(self, OperandType::AddressingMode(..))
    }
}
