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

    cpu_808x::instruction.rs

    Implements the decoded Instruction type and its disassembly rendering.
    Trace lines render as `<mnemonic> <operand-list>` with decimal operands,
    e.g. `mov ax, [1000]` or `je -5`.

*/

use std::{
    fmt,
    fmt::{Display, Formatter},
};

use crate::cpu_808x::{
    mnemonic::{mnemonic_to_str, Mnemonic},
    operands::OperandType,
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InstructionWidth {
    Byte,
    Word,
}

#[derive(Copy, Clone)]
pub enum OperandSelect {
    FirstOperand,
    SecondOperand,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub decode_idx: usize,
    pub opcode: u8,
    pub address: u16,
    pub size: u32,
    pub width: InstructionWidth,
    pub mnemonic: Mnemonic,
    pub operand1_type: OperandType,
    pub operand2_type: OperandType,
}

impl Default for Instruction {
    fn default() -> Self {
        Self {
            decode_idx: 0,
            opcode: 0,
            address: 0,
            size: 1,
            width: InstructionWidth::Word,
            mnemonic: Mnemonic::InvalidOpcode,
            operand1_type: OperandType::NoOperand,
            operand2_type: OperandType::NoOperand,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut instruction_string = String::new();
        instruction_string.push_str(mnemonic_to_str(self.mnemonic));

        let op1 = operand_to_string(self, OperandSelect::FirstOperand);
        if !op1.is_empty() {
            instruction_string.push(' ');
            instruction_string.push_str(&op1);
        }

        let op2 = operand_to_string(self, OperandSelect::SecondOperand);
        if !op2.is_empty() {
            instruction_string.push_str(", ");
            instruction_string.push_str(&op2);
        }

        write!(f, "{}", instruction_string)
    }
}

fn operand_to_string(i: &Instruction, op: OperandSelect) -> String {
    let op_type = match op {
        OperandSelect::FirstOperand => i.operand1_type,
        OperandSelect::SecondOperand => i.operand2_type,
    };

    match op_type {
        OperandType::Immediate8(imm8) => {
            format!("{}", imm8)
        }
        OperandType::Immediate8s(imm8s) => {
            format!("{}", imm8s)
        }
        OperandType::Immediate16(imm16) => {
            format!("{}", imm16 as i16)
        }
        OperandType::Relative8(rel8) => {
            format!("{}", rel8)
        }
        OperandType::Offset8(offset8) => {
            format!("[{}]", offset8)
        }
        OperandType::Offset16(offset16) => {
            format!("[{}]", offset16)
        }
        OperandType::Register8(reg8) => {
            format!("{}", reg8)
        }
        OperandType::Register16(reg16) => {
            format!("{}", reg16)
        }
        OperandType::AddressingMode(mode, _) => {
            format!("{}", mode)
        }
        OperandType::NoOperand => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_808x::{Register16, Register8};

    #[test]
    fn test_direct_move_renders_with_bracketed_address() {
        let i = Instruction {
            mnemonic: Mnemonic::MOV,
            operand1_type: OperandType::Register16(Register16::AX),
            operand2_type: OperandType::Offset16(1000),
            ..Instruction::default()
        };
        assert_eq!(i.to_string(), "mov ax, [1000]");
    }

    #[test]
    fn test_conditional_jump_renders_signed_displacement() {
        let i = Instruction {
            mnemonic: Mnemonic::JZ,
            operand1_type: OperandType::Relative8(-5),
            ..Instruction::default()
        };
        assert_eq!(i.to_string(), "je -5");

        let i = Instruction {
            mnemonic: Mnemonic::LOOP,
            operand1_type: OperandType::Relative8(-12),
            ..Instruction::default()
        };
        assert_eq!(i.to_string(), "loop -12");
    }

    #[test]
    fn test_accumulator_immediate_renders_decimal() {
        let i = Instruction {
            mnemonic: Mnemonic::ADD,
            operand1_type: OperandType::Register8(Register8::AL),
            operand2_type: OperandType::Immediate8(5),
            ..Instruction::default()
        };
        assert_eq!(i.to_string(), "add al, 5");
    }
}
