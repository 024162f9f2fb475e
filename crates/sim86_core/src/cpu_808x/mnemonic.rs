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

    cpu_808x::mnemonic.rs

    Defines mnemonic enum.

*/

#[allow(dead_code)]
#[derive(PartialEq, Copy, Clone, Debug)]
pub enum Mnemonic {
    InvalidOpcode,
    Group,
    MOV,
    ADD,
    SUB,
    CMP,
    JO,
    JNO,
    JB,
    JNB,
    JZ,
    JNZ,
    JBE,
    JNBE,
    JS,
    JNS,
    JP,
    JNP,
    JL,
    JNL,
    JLE,
    JNLE,
    LOOPNE,
    LOOPE,
    LOOP,
    JCXZ,
}

/// Return the assembler name for a mnemonic, using the signed-comparison
/// aliases (je, jne, ja, jg) emitted by common assemblers.
pub fn mnemonic_to_str(mnemonic: Mnemonic) -> &'static str {
    match mnemonic {
        Mnemonic::MOV => "mov",
        Mnemonic::ADD => "add",
        Mnemonic::SUB => "sub",
        Mnemonic::CMP => "cmp",
        Mnemonic::JO => "jo",
        Mnemonic::JNO => "jno",
        Mnemonic::JB => "jb",
        Mnemonic::JNB => "jnb",
        Mnemonic::JZ => "je",
        Mnemonic::JNZ => "jne",
        Mnemonic::JBE => "jbe",
        Mnemonic::JNBE => "ja",
        Mnemonic::JS => "js",
        Mnemonic::JNS => "jns",
        Mnemonic::JP => "jp",
        Mnemonic::JNP => "jnp",
        Mnemonic::JL => "jl",
        Mnemonic::JNL => "jnl",
        Mnemonic::JLE => "jle",
        Mnemonic::JNLE => "jg",
        Mnemonic::LOOPNE => "loopnz",
        Mnemonic::LOOPE => "loopz",
        Mnemonic::LOOP => "loop",
        Mnemonic::JCXZ => "jcxz",
        _ => "*invalid*",
    }
}
