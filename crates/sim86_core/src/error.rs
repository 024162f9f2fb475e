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

    error.rs

    This module defines the fatal error type for the simulator core.

*/

use std::{error::Error, fmt, fmt::Display};

/// Fatal simulation errors. Both kinds terminate the run; no instruction
/// partially applies before one is raised, although the effects of prior
/// instructions remain.
#[derive(Debug, PartialEq)]
pub enum CpuError {
    UnknownOpcode(u8, u32),
    AddressOutOfRange(u32),
}
impl Error for CpuError {}
impl Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self {
            CpuError::UnknownOpcode(o, addr) => write!(
                f,
                "An unsupported opcode was encountered: {:02X} at address: {:04X}",
                o, addr
            ),
            CpuError::AddressOutOfRange(addr) => write!(
                f,
                "A memory access fell outside the simulated address space: {:05X}",
                addr
            ),
        }
    }
}
