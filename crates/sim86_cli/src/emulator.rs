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

    emulator.rs

    Wires the simulator core to the outside world: loads the program image,
    attaches the trace sink, runs the simulation, prints the final register
    report and persists the memory snapshot window.

*/

use std::fs;

use anyhow::{Context, Error};

use sim86_core::{Intel808x, TraceLogger};

use crate::config::ConfigFileParams;

pub fn run(config: &ConfigFileParams) -> Result<(), Error> {
    let image = fs::read(&config.program)
        .with_context(|| format!("Failed to read program image: {}", config.program.display()))?;

    let mut cpu = Intel808x::new();
    cpu.load_program(&image)?;

    if !config.simulator.no_trace {
        let logger = match &config.simulator.trace_file {
            Some(path) => TraceLogger::from_filename(path),
            None => TraceLogger::Console,
        };
        cpu.set_trace_logger(logger);
    }

    cpu.run()?;

    println!("Values:");
    println!("{}", cpu.state_string());

    if !config.simulator.no_snapshot {
        let snapshot_path = config.snapshot_file();
        fs::write(&snapshot_path, cpu.snapshot_window())
            .with_context(|| format!("Failed to write memory snapshot: {}", snapshot_path.display()))?;
        log::info!("Wrote memory snapshot to {}", snapshot_path.display());
    }

    Ok(())
}
