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

    config.rs

    Parses the optional sim86.toml configuration file and overlays command
    line arguments on top of the file settings. Command line arguments always
    take priority over the configuration file.

*/

use std::path::{Path, PathBuf};

use bpaf::Bpaf;
use serde_derive::Deserialize;

#[derive(Debug, Bpaf)]
#[bpaf(options, version, generate(cli_args))]
pub struct CmdLineArgs {
    #[bpaf(long("config_file"), long("configfile"))]
    pub config_file: Option<PathBuf>,

    #[bpaf(long("trace_file"), long("tracefile"))]
    pub trace_file: Option<PathBuf>,

    #[bpaf(long("no_trace"), long("notrace"), switch)]
    pub no_trace: bool,

    #[bpaf(long("snapshot_file"), long("snapshotfile"))]
    pub snapshot_file: Option<PathBuf>,

    #[bpaf(long("no_snapshot"), long("nosnapshot"), switch)]
    pub no_snapshot: bool,

    /// Path to the assembled program image to simulate
    #[bpaf(positional("PROGRAM"))]
    pub program: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Simulator {
    pub trace_file: Option<PathBuf>,
    pub no_trace: bool,
    pub snapshot_file: Option<PathBuf>,
    pub no_snapshot: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFileParams {
    pub simulator: Simulator,

    #[serde(skip)]
    pub program: PathBuf,
}

impl ConfigFileParams {
    /// Command line arguments override config file arguments.
    fn overlay(&mut self, shell_args: CmdLineArgs) {
        if let Some(trace_file) = shell_args.trace_file {
            self.simulator.trace_file = Some(trace_file);
        }
        self.simulator.no_trace |= shell_args.no_trace;

        if let Some(snapshot_file) = shell_args.snapshot_file {
            self.simulator.snapshot_file = Some(snapshot_file);
        }
        self.simulator.no_snapshot |= shell_args.no_snapshot;

        self.program = shell_args.program;
    }

    pub fn snapshot_file(&self) -> PathBuf {
        self.simulator
            .snapshot_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("image.data"))
    }
}

pub fn read_config(toml_string: impl AsRef<str>, shell_args: CmdLineArgs) -> Result<ConfigFileParams, anyhow::Error> {
    let mut toml_args: ConfigFileParams = toml::from_str(toml_string.as_ref())?;
    toml_args.overlay(shell_args);
    Ok(toml_args)
}

/// Read the TOML configuration from a file path, parse and overlay command
/// line arguments. A missing configuration file at the default path is not
/// an error; every setting has a working default.
pub fn read_config_file<P>(default_path: P) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    log::debug!("Reading command line arguments...");
    let shell_args = cli_args().run();

    // Allow configuration file path to be overridden by command line
    // argument 'config_file'
    let toml_string = if let Some(configfile_path) = shell_args.config_file.as_ref() {
        std::fs::read_to_string(configfile_path)?
    }
    else {
        match std::fs::read_to_string(default_path) {
            Ok(toml_string) => toml_string,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        }
    };

    read_config(toml_string, shell_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_args(program: &str) -> CmdLineArgs {
        CmdLineArgs {
            config_file: None,
            trace_file: None,
            no_trace: false,
            snapshot_file: None,
            no_snapshot: false,
            program: PathBuf::from(program),
        }
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = read_config("", shell_args("prog.bin")).unwrap();
        assert_eq!(config.program, PathBuf::from("prog.bin"));
        assert!(!config.simulator.no_trace);
        assert_eq!(config.snapshot_file(), PathBuf::from("image.data"));
    }

    #[test]
    fn test_shell_args_override_file_settings() {
        let toml = r#"
            [simulator]
            snapshot_file = "from_file.data"
            no_trace = true
        "#;
        let mut args = shell_args("prog.bin");
        args.snapshot_file = Some(PathBuf::from("from_args.data"));
        let config = read_config(toml, args).unwrap();

        assert_eq!(config.snapshot_file(), PathBuf::from("from_args.data"));
        assert!(config.simulator.no_trace);
    }
}
