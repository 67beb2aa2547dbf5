// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const USAGE: &str = "\
Usage: sector-tess <map.json> [options]

Options:
  -o, --output <file>  Write the JSON report to <file>
      --strict         Fail sectors whose ear clipping runs out of attempts
      --timings        Print per-stage timings
      --sequential     Process sectors on one thread
  -h, --help           Show this help";

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub timings: bool,
    pub sequential: bool,
}

/// Result of parsing: either arguments to run with, or a help request.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = Args::default();
    let mut input: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-o" | "--output" => {
                let path = args.next().context("--output needs a file path")?;
                parsed.output = Some(PathBuf::from(path));
            }
            "--strict" => parsed.strict = true,
            "--timings" => parsed.timings = true,
            "--sequential" => parsed.sequential = true,
            flag if flag.starts_with('-') => bail!("unknown option '{flag}'"),
            path => {
                if input.is_some() {
                    bail!("unexpected extra argument '{path}'");
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    parsed.input = input.context("missing map file")?;
    Ok(Command::Run(parsed))
}
