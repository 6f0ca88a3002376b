//! `json2sh` command line: standard input to standard output.
//!
//! Exit codes: 0 on success, 23 for any conversion failure (with a
//! `json2sh:<line>:<col>: <message>` diagnostic on standard error), 42 for
//! invalid invocation.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use json2sh::Options;

const EXIT_FAILURE: u8 = 23;
const EXIT_USAGE: u8 = 42;

/// Convert any JSON document into lines readable by a shell.
///
/// Reads one JSON value from standard input and writes one
/// PREFIX<path>SEP<value>LF line per scalar leaf to standard output,
/// suitable for `eval`.
#[derive(Debug, Parser)]
#[command(name = "json2sh", version)]
#[command(after_help = "\
PREFIX, SEP and LF are de-escaped when they start with '\\':
  \\i ignores the initial backslash, \\c discards the rest of the
  argument, \\C copies the rest as-is.

Examples:
  json2sh <<< '[ true, false, null, [], {} ]'
  json2sh 'CFG_' '=' '\\r\\n' < config.json")]
struct Cli {
    /// Name prefix for every emitted identifier [default: JSON_]
    prefix: Option<String>,

    /// Assignment separator [default: =]
    separator: Option<String>,

    /// Line terminator [default: newline]
    terminator: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let failed = err.use_stderr();
            let _ = err.print();
            return if failed {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let options = Options::from_args(
        cli.prefix.as_deref(),
        cli.separator.as_deref(),
        cli.terminator.as_deref(),
    );

    let stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());
    if let Err(err) = json2sh::convert(stdin, &mut out, &options) {
        let _ = out.flush();
        eprintln!("json2sh:{}:{}: {}", err.line(), err.column(), err.kind());
        return ExitCode::from(EXIT_FAILURE);
    }
    if let Err(err) = out.flush() {
        eprintln!("json2sh: {err}");
        return ExitCode::from(EXIT_FAILURE);
    }
    ExitCode::SUCCESS
}
