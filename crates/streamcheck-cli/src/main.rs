//! streamcheck CLI.
//!
//! Validates one stream against a format description and reports the verdict
//! through the exit status: 42 accepted, 43 rejected, 2 for usage or
//! configuration errors.

mod format;
mod interpret;

use anyhow::Context;
use clap::Parser;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use streamcheck_core::{validate, Policy, Verdict};
use tracing_subscriber::EnvFilter;

use crate::format::Format;
use crate::interpret::Interpreter;

/// Exit status for anything that is not a verdict.
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "streamcheck")]
#[command(about = "Validate a data stream against a format description", long_about = None)]
#[command(version)]
struct Cli {
    /// Format description (.yaml, .yml or .json)
    #[arg(short, long)]
    format: PathBuf,

    /// Read the stream from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Policy flags: case_sensitive, space_change_sensitive. Other tokens are ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    flags: Vec<OsString>,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn check(cli: &Cli) -> anyhow::Result<Verdict> {
    let format = Format::from_file(&cli.format)
        .with_context(|| format!("loading format {}", cli.format.display()))?;
    let policy = format.policy.union(Policy::from_args(&cli.flags));

    tracing::debug!(
        format = format.name.as_deref().unwrap_or("<unnamed>"),
        case_sensitive = policy.case_sensitive,
        whitespace_sensitive = policy.whitespace_sensitive,
        "starting validation"
    );

    let mut interpreter = Interpreter::new();
    let verdict = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening input {}", path.display()))?;
            validate(BufReader::new(file), policy, |v| interpreter.run(&format, v))
        }
        None => validate(io::stdin().lock(), policy, |v| interpreter.run(&format, v)),
    };
    Ok(verdict)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match check(&cli) {
        Ok(verdict) => {
            if let Err(e) = verdict.report(&mut io::stdout().lock()) {
                tracing::warn!(error = %e, "failed to write diagnostic");
            }
            verdict.exit_code()
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}
