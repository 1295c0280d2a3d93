// Inherit lint configuration from lib.rs for consistency
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::io::Read;
use std::path::Path;

use clap::Parser;

use intake::cli::commands::{Cli, Command};
use intake::cli::output;
use intake::error::{IntakeError, Result};
use intake::extract::{self, ReferenceDate};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse {
            file,
            pretty,
            as_of,
        } => cmd_parse(file.as_deref(), pretty, as_of.as_deref()),
        Command::Evaluate { path, sample_size } => cmd_evaluate(&path, sample_size),
    }
}

fn cmd_parse(file: Option<&str>, pretty: bool, as_of: Option<&str>) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let today = match as_of {
        Some(value) => parse_reference_date(value)?,
        None => ReferenceDate::today(),
    };

    let parsed = extract::parse_resume_at(&text, today);
    if pretty {
        println!("{}", output::format_json_pretty(&parsed));
    } else {
        println!("{}", output::format_json(&parsed));
    }
    Ok(())
}

fn cmd_evaluate(path: &str, sample_size: Option<usize>) -> Result<()> {
    let report = extract::evaluate_jsonl(Path::new(path), sample_size)?;
    println!("{}", output::format_json(&report));
    Ok(())
}

/// Parse a "YYYY-MM" reference date.
fn parse_reference_date(value: &str) -> Result<ReferenceDate> {
    let invalid = || IntakeError::Other(format!("invalid --as-of date (want YYYY-MM): {value}"));
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(ReferenceDate { year, month })
}
