use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "intake",
    version,
    about = "Deterministic, rule-based resume information extraction",
    after_help = "NOTE: Input is plain text already extracted from PDF/DOCX. \
                  Output is a JSON record on stdout; logs go to stderr (set RUST_LOG \
                  to adjust verbosity)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse one resume text into a structured JSON record.
    ///
    /// Reads the given file, or stdin when no file is passed. The record
    /// always carries every field; fields with no confident answer are empty
    /// rather than missing.
    Parse {
        /// Resume text file (default: stdin)
        file: Option<String>,
        /// Pretty-print the JSON record
        #[arg(long)]
        pretty: bool,
        /// Reference date for open-ended ranges, as YYYY-MM (default: today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Report extraction coverage over a JSONL corpus.
    ///
    /// Each line must be a JSON object with a "text" field holding one
    /// resume's plain text.
    Evaluate {
        /// Path to the JSONL corpus
        path: String,
        /// Only evaluate the first N records
        #[arg(short, long)]
        sample_size: Option<usize>,
    },
}
