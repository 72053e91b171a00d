//! CLI argument parsing for the audit workflow.
//!
//! The CLI only wires inputs to the scoring engine; every decision lives in the
//! engine modules so the same rules apply to files and built-in samples.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "sia-audit",
    version,
    about = "Quantify which accountability questions a public incident log cannot answer",
    after_help = "Commands:\n  audit [--input <file> | --sample <name>]  Score a log and write the report\n  samples                                  List built-in sample logs\n\nExamples:\n  sia-audit audit --sample uber_atg_ntsb_2018 --out-dir out_demo\n  sia-audit audit --input your_case.json --out-dir out_demo\n  sia-audit audit --input your_case.json --no-files --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Audit(AuditArgs),
    /// List built-in sample logs
    Samples,
}

/// Audit command inputs for a single log.
#[derive(Parser, Debug)]
#[command(about = "Score evidence coverage for a public minimal log")]
pub struct AuditArgs {
    /// Input JSON path (public minimal log)
    #[arg(long, value_name = "PATH", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Built-in sample to audit (see `sia-audit samples`)
    #[arg(long, value_name = "NAME")]
    pub sample: Option<String>,

    /// Output directory for the re-saved log and Markdown report
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Do not write output files (console only)
    #[arg(long)]
    pub no_files: bool,

    /// Emit the machine-readable JSON report instead of the console summary
    #[arg(long)]
    pub json: bool,

    /// Emit debug logging for every classification step
    #[arg(long)]
    pub verbose: bool,
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Audit(args) => args.verbose,
            Command::Samples => false,
        }
    }
}
