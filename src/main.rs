use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;
mod coverage;
mod metrics;
mod output;
mod questions;
mod report;
mod sample;
mod schema;
mod scores;
mod units;

use cli::{AuditArgs, Command, RootArgs};
use report::AuditReport;
use schema::{MinimalLog, SCHEMA_VERSION};

const LOG_ENV: &str = "SIA_AUDIT_LOG";

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.command.verbose());

    match args.command {
        Command::Audit(args) => cmd_audit(args),
        Command::Samples => cmd_samples(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_audit(args: AuditArgs) -> Result<()> {
    let log = load_log(args.input.as_deref(), args.sample.as_deref())?;
    if log.schema() != SCHEMA_VERSION {
        tracing::debug!(schema = log.schema(), "input schema differs from built-in schema");
    }

    let report = AuditReport::evaluate(&log);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize audit report")?;
        println!("{json}");
    } else {
        print!("{}", report::render_console(&report));
    }

    if args.no_files {
        return Ok(());
    }
    let report_md = report::render_markdown(&report);
    let written = output::write_outputs(&log, &report_md, &args.out_dir)?;
    // keep stdout parseable in --json mode
    if args.json {
        eprintln!("[Wrote] {}", written.log_path.display());
        eprintln!("[Wrote] {}", written.report_path.display());
    } else {
        println!();
        println!("[Wrote] {}", written.log_path.display());
        println!("[Wrote] {}", written.report_path.display());
    }
    Ok(())
}

fn cmd_samples() -> Result<()> {
    for name in sample::sample_names() {
        let marker = if name == sample::DEFAULT_SAMPLE {
            " (default)"
        } else {
            ""
        };
        println!("{name}{marker}");
    }
    Ok(())
}

fn load_log(input: Option<&Path>, sample_name: Option<&str>) -> Result<MinimalLog> {
    if let Some(path) = input {
        tracing::info!(path = %path.display(), "loading input log");
        let content =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        return MinimalLog::parse(&content).with_context(|| format!("parse {}", path.display()));
    }
    let name = sample_name.unwrap_or(sample::DEFAULT_SAMPLE);
    tracing::info!(sample = name, "loading built-in sample");
    sample::load_sample(name)
}
