//! Writing audit artifacts to an output directory.
use crate::schema::MinimalLog;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Paths of the artifacts written for one case.
#[derive(Debug, Clone)]
pub struct WrittenOutputs {
    pub log_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn minimal_log_file_name(case_id: &str) -> String {
    format!("{case_id}_sia_minimal.json")
}

pub fn report_file_name(case_id: &str) -> String {
    format!("{case_id}_sia_audit_report.md")
}

/// Re-save the loaded log and write the Markdown report into `out_dir`.
pub fn write_outputs(log: &MinimalLog, report_md: &str, out_dir: &Path) -> Result<WrittenOutputs> {
    let case_id = log.case_id();
    ensure_plain_file_stem(&case_id)?;
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let log_path = out_dir.join(minimal_log_file_name(&case_id));
    let report_path = out_dir.join(report_file_name(&case_id));

    let json = serde_json::to_string_pretty(log.raw()).context("serialize minimal log")?;
    write_text(&log_path, &json)?;
    write_text(&report_path, report_md)?;
    tracing::debug!(
        log = %log_path.display(),
        report = %report_path.display(),
        "wrote audit outputs"
    );
    Ok(WrittenOutputs {
        log_path,
        report_path,
    })
}

/// `case_id` becomes part of a file name, so it must not name another directory.
fn ensure_plain_file_stem(case_id: &str) -> Result<()> {
    let mut components = Path::new(case_id).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !plain || case_id.contains(['/', '\\']) {
        bail!("case_id {case_id:?} cannot be used as an output file name");
    }
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))
}
