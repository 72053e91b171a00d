//! Shared test infrastructure for integration tests.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch output directory plus a handle on the compiled binary.
pub struct AuditFixture {
    pub temp_dir: TempDir,
}

/// Captured result of one `sia-audit` invocation.
#[derive(Debug)]
pub struct RunResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl AuditFixture {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn out_dir(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("out")
    }

    /// Write a log document into the scratch dir and return its path.
    pub fn write_input(
        &self,
        name: &str,
        value: &serde_json::Value,
    ) -> anyhow::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
        Ok(path)
    }

    /// Run the binary with `args`, logging silenced unless overridden.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<RunResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_sia-audit"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("SIA_AUDIT_LOG", "error")
            .output()?;
        Ok(output.into())
    }

    pub fn audit_into_out_dir(&self, extra: &[&str]) -> anyhow::Result<RunResult> {
        let out_dir = self.out_dir();
        let out_dir = out_dir.to_str().ok_or_else(|| anyhow::anyhow!("non UTF-8 temp path"))?;
        let mut args = vec!["audit", "--out-dir", out_dir];
        args.extend_from_slice(extra);
        self.run(&args)
    }
}

pub fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}
