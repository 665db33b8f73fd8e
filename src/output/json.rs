//! JSON health report file
//!
//! The report is written to a temporary sibling file and renamed over the
//! target, so readers see either the previous report or the new one.

use crate::output::traits::{OutputResult, ReportSink};
use crate::report::HealthReport;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the report as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonFileSink {
    fn write(&self, report: &HealthReport) -> OutputResult<()> {
        let json = serde_json::to_string_pretty(report)?;
        write_atomically(&self.path, json.as_bytes())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads a previously written report
pub fn read_report(path: &Path) -> OutputResult<HealthReport> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes `content` to `path` via a temporary file in the same directory
pub(crate) fn write_atomically(path: &Path, content: &[u8]) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(content)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        std::fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }

    Ok(result?)
}
