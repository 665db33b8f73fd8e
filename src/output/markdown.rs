//! Markdown summary generation
//!
//! This module generates a human-readable companion to the JSON report:
//! run timestamp, totals, and a table of every link that failed.

use crate::output::json::write_atomically;
use crate::output::traits::{OutputResult, ReportSink};
use crate::report::HealthReport;
use std::path::PathBuf;

/// Writes a markdown summary of the report
#[derive(Debug, Clone)]
pub struct MarkdownSummarySink {
    path: PathBuf,
}

impl MarkdownSummarySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for MarkdownSummarySink {
    fn write(&self, report: &HealthReport) -> OutputResult<()> {
        let markdown = format_markdown_summary(report);
        write_atomically(&self.path, markdown.as_bytes())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Formats a health report as markdown
///
/// # Arguments
///
/// * `report` - The finished health report
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(report: &HealthReport) -> String {
    let stats = report.stats();
    let mut md = String::new();

    md.push_str("# Link Health Summary\n\n");

    md.push_str(&format!("- **Updated**: {}\n", report.updated_at_string()));
    md.push_str(&format!("- **Links checked**: {}\n", stats.total));
    md.push_str(&format!("- **OK**: {}\n", stats.ok));
    md.push_str(&format!("- **Failed**: {}\n", stats.failed));
    if stats.unreachable > 0 {
        md.push_str(&format!(
            "- **No response**: {}\n",
            stats.unreachable
        ));
    }
    md.push('\n');

    md.push_str("## Failing Links\n\n");
    if stats.failed == 0 {
        md.push_str("All links responded successfully.\n");
        return md;
    }

    md.push_str("| URL | Status | Error |\n");
    md.push_str("|-----|--------|-------|\n");
    for (url, result) in report.failing() {
        let status = if result.status == 0 {
            "-".to_string()
        } else {
            result.status.to_string()
        };
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(url),
            status,
            escape_cell(&result.error)
        ));
    }

    md
}

/// Keeps table cells on one line and pipes from splitting columns
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
