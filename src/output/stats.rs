//! Run statistics reporting
//!
//! This module logs the outcome of a run and prints the totals of a
//! stored report for `--stats`.

use crate::report::{HealthReport, ReportStats};

/// Logs the totals of a finished run, then each failing link
pub fn log_statistics(report: &HealthReport) {
    let stats = report.stats();
    tracing::info!(
        "Run finished at {}: {} link(s), {} ok, {} failed ({} without response)",
        report.updated_at_string(),
        stats.total,
        stats.ok,
        stats.failed,
        stats.unreachable
    );

    for (url, result) in report.failing() {
        if result.status == 0 {
            tracing::info!("  FAIL {} ({})", url, result.error);
        } else {
            tracing::info!("  FAIL {} (HTTP {})", url, result.status);
        }
    }
}

/// Prints statistics to the console
pub fn print_statistics(stats: &ReportStats) {
    println!("=== Link Health Statistics ===\n");
    println!("Total links: {}", stats.total);
    println!("OK: {}", stats.ok);
    println!("Failed: {}", stats.failed);
    println!("  without response: {}", stats.unreachable);
}
