//! Terminal output for merge runs.
//!
//! The [`formatter`] module renders individual messages and the in-place
//! progress line; this module adds the verbose merge report and shared
//! size formatting.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::merge::MergeReport;

/// Print the verbose report for a completed merge.
///
/// Detail lines only appear in verbose mode; skipped files are listed
/// with their reasons whenever present.
pub fn display_merge_report(formatter: &OutputFormatter, report: &MergeReport) {
    formatter.section("Merge report");
    formatter.separator();
    formatter.detail(
        "Files merged",
        &format!("{} of {}", report.merged_files, report.total_files),
    );
    formatter.detail("Pages", &report.total_pages.to_string());
    formatter.detail("Input size", &format_file_size(report.total_size_bytes));
    formatter.detail("Time", &format!("{} ms", report.merge_time.as_millis()));

    if !report.skipped.is_empty() {
        formatter.blank_line();
        formatter.warning(&format!("Skipped {} file(s):", report.skipped.len()));
        for (index, skip) in report.skipped.iter().enumerate() {
            formatter.list_item(index + 1, &format!("{}: {}", skip.name, skip.reason));
        }
    }
}

/// Format a byte count for display.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
