//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for [`InventoryReport`] and
//! [`RootInventoryReport`]. Color/terminal formatting is intentionally
//! excluded from this module; that concern belongs to the CLI layer.

use std::io::Write;

use crate::report::{InventoryReport, RootInventoryReport};

/// Format an `InventoryReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &InventoryReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format an `InventoryReport` as human-readable plain text to a writer.
///
/// Failures are grouped by directory in walk order, followed by a single
/// summary line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &InventoryReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    if !report.failures.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "=== INVENTORY RULES FAILURES ===")?;
        for (directory, failures) in report.by_directory() {
            writeln!(writer)?;
            writeln!(writer, "{}:", directory.display())?;
            for failure in failures {
                writeln!(writer, "  [{}] {}", failure.kind, failure.message)?;
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", summary_line(report))?;
    Ok(())
}

/// The one-line verdict printed after the failure listing.
#[must_use]
pub fn summary_line(report: &InventoryReport) -> String {
    let checked = report.directories_checked;
    if report.ok {
        format!(
            "All inventory rules passed ({checked} {} checked)",
            directory_noun(checked)
        )
    } else {
        let failures = report.errors_count();
        format!(
            "{failures} inventory {} in {} of {checked} {}",
            if failures == 1 { "failure" } else { "failures" },
            report.failed_directories,
            directory_noun(checked)
        )
    }
}

fn directory_noun(count: usize) -> &'static str {
    if count == 1 { "directory" } else { "directories" }
}

/// Format a `RootInventoryReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_root_json(
    report: &RootInventoryReport,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `RootInventoryReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_root_human(
    report: &RootInventoryReport,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    let inventory = report.inventory.display();
    if report.ok {
        writeln!(writer, "{inventory} is up to date with the project root")?;
        return Ok(());
    }

    writeln!(writer)?;
    writeln!(writer, "=== ROOT INVENTORY ===")?;
    writeln!(writer)?;
    for name in &report.diff.missing {
        writeln!(writer, "missing from {inventory}: {name}")?;
    }
    for name in &report.diff.extra {
        writeln!(writer, "listed but not found: {name}")?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "{} missing, {} listed but not found in {inventory}",
        report.diff.missing.len(),
        report.diff.extra.len()
    )?;
    Ok(())
}
