//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the run report
//! - Per-package reconciliation status keyed by package name

use crate::domain::RunReport;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonReport {
    /// Manifest file the run scanned
    manifest: String,
    /// Ecosystem the manifest belongs to
    ecosystem: String,
    /// Whether this was a dry-run
    dry_run: bool,
    /// When the report was generated
    generated_at: String,
    /// Per-package results keyed by package name
    packages: BTreeMap<String, JsonPackage>,
    /// Summary statistics
    summary: JsonSummary,
}

/// JSON representation of a single package result
#[derive(Serialize)]
struct JsonPackage {
    /// Installed version
    current_version: String,
    /// Latest available version
    latest_version: String,
    /// Update severity classification
    severity: String,
    /// Reconciliation status
    status: String,
    /// Ticket key if one was found or created, null otherwise
    ticket_key: Option<String>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Total outdated packages found
    outdated: usize,
    /// Tickets created this run
    created: usize,
    /// Packages already covered by an existing ticket
    existing: usize,
    /// Tickets that would be created (dry-run)
    would_create: usize,
    /// Packages that hit a processing error
    errors: usize,
    /// Packages excluded by the package filter
    filtered: usize,
}

impl JsonReport {
    fn from_report(report: &RunReport) -> Self {
        let mut packages = BTreeMap::new();
        for entry in &report.entries {
            let dependency = &entry.dependency;
            packages.insert(
                dependency.name.clone(),
                JsonPackage {
                    current_version: dependency.current_version.clone(),
                    latest_version: dependency.latest_version.clone(),
                    severity: dependency.severity().label().to_string(),
                    status: entry.outcome.status_label().to_string(),
                    ticket_key: entry.outcome.ticket_key().map(String::from),
                },
            );
        }

        Self {
            manifest: report.manifest_path.clone(),
            ecosystem: report.ecosystem.to_string(),
            dry_run: report.dry_run,
            generated_at: report.generated_at.to_rfc3339(),
            packages,
            summary: JsonSummary::from_report(report),
        }
    }
}

impl JsonSummary {
    fn from_report(report: &RunReport) -> Self {
        Self {
            outdated: report.len(),
            created: report.created_count(),
            existing: report.existing_count(),
            would_create: report.would_create_count(),
            errors: report.error_count(),
            filtered: report.filtered_count(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // Quiet mode still has to produce valid JSON, so it emits the
        // summary object rather than suppressing output entirely.
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        let output = JsonReport::from_report(report);
        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = JsonSummary::from_report(report);
        let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}
