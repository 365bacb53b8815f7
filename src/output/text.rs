//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-package reconciliation status with colors
//! - Update severity indication (major/minor/patch)
//! - Summary with severity and ticket breakdown

use crate::domain::{ReconciliationOutcome, ReportEntry, RunReport, UpdateSeverity};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self, report: &RunReport) -> String {
        if report.dry_run {
            if self.color {
                format!("{} ", "(dry-run)".cyan())
            } else {
                "(dry-run) ".to_string()
            }
        } else {
            String::new()
        }
    }

    /// Format a severity for display
    fn severity_display(&self, severity: UpdateSeverity) -> String {
        let label = match severity {
            UpdateSeverity::Unknown => "?",
            other => other.label(),
        };

        if !self.color {
            return label.to_string();
        }
        match severity {
            UpdateSeverity::Major => label.red().bold().to_string(),
            UpdateSeverity::Minor => label.yellow().to_string(),
            UpdateSeverity::Patch => label.green().to_string(),
            UpdateSeverity::Unknown => label.dimmed().to_string(),
        }
    }

    /// Format an outcome for display
    fn outcome_display(&self, outcome: &ReconciliationOutcome) -> String {
        let text = outcome.to_string();
        if !self.color {
            return text;
        }
        match outcome {
            ReconciliationOutcome::Created { .. } => text.green().to_string(),
            ReconciliationOutcome::ExistingTicket { .. } | ReconciliationOutcome::WouldCreate => {
                text.cyan().to_string()
            }
            ReconciliationOutcome::SearchUnavailable | ReconciliationOutcome::CreationFailed => {
                text.red().bold().to_string()
            }
            ReconciliationOutcome::FilteredOut => text.dimmed().to_string(),
        }
    }

    /// Format a single report entry line
    fn format_entry_line(
        &self,
        entry: &ReportEntry,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let dependency = &entry.dependency;
        let severity = self.severity_display(dependency.severity());
        let outcome = self.outcome_display(&entry.outcome);

        if self.color {
            writeln!(
                writer,
                "  {:width$} {} {} {} [{}] {}",
                dependency.name,
                dependency.current_version.dimmed(),
                "→".dimmed(),
                dependency.latest_version.bright_white().bold(),
                severity,
                outcome,
                width = max_name_len
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {} [{}] {}",
                dependency.name,
                dependency.current_version,
                dependency.latest_version,
                severity,
                outcome,
                width = max_name_len
            )
        }
    }

    /// Count entries by update severity
    fn count_by_severity(&self, report: &RunReport) -> (usize, usize, usize, usize) {
        let mut major = 0;
        let mut minor = 0;
        let mut patch = 0;
        let mut unknown = 0;

        for entry in &report.entries {
            match entry.dependency.severity() {
                UpdateSeverity::Major => major += 1,
                UpdateSeverity::Minor => minor += 1,
                UpdateSeverity::Patch => patch += 1,
                UpdateSeverity::Unknown => unknown += 1,
            }
        }

        (major, minor, patch, unknown)
    }

    /// Count entries by reported status
    fn count_by_status(&self, report: &RunReport) -> Vec<(&'static str, usize)> {
        use std::collections::HashMap;
        let mut counts: HashMap<&'static str, usize> = HashMap::new();

        for entry in &report.entries {
            *counts.entry(entry.outcome.status_label()).or_insert(0) += 1;
        }

        let mut result: Vec<_> = counts.into_iter().collect();
        result.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        result
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        let prefix = self.dry_run_prefix(report);

        // Write manifest header with counts
        if self.color {
            writeln!(
                writer,
                "{}{} {} - {} outdated",
                prefix,
                report.manifest_path.bold(),
                format!("({})", report.ecosystem).dimmed(),
                report.len().to_string().green()
            )?;
        } else {
            writeln!(
                writer,
                "{}{} ({}) - {} outdated",
                prefix,
                report.manifest_path,
                report.ecosystem,
                report.len()
            )?;
        }

        if report.is_empty() {
            writeln!(writer)?;
            return self.format_summary(report, writer);
        }

        let max_name_len = report
            .entries
            .iter()
            .map(|e| e.dependency.name.len())
            .max()
            .unwrap_or(0)
            .max(20);

        for entry in &report.entries {
            self.format_entry_line(entry, max_name_len, writer)?;
        }
        writeln!(writer)?;

        self.format_summary(report, writer)
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix(report);
        let outdated = report.len();
        let errors = report.error_count();

        if self.verbosity == Verbosity::Quiet {
            if outdated == 0 {
                if self.color {
                    writeln!(writer, "{}{}", prefix, "No outdated packages".dimmed())?;
                } else {
                    writeln!(writer, "{}No outdated packages", prefix)?;
                }
            } else if self.color {
                writeln!(
                    writer,
                    "{}{} outdated, {} error(s)",
                    prefix,
                    outdated.to_string().green(),
                    errors
                )?;
            } else {
                writeln!(writer, "{}{} outdated, {} error(s)", prefix, outdated, errors)?;
            }
            return Ok(());
        }

        if self.color {
            writeln!(writer, "{}{}:", prefix, "Summary".bold())?;
        } else {
            writeln!(writer, "{}Summary:", prefix)?;
        }

        if outdated == 0 {
            if self.color {
                writeln!(writer, "  {}", "No outdated packages".dimmed())?;
            } else {
                writeln!(writer, "  No outdated packages")?;
            }
            return Ok(());
        }

        // Severity breakdown
        let (major, minor, patch, unknown) = self.count_by_severity(report);
        let mut parts = Vec::new();
        if major > 0 {
            parts.push(if self.color {
                format!("{} major", major.to_string().red())
            } else {
                format!("{} major", major)
            });
        }
        if minor > 0 {
            parts.push(if self.color {
                format!("{} minor", minor.to_string().yellow())
            } else {
                format!("{} minor", minor)
            });
        }
        if patch > 0 {
            parts.push(if self.color {
                format!("{} patch", patch.to_string().green())
            } else {
                format!("{} patch", patch)
            });
        }
        if unknown > 0 {
            parts.push(if self.color {
                format!("{} unknown", unknown.to_string().dimmed())
            } else {
                format!("{} unknown", unknown)
            });
        }
        writeln!(
            writer,
            "  {} outdated package(s) ({})",
            outdated,
            parts.join(", ")
        )?;

        // Ticket accounting
        if report.dry_run {
            writeln!(
                writer,
                "  {} ticket(s) would be created, {} already tracked",
                report.would_create_count(),
                report.existing_count()
            )?;
        } else {
            let created = report.created_count();
            let created_display = if self.color && created > 0 {
                created.to_string().green().to_string()
            } else {
                created.to_string()
            };
            writeln!(
                writer,
                "  {} ticket(s) created, {} already tracked",
                created_display,
                report.existing_count()
            )?;
        }

        if report.filtered_count() > 0 {
            writeln!(
                writer,
                "  {} package(s) filtered out",
                report.filtered_count()
            )?;
        }

        if errors > 0 {
            if self.color {
                writeln!(writer, "  {} error(s)", errors.to_string().red().bold())?;
            } else {
                writeln!(writer, "  {} error(s)", errors)?;
            }
        }

        // Verbose: show breakdown by reported status
        if self.verbosity == Verbosity::Verbose {
            writeln!(writer)?;
            if self.color {
                writeln!(writer, "{}:", "By status".dimmed())?;
            } else {
                writeln!(writer, "By status:")?;
            }
            for (status, count) in self.count_by_status(report) {
                writeln!(writer, "  {}: {}", status, count)?;
            }
        }

        Ok(())
    }
}
