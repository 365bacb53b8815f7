//! Reconciliation outcome and per-run report types

use super::{Dependency, Ecosystem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final disposition of one dependency after reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReconciliationOutcome {
    /// An open or reusable ticket for this update already exists
    ExistingTicket {
        /// Key of the matched ticket
        key: String,
    },
    /// A new ticket was created
    Created {
        /// Key returned by the tracker
        key: String,
    },
    /// Dry-run: no matching ticket found, creation was skipped
    WouldCreate,
    /// Tracker search failed, so the no-duplicate invariant could not
    /// be verified and no creation was attempted
    SearchUnavailable,
    /// Ticket creation was attempted and failed
    CreationFailed,
    /// Excluded by the package name filter before any tracker call
    FilteredOut,
}

impl ReconciliationOutcome {
    /// Creates an ExistingTicket outcome
    pub fn existing_ticket(key: impl Into<String>) -> Self {
        ReconciliationOutcome::ExistingTicket { key: key.into() }
    }

    /// Creates a Created outcome
    pub fn created(key: impl Into<String>) -> Self {
        ReconciliationOutcome::Created { key: key.into() }
    }

    /// Returns the ticket key when this outcome references one
    pub fn ticket_key(&self) -> Option<&str> {
        match self {
            ReconciliationOutcome::ExistingTicket { key } => Some(key),
            ReconciliationOutcome::Created { key } => Some(key),
            _ => None,
        }
    }

    /// Returns true if this outcome represents a per-dependency failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ReconciliationOutcome::SearchUnavailable | ReconciliationOutcome::CreationFailed
        )
    }

    /// Returns the externally reported status for this outcome.
    ///
    /// Created and reused tickets collapse into one status; the enum
    /// keeps them distinguishable internally.
    pub fn status_label(&self) -> &'static str {
        match self {
            ReconciliationOutcome::ExistingTicket { .. } | ReconciliationOutcome::Created { .. } => {
                "ticket_created"
            }
            ReconciliationOutcome::WouldCreate => "dry_run_would_create",
            ReconciliationOutcome::SearchUnavailable | ReconciliationOutcome::CreationFailed => {
                "processing_error"
            }
            ReconciliationOutcome::FilteredOut => "filtered_out",
        }
    }
}

impl fmt::Display for ReconciliationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationOutcome::ExistingTicket { key } => write!(f, "existing ticket {}", key),
            ReconciliationOutcome::Created { key } => write!(f, "created {}", key),
            ReconciliationOutcome::WouldCreate => write!(f, "would create (dry run)"),
            ReconciliationOutcome::SearchUnavailable => write!(f, "search unavailable"),
            ReconciliationOutcome::CreationFailed => write!(f, "creation failed"),
            ReconciliationOutcome::FilteredOut => write!(f, "filtered out"),
        }
    }
}

/// One dependency paired with its reconciliation outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// The dependency that was processed
    pub dependency: Dependency,
    /// What happened to it
    pub outcome: ReconciliationOutcome,
}

impl ReportEntry {
    /// Creates a new report entry
    pub fn new(dependency: Dependency, outcome: ReconciliationOutcome) -> Self {
        Self {
            dependency,
            outcome,
        }
    }
}

/// Result of a full run over one manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Path of the manifest that was scanned
    pub manifest_path: String,
    /// Ecosystem resolved from the manifest filename
    pub ecosystem: Ecosystem,
    /// Whether tracker writes were suppressed
    pub dry_run: bool,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Per-dependency results in discovery order
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    /// Creates a report stamped with the current time
    pub fn new(
        manifest_path: impl Into<String>,
        ecosystem: Ecosystem,
        dry_run: bool,
        entries: Vec<ReportEntry>,
    ) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            ecosystem,
            dry_run,
            generated_at: Utc::now(),
            entries,
        }
    }

    /// Number of dependencies processed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no outdated dependencies were found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of newly created tickets
    pub fn created_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, ReconciliationOutcome::Created { .. }))
            .count()
    }

    /// Number of dependencies matched to an already existing ticket
    pub fn existing_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, ReconciliationOutcome::ExistingTicket { .. }))
            .count()
    }

    /// Number of tickets that would be created outside dry-run
    pub fn would_create_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == ReconciliationOutcome::WouldCreate)
            .count()
    }

    /// Number of dependencies excluded by the name filter
    pub fn filtered_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == ReconciliationOutcome::FilteredOut)
            .count()
    }

    /// Number of per-dependency failures
    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_error()).count()
    }

    /// Returns true if any dependency failed to reconcile
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.is_error())
    }
}
