//! Ticket reconciliation
//!
//! Decides, for each outdated dependency, whether a ticket already
//! covers the update or a new one must be filed. A run-scoped cache
//! guarantees at most one creation per logical update even when the
//! same dependency surfaces more than once.

use crate::domain::{Dependency, ReconciliationOutcome};
use crate::error::TrackerError;
use crate::tracker::{FoundIssue, NewTicket, TrackerClient};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Reconciles outdated dependencies against the issue tracker
pub struct ReconciliationEngine {
    tracker: Arc<dyn TrackerClient>,
    project_key: String,
    issue_type: String,
    dry_run: bool,
    seen: HashMap<String, ReconciliationOutcome>,
}

impl ReconciliationEngine {
    /// Creates an engine with an empty run cache
    pub fn new(
        tracker: Arc<dyn TrackerClient>,
        project_key: impl Into<String>,
        issue_type: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            tracker,
            project_key: project_key.into(),
            issue_type: issue_type.into(),
            dry_run,
            seen: HashMap::new(),
        }
    }

    /// Resolves one dependency to its reconciliation outcome.
    ///
    /// Outcomes are cached by canonical summary for the rest of the
    /// run. Creation failures are the exception: they stay uncached so
    /// a later duplicate may retry.
    pub async fn resolve(&mut self, dependency: &Dependency) -> ReconciliationOutcome {
        let summary = dependency.summary();

        if let Some(cached) = self.seen.get(&summary) {
            tracing::debug!("reusing outcome from this run for: {}", summary);
            return cached.clone();
        }

        let outcome = self.reconcile(dependency, &summary).await;

        if !matches!(outcome, ReconciliationOutcome::CreationFailed) {
            self.seen.insert(summary, outcome.clone());
        }

        outcome
    }

    async fn reconcile(&self, dependency: &Dependency, summary: &str) -> ReconciliationOutcome {
        let found = match self.tracker.search(&self.project_key, summary).await {
            Ok(found) => found,
            Err(e) => {
                log_tracker_error("search", summary, &e);
                return ReconciliationOutcome::SearchUnavailable;
            }
        };

        if let Some(key) = match_existing(&found, summary) {
            tracing::info!("existing ticket {} covers: {}", key, summary);
            return ReconciliationOutcome::existing_ticket(key);
        }

        if self.dry_run {
            tracing::info!("dry run, would create ticket: {}", summary);
            return ReconciliationOutcome::WouldCreate;
        }

        let ticket = NewTicket::for_dependency(&self.project_key, &self.issue_type, dependency);
        match self.tracker.create(&ticket).await {
            Ok(key) => {
                tracing::info!("created ticket {}: {}", key, summary);
                ReconciliationOutcome::created(key)
            }
            Err(e) => {
                log_tracker_error("creation", summary, &e);
                ReconciliationOutcome::CreationFailed
            }
        }
    }
}

/// Picks the ticket to reuse among search hits.
///
/// Only hits whose normalized summary equals the wanted one count as
/// matches. An open match wins; failing that, the most recent closed
/// match is reused as-is rather than filing a duplicate.
fn match_existing(found: &[FoundIssue], summary: &str) -> Option<String> {
    let wanted = normalize_summary(summary);
    let matching: Vec<&FoundIssue> = found
        .iter()
        .filter(|issue| normalize_summary(&issue.summary) == wanted)
        .collect();

    if let Some(open) = matching.iter().find(|issue| !issue.status.is_closed()) {
        return Some(open.key.clone());
    }

    matching.first().map(|issue| issue.key.clone())
}

/// Normalizes a summary for comparison: lowercase, runs of
/// non-alphanumeric characters collapsed to a single space, trimmed.
fn normalize_summary(summary: &str) -> String {
    let lowered = summary.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, " ")
        .trim()
        .to_string()
}

fn log_tracker_error(operation: &str, summary: &str, error: &TrackerError) {
    tracing::error!("ticket {} failed for {}: {}", operation, summary, error);
}
