//! Issue tracker boundary
//!
//! This module provides:
//! - TrackerClient trait abstracting ticket search and creation
//! - Issue and ticket data shapes exchanged across that boundary
//! - Jira REST v3 client
//! - OfflineTracker for dry runs without tracker credentials

mod jira;

pub use jira::JiraClient;

use crate::domain::Dependency;
use crate::error::TrackerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Label applied to every ticket this tool creates
pub const TICKET_LABEL: &str = "outdated-dependency";

/// Workflow status of a found issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStatus {
    /// Status name as configured in the tracker
    pub name: String,
    /// Status category key, when the tracker reports one
    pub category: Option<String>,
}

impl IssueStatus {
    /// Creates a new issue status
    pub fn new(name: impl Into<String>, category: Option<String>) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Returns true if the issue counts as closed.
    ///
    /// Status names vary per tracker configuration, so both the common
    /// closed names and the `done` status category are recognized.
    pub fn is_closed(&self) -> bool {
        if self.name.eq_ignore_ascii_case("closed") || self.name.eq_ignore_ascii_case("resolved") {
            return true;
        }
        self.category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case("done"))
    }
}

/// An issue returned by a tracker search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundIssue {
    /// Issue key (e.g. "DEP-42")
    pub key: String,
    /// Issue summary text
    pub summary: String,
    /// Workflow status
    pub status: IssueStatus,
}

/// A ticket to be created for one outdated dependency.
///
/// Carries the semantic content only; how it renders (rich text format,
/// field layout) is the client's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    /// Target project key
    pub project_key: String,
    /// Issue type name (e.g. "Task")
    pub issue_type: String,
    /// Canonical ticket summary
    pub summary: String,
    /// Outdated package name
    pub package: String,
    /// Ecosystem the package belongs to
    pub ecosystem: crate::domain::Ecosystem,
    /// Installed version
    pub current_version: String,
    /// Newest published version
    pub latest_version: String,
    /// Tracker priority name derived from update severity
    pub priority: String,
    /// Ticket labels
    pub labels: Vec<String>,
}

impl NewTicket {
    /// Builds the ticket for one outdated dependency
    pub fn for_dependency(
        project_key: impl Into<String>,
        issue_type: impl Into<String>,
        dependency: &Dependency,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            issue_type: issue_type.into(),
            summary: dependency.summary(),
            package: dependency.name.clone(),
            ecosystem: dependency.ecosystem,
            current_version: dependency.current_version.clone(),
            latest_version: dependency.latest_version.clone(),
            priority: dependency.severity().priority_name().to_string(),
            labels: vec![
                TICKET_LABEL.to_string(),
                dependency.ecosystem.name().to_string(),
            ],
        }
    }
}

/// Trait for issue tracker operations
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Searches the project for tickets plausibly matching the summary
    async fn search(
        &self,
        project_key: &str,
        summary: &str,
    ) -> Result<Vec<FoundIssue>, TrackerError>;

    /// Creates a ticket and returns its key
    async fn create(&self, ticket: &NewTicket) -> Result<String, TrackerError>;
}

/// Tracker stand-in for dry runs without tracker credentials.
///
/// Search finds nothing, so every dependency flows to the dry-run
/// outcome; creation is refused outright.
pub struct OfflineTracker;

#[async_trait]
impl TrackerClient for OfflineTracker {
    async fn search(
        &self,
        _project_key: &str,
        _summary: &str,
    ) -> Result<Vec<FoundIssue>, TrackerError> {
        Ok(Vec::new())
    }

    async fn create(&self, _ticket: &NewTicket) -> Result<String, TrackerError> {
        Err(TrackerError::request("tracker is not configured"))
    }
}
