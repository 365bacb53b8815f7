//! Outdated dependency structures

use super::{Ecosystem, UpdateSeverity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An installed package with a newer version available upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Version currently installed
    pub current_version: String,
    /// Newest published version
    pub latest_version: String,
    /// The ecosystem this package belongs to
    pub ecosystem: Ecosystem,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        name: impl Into<String>,
        current_version: impl Into<String>,
        latest_version: impl Into<String>,
        ecosystem: Ecosystem,
    ) -> Self {
        Self {
            name: name.into(),
            current_version: current_version.into(),
            latest_version: latest_version.into(),
            ecosystem,
        }
    }

    /// Classifies how far behind the current version is
    pub fn severity(&self) -> UpdateSeverity {
        UpdateSeverity::classify(&self.current_version, &self.latest_version)
    }

    /// Builds the canonical ticket summary for this update.
    ///
    /// The exact wording doubles as the deduplication key: every run
    /// derives the same summary for the same logical update, so tracker
    /// searches and the run-scoped cache both key off this string.
    pub fn summary(&self) -> String {
        format!(
            "Update {} package {} from {} to {}",
            self.ecosystem.summary_label(),
            self.name,
            self.current_version,
            self.latest_version
        )
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} [{}]",
            self.name, self.current_version, self.latest_version, self.ecosystem
        )
    }
}
