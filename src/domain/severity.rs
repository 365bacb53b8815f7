//! Update severity classification from version distance

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How far apart a dependency's current and latest versions are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateSeverity {
    /// Major version bump (e.g. 1.x.x to 2.x.x)
    Major,
    /// Minor version bump within the same major line
    Minor,
    /// Patch-level bump
    Patch,
    /// Versions are not comparable as strict X.Y.Z, or latest is not newer
    Unknown,
}

impl UpdateSeverity {
    /// Classifies the jump between two version strings.
    ///
    /// Pre-release suffixes are cut at the first `-` and leading `v`
    /// characters are stripped before comparison. Anything that does not
    /// reduce to a strict X.Y.Z pair classifies as `Unknown`, as does a
    /// latest version that is not actually newer than the current one.
    pub fn classify(current: &str, latest: &str) -> UpdateSeverity {
        let (current, latest) = match (parse_release(current), parse_release(latest)) {
            (Some(current), Some(latest)) => (current, latest),
            _ => return UpdateSeverity::Unknown,
        };

        if latest <= current {
            return UpdateSeverity::Unknown;
        }
        if latest.major != current.major {
            return UpdateSeverity::Major;
        }
        if latest.minor != current.minor {
            return UpdateSeverity::Minor;
        }
        UpdateSeverity::Patch
    }

    /// Returns the lowercase label for this severity
    pub fn label(&self) -> &'static str {
        match self {
            UpdateSeverity::Major => "major",
            UpdateSeverity::Minor => "minor",
            UpdateSeverity::Patch => "patch",
            UpdateSeverity::Unknown => "unknown",
        }
    }

    /// Returns the tracker priority name assigned to this severity
    pub fn priority_name(&self) -> &'static str {
        match self {
            UpdateSeverity::Major => "Emergency",
            UpdateSeverity::Minor => "High",
            UpdateSeverity::Patch => "Medium",
            UpdateSeverity::Unknown => "Low",
        }
    }
}

impl fmt::Display for UpdateSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parses a version string down to its bare release triple
fn parse_release(version: &str) -> Option<Version> {
    let base = version.split('-').next().unwrap_or(version);
    let base = base.trim_start_matches('v');
    Version::parse(base)
        .ok()
        .filter(|v| v.pre.is_empty() && v.build.is_empty())
}
