//! Composer outdated listing parser
//!
//! Handles `composer outdated --format=json` output:
//! - packages live under `locked` (newer composer) or `installed` (older)
//! - only entries whose `latest-status` flags an available update count
//! - incomplete entries are dropped individually
//! - malformed output degrades to an empty listing, never an error

use crate::domain::{Dependency, Ecosystem};
use crate::error::ParseError;
use crate::parser::OutdatedParser;
use serde_json::Value;

/// `latest-status` values that mark a package as outdated
const OUTDATED_STATUSES: &[&str] = &["update-possible", "semver-safe-update"];

/// Parser for composer outdated listings
pub struct ComposerOutdatedParser;

impl OutdatedParser for ComposerOutdatedParser {
    fn parse(&self, raw: &str) -> Result<Vec<Dependency>, ParseError> {
        let data: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to decode composer JSON output: {}", e);
                return Ok(Vec::new());
            }
        };

        let packages = match data.get("locked").or_else(|| data.get("installed")) {
            Some(Value::Array(packages)) => packages,
            _ => {
                tracing::warn!("composer output contains no 'locked' or 'installed' array");
                return Ok(Vec::new());
            }
        };

        let mut dependencies = Vec::new();
        for package in packages {
            let Some(status) = package.get("latest-status").and_then(Value::as_str) else {
                continue;
            };
            if !OUTDATED_STATUSES.contains(&status) {
                continue;
            }

            let name = package.get("name").and_then(Value::as_str).unwrap_or("");
            let current = package.get("version").and_then(Value::as_str).unwrap_or("");
            let latest = package.get("latest").and_then(Value::as_str).unwrap_or("");
            if name.is_empty() || current.is_empty() || latest.is_empty() {
                tracing::warn!("skipping incomplete composer package entry: {}", package);
                continue;
            }

            dependencies.push(Dependency::new(name, current, latest, Ecosystem::Composer));
        }

        Ok(dependencies)
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Composer
    }
}
