//! pip outdated listing parser
//!
//! Handles `pip list --outdated --format=json` output:
//! - a JSON array of `{name, version, latest_version}` objects
//! - empty output means nothing is outdated
//! - malformed JSON or a non-array payload is a hard error
//! - items with missing fields are dropped individually

use crate::domain::{Dependency, Ecosystem};
use crate::error::ParseError;
use crate::parser::OutdatedParser;
use serde_json::Value;

/// Parser for pip outdated listings
pub struct PipOutdatedParser;

impl OutdatedParser for PipOutdatedParser {
    fn parse(&self, raw: &str) -> Result<Vec<Dependency>, ParseError> {
        if raw.trim().is_empty() {
            tracing::info!("pip output is empty, assuming no outdated packages");
            return Ok(Vec::new());
        }

        let data: Value = serde_json::from_str(raw)
            .map_err(|e| ParseError::malformed_json(Ecosystem::Pip, e.to_string()))?;

        let Some(items) = data.as_array() else {
            return Err(ParseError::unexpected_shape(
                Ecosystem::Pip,
                "expected a JSON array",
            ));
        };

        let mut dependencies = Vec::new();
        for item in items {
            let name = item.get("name").and_then(Value::as_str);
            let current = item.get("version").and_then(Value::as_str);
            let latest = item.get("latest_version").and_then(Value::as_str);
            let (Some(name), Some(current), Some(latest)) = (name, current, latest) else {
                tracing::warn!("skipping pip item with missing fields: {}", item);
                continue;
            };

            dependencies.push(Dependency::new(name, current, latest, Ecosystem::Pip));
        }

        Ok(dependencies)
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pip
    }
}
