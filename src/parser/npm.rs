//! npm outdated listing parser
//!
//! Handles `npm outdated --json` output:
//! - a JSON object keyed by package name
//! - npm may print prose before the payload, so parsing starts at the
//!   first `{`
//! - entries without `current`/`latest`, and entries already at the
//!   latest version, are dropped
//! - malformed output degrades to an empty listing, never an error

use crate::domain::{Dependency, Ecosystem};
use crate::error::ParseError;
use crate::parser::OutdatedParser;
use serde_json::Value;

/// Parser for npm outdated listings
pub struct NpmOutdatedParser;

impl OutdatedParser for NpmOutdatedParser {
    fn parse(&self, raw: &str) -> Result<Vec<Dependency>, ParseError> {
        let Some(start) = raw.find('{') else {
            tracing::error!("could not find starting brace in npm output");
            return Ok(Vec::new());
        };

        let data: Value = match serde_json::from_str(&raw[start..]) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to decode npm JSON output: {}", e);
                return Ok(Vec::new());
            }
        };

        let Some(packages) = data.as_object() else {
            tracing::warn!("npm output is not a JSON object");
            return Ok(Vec::new());
        };

        let mut dependencies = Vec::new();
        for (name, details) in packages {
            if !details.is_object() {
                tracing::warn!("skipping non-object npm entry for '{}'", name);
                continue;
            }

            let current = details.get("current").and_then(Value::as_str);
            let latest = details.get("latest").and_then(Value::as_str);
            let (Some(current), Some(latest)) = (current, latest) else {
                tracing::debug!("skipping npm entry '{}' missing current/latest", name);
                continue;
            };
            if current == latest {
                continue;
            }

            dependencies.push(Dependency::new(name, current, latest, Ecosystem::Npm));
        }

        Ok(dependencies)
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }
}
