//! depjira - Outdated dependency scanner with Jira ticket reconciliation
//!
//! This library scans a dependency manifest for outdated packages and
//! reconciles each one against a Jira project, creating at most one
//! ticket per update. Supported ecosystems:
//! - Composer (composer.json)
//! - npm (package.json)
//! - pip (requirements.txt)

pub mod cli;
pub mod command;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod tracker;
