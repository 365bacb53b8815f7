//! Core domain models for depjira
//!
//! This module contains the fundamental types used throughout the application:
//! - Ecosystem types for supported package managers
//! - Outdated dependency structures
//! - Update severity classification
//! - Reconciliation outcomes and run reports

mod dependency;
mod ecosystem;
mod outcome;
mod severity;

pub use dependency::Dependency;
pub use ecosystem::Ecosystem;
pub use outcome::{ReconciliationOutcome, ReportEntry, RunReport};
pub use severity::UpdateSeverity;
