//! Outdated listing parsers for supported package managers
//!
//! This module provides parsers for the machine-readable output of:
//! - `composer outdated --format=json`
//! - `npm outdated --json`
//! - `pip list --outdated --format=json`

mod composer;
mod npm;
mod pip;

pub use composer::ComposerOutdatedParser;
pub use npm::NpmOutdatedParser;
pub use pip::PipOutdatedParser;

use crate::domain::{Dependency, Ecosystem};
use crate::error::ParseError;

/// Trait for parsing outdated-package listing output
pub trait OutdatedParser {
    /// Parses raw listing output into outdated dependencies.
    ///
    /// Individual malformed entries are dropped, never escalated; a
    /// `ParseError` means the listing as a whole is untrustworthy.
    fn parse(&self, raw: &str) -> Result<Vec<Dependency>, ParseError>;

    /// Returns the ecosystem this parser handles
    fn ecosystem(&self) -> Ecosystem;
}

/// Get a parser for the specified ecosystem
pub fn get_parser(ecosystem: Ecosystem) -> Box<dyn OutdatedParser> {
    match ecosystem {
        Ecosystem::Composer => Box::new(ComposerOutdatedParser),
        Ecosystem::Npm => Box::new(NpmOutdatedParser),
        Ecosystem::Pip => Box::new(PipOutdatedParser),
    }
}
