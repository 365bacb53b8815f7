//! Ecosystem type definitions for supported package managers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported package manager ecosystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// PHP ecosystem (composer.json)
    Composer,
    /// Node.js ecosystem (package.json)
    Npm,
    /// Python ecosystem (requirements.txt)
    Pip,
}

impl Ecosystem {
    /// Returns the manifest filename for this ecosystem
    pub fn manifest_filename(&self) -> &'static str {
        match self {
            Ecosystem::Composer => "composer.json",
            Ecosystem::Npm => "package.json",
            Ecosystem::Pip => "requirements.txt",
        }
    }

    /// Resolves an ecosystem from the basename of a manifest file
    pub fn from_manifest_filename(filename: &str) -> Option<Ecosystem> {
        Ecosystem::all()
            .iter()
            .find(|eco| eco.manifest_filename() == filename)
            .copied()
    }

    /// Returns the package manager name for this ecosystem
    pub fn name(&self) -> &'static str {
        match self {
            Ecosystem::Composer => "composer",
            Ecosystem::Npm => "npm",
            Ecosystem::Pip => "pip",
        }
    }

    /// Returns the capitalized name used in ticket summaries
    pub fn summary_label(&self) -> &'static str {
        match self {
            Ecosystem::Composer => "Composer",
            Ecosystem::Npm => "Npm",
            Ecosystem::Pip => "Pip",
        }
    }

    /// Returns the command that lists outdated packages for this ecosystem
    pub fn listing_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Ecosystem::Composer => ("composer", &["outdated", "--format=json"]),
            Ecosystem::Npm => ("npm", &["outdated", "--json"]),
            Ecosystem::Pip => ("pip", &["list", "--outdated", "--format=json"]),
        }
    }

    /// Returns all supported ecosystems
    pub fn all() -> &'static [Ecosystem] {
        &[Ecosystem::Composer, Ecosystem::Npm, Ecosystem::Pip]
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
