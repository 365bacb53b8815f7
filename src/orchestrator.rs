//! Run orchestrator for coordinating the scan and reconciliation workflow
//!
//! This module provides:
//! - Workflow coordination: validate -> list -> parse -> reconcile
//! - Per-tool exit code and output tolerance
//! - Dry-run mode support
//! - Package filter application
//! - Error handling with partial continuation

use crate::cli::CliArgs;
use crate::command::{CommandOutput, CommandRunner, SystemCommandRunner};
use crate::domain::{Ecosystem, ReconciliationOutcome, ReportEntry, RunReport};
use crate::engine::ReconciliationEngine;
use crate::error::{AppError, CommandError, ConfigError};
use crate::parser::get_parser;
use crate::progress::Progress;
use crate::tracker::TrackerClient;
use std::path::Path;
use std::sync::Arc;

/// Orchestrator for coordinating the scan workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Issue tracker the scan reconciles against
    tracker: Arc<dyn TrackerClient>,
    /// Runner for package manager subprocesses
    runner: Box<dyn CommandRunner>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs, tracker: Arc<dyn TrackerClient>) -> Self {
        Self {
            args,
            tracker,
            runner: Box::new(SystemCommandRunner::new()),
        }
    }

    /// Create an orchestrator with a custom command runner (for testing)
    pub fn with_runner(
        args: CliArgs,
        tracker: Arc<dyn TrackerClient>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            args,
            tracker,
            runner,
        }
    }

    /// Run the scan workflow
    pub async fn run(&self) -> Result<RunReport, AppError> {
        self.run_with_progress(!self.args.quiet).await
    }

    /// Run the scan workflow with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<RunReport, AppError> {
        let mut progress = Progress::new(show_progress);

        // Step 1: Validate the manifest path
        let manifest = self.args.manifest_path()?;
        let ecosystem = validate_manifest(&manifest)?;
        tracing::info!(
            "scanning {} manifest at {}",
            ecosystem,
            manifest.display()
        );

        // Step 2: List outdated packages via the package manager
        progress.spinner(&format!("Listing outdated {} packages...", ecosystem));
        let listing = self.list_outdated(&manifest, ecosystem).await;
        progress.finish_and_clear();
        let listing = listing?;

        // Step 3: Parse the listing
        let parser = get_parser(ecosystem);
        let dependencies = parser.parse(&listing)?;
        tracing::info!("{} outdated package(s) reported", dependencies.len());

        // Step 4: Reconcile each dependency against the tracker
        let mut engine = ReconciliationEngine::new(
            self.tracker.clone(),
            self.args.project_key.clone().unwrap_or_default(),
            self.args.issue_type.clone(),
            self.args.dry_run,
        );

        let mut entries = Vec::with_capacity(dependencies.len());
        progress.start(dependencies.len() as u64, "Reconciling dependencies");

        for dependency in dependencies {
            progress.set_message(&format!("Checking {}", dependency.name));

            // The filter is applied before any tracker interaction
            let outcome = if self.args.should_process_package(&dependency.name) {
                engine.resolve(&dependency).await
            } else {
                tracing::debug!("package {} excluded by filter", dependency.name);
                ReconciliationOutcome::FilteredOut
            };

            entries.push(ReportEntry::new(dependency, outcome));
            progress.inc();
        }
        progress.finish_and_clear();

        Ok(RunReport::new(
            manifest.display().to_string(),
            ecosystem,
            self.args.dry_run,
            entries,
        ))
    }

    /// Runs the ecosystem's outdated listing in the manifest's directory
    async fn list_outdated(
        &self,
        manifest: &Path,
        ecosystem: Ecosystem,
    ) -> Result<String, AppError> {
        let dir = match manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let (program, args) = ecosystem.listing_command();
        let output = self.runner.run(program, args, dir).await?;
        let listing = effective_stdout(ecosystem, program, &output)?;
        Ok(listing)
    }
}

/// Checks the manifest path and maps its filename to an ecosystem
fn validate_manifest(path: &Path) -> Result<Ecosystem, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::manifest_not_found(path));
    }
    if !path.is_file() {
        return Err(ConfigError::manifest_not_a_file(path));
    }
    std::fs::File::open(path).map_err(|e| ConfigError::manifest_not_readable(path, e))?;

    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    Ecosystem::from_manifest_filename(filename)
        .ok_or_else(|| ConfigError::unsupported_manifest(path))
}

/// Applies each tool's exit code conventions to its captured output.
///
/// composer exits non-zero only on real failures. npm and pip exit
/// non-zero whenever outdated packages exist, so their output stays
/// usable unless the error stream shows an actual failure.
fn effective_stdout(
    ecosystem: Ecosystem,
    program: &str,
    output: &CommandOutput,
) -> Result<String, CommandError> {
    let stdout = output.trimmed_stdout();
    let stderr = output.stderr.trim();

    let effective = match ecosystem {
        Ecosystem::Composer => {
            if !output.success {
                return Err(CommandError::failed(program, describe_failure(output)));
            }
            stdout.to_string()
        }
        Ecosystem::Npm => {
            if !output.success && stderr.contains("code E404") {
                return Err(CommandError::failed(program, describe_failure(output)));
            }
            if !output.success && stdout.is_empty() && !stderr.is_empty() {
                return Err(CommandError::failed(program, describe_failure(output)));
            }
            if stdout.is_empty() && output.success {
                // No outdated packages: npm prints nothing
                "{}".to_string()
            } else {
                stdout.to_string()
            }
        }
        Ecosystem::Pip => {
            if !output.success && stdout.is_empty() && !stderr.is_empty() {
                return Err(CommandError::failed(program, describe_failure(output)));
            }
            if !stderr.is_empty() {
                tracing::warn!("{} wrote to stderr: {}", program, stderr);
            }
            if stdout.is_empty() && output.success {
                "[]".to_string()
            } else {
                stdout.to_string()
            }
        }
    };

    if effective.trim().is_empty() {
        return Err(CommandError::empty_output(program));
    }
    Ok(effective)
}

fn describe_failure(output: &CommandOutput) -> String {
    let code = output
        .code
        .map_or("signal".to_string(), |c| c.to_string());
    let stderr = output.stderr.trim();

    if stderr.is_empty() {
        format!("exit code {}", code)
    } else {
        format!("exit code {}: {}", code, stderr)
    }
}
