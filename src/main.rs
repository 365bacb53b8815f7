//! depjira - Outdated dependency scanner with Jira ticket reconciliation
//!
//! This tool scans a dependency manifest for outdated packages and files
//! one Jira ticket per outdated package, skipping packages that already
//! have a matching ticket:
//! - Composer (composer.json)
//! - npm (package.json)
//! - pip (requirements.txt)

use clap::Parser;
use depjira::cli::CliArgs;
use depjira::orchestrator::Orchestrator;
use depjira::output::{create_formatter, OutputConfig};
use depjira::tracker::{JiraClient, OfflineTracker, TrackerClient};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = CliArgs::parse();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging on stderr, keeping stdout free for the report.
///
/// `RUST_LOG` takes precedence. Without it the level is `debug` when the
/// Actions runner has step debugging enabled (`RUNNER_DEBUG=1`), `info`
/// otherwise.
fn init_tracing() {
    let default_level = match std::env::var("RUNNER_DEBUG") {
        Ok(value) if value == "1" => "debug",
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    // Print run info in verbose mode
    if args.verbose {
        eprintln!("depjira v{}", env!("CARGO_PKG_VERSION"));
        if let Ok(path) = args.manifest_path() {
            eprintln!("Manifest: {}", path.display());
        }
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    // Pick the tracker client. Without full Jira settings a dry run still
    // works against the offline stand-in; a live run refuses to start.
    let tracker: Arc<dyn TrackerClient> = match args.tracker_settings()? {
        Some(settings) => Arc::new(JiraClient::new(
            &settings.url,
            &settings.user_email,
            &settings.api_token,
        )?),
        None => Arc::new(OfflineTracker),
    };

    // Create and run the orchestrator
    let orchestrator = Orchestrator::new(args.clone(), tracker);
    let report = orchestrator.run().await?;

    // Create output formatter based on CLI options
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    // Output the report
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Return appropriate exit code
    if report.has_errors() {
        // Partial success - some packages could not be reconciled
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
