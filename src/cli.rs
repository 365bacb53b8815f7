//! CLI argument parsing module for depjira

use crate::error::ConfigError;
use clap::builder::FalseyValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Outdated dependency scanner with Jira ticket reconciliation
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depjira",
    version,
    about = "Outdated dependency scanner with Jira ticket reconciliation"
)]
pub struct CliArgs {
    /// Dependency manifest to scan (composer.json, package.json, or requirements.txt)
    #[arg(env = "DEPENDENCY_FILE")]
    pub dependency_file: Option<PathBuf>,

    /// Directory that relative manifest paths are resolved against
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    // Tracker options
    /// Jira site URL (e.g. https://example.atlassian.net)
    #[arg(long, env = "JIRA_URL")]
    pub jira_url: Option<String>,

    /// Jira account email for API authentication
    #[arg(long, env = "JIRA_USER_EMAIL")]
    pub jira_user: Option<String>,

    /// Jira API token
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub jira_token: Option<String>,

    /// Jira project key tickets are filed under
    #[arg(long, env = "JIRA_PROJECT_KEY")]
    pub project_key: Option<String>,

    /// Issue type for created tickets
    #[arg(long, env = "JIRA_ISSUE_TYPE", default_value = "Task")]
    pub issue_type: String,

    // General options
    /// Dry run mode - report tickets without creating them
    #[arg(short = 'n', long, env = "DRY_RUN", value_parser = FalseyValueParser::new())]
    pub dry_run: bool,

    /// Only process these packages (space-delimited)
    #[arg(long, env = "PACKAGES")]
    pub packages: Option<String>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Validated tracker connection settings
#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub url: String,
    pub user_email: String,
    pub api_token: String,
    pub project_key: String,
    pub issue_type: String,
}

impl CliArgs {
    /// Resolves the manifest path, applying the workspace prefix to
    /// relative paths
    pub fn manifest_path(&self) -> Result<PathBuf, ConfigError> {
        let Some(file) = &self.dependency_file else {
            return Err(ConfigError::missing_setting("DEPENDENCY_FILE"));
        };

        match &self.workspace {
            Some(workspace) => Ok(workspace.join(file)),
            None => Ok(file.clone()),
        }
    }

    /// Returns the tracker settings when fully configured.
    ///
    /// A dry run may proceed without credentials and yields `None`;
    /// otherwise every tracker setting is required.
    pub fn tracker_settings(&self) -> Result<Option<TrackerSettings>, ConfigError> {
        match (
            non_empty(&self.jira_url),
            non_empty(&self.jira_user),
            non_empty(&self.jira_token),
            non_empty(&self.project_key),
        ) {
            (Some(url), Some(user_email), Some(api_token), Some(project_key)) => {
                Ok(Some(TrackerSettings {
                    url: url.to_string(),
                    user_email: user_email.to_string(),
                    api_token: api_token.to_string(),
                    project_key: project_key.to_string(),
                    issue_type: self.issue_type.clone(),
                }))
            }
            _ if self.dry_run => Ok(None),
            _ => Err(ConfigError::missing_setting(self.first_missing_setting())),
        }
    }

    /// Returns the package allow-list, empty when unfiltered
    pub fn package_filter(&self) -> Vec<String> {
        self.packages
            .as_deref()
            .unwrap_or("")
            .split_whitespace()
            .map(String::from)
            .collect()
    }

    /// Check if a package should be processed based on the filter
    pub fn should_process_package(&self, name: &str) -> bool {
        let filter = self.package_filter();
        filter.is_empty() || filter.iter().any(|p| p == name)
    }

    fn first_missing_setting(&self) -> &'static str {
        if non_empty(&self.jira_url).is_none() {
            "JIRA_URL"
        } else if non_empty(&self.jira_user).is_none() {
            "JIRA_USER_EMAIL"
        } else if non_empty(&self.jira_token).is_none() {
            "JIRA_API_TOKEN"
        } else {
            "JIRA_PROJECT_KEY"
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
