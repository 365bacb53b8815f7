//! End-to-end tests for the depjira CLI
//!
//! These tests verify:
//! - Configuration validation and error reporting on stderr
//! - Full scan runs against fake package manager tools on PATH
//! - JSON output schema and exit codes

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the binary reads, scrubbed for determinism
const SCAN_ENV_VARS: &[&str] = &[
    "DEPENDENCY_FILE",
    "GITHUB_WORKSPACE",
    "JIRA_URL",
    "JIRA_USER_EMAIL",
    "JIRA_API_TOKEN",
    "JIRA_PROJECT_KEY",
    "JIRA_ISSUE_TYPE",
    "DRY_RUN",
    "PACKAGES",
    "RUST_LOG",
    "RUNNER_DEBUG",
];

/// Command for the depjira binary with a scrubbed environment
fn depjira() -> Command {
    let mut cmd = Command::cargo_bin("depjira").expect("Binary should build");
    for var in SCAN_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a project directory containing the named manifest
fn project_with_manifest(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join(name);
    fs::write(&path, "{}").expect("Failed to write manifest");
    (dir, path)
}

/// npm outdated listing used by the fake tool
fn npm_listing() -> &'static str {
    r#"{
  "react": {
    "current": "17.0.2",
    "wanted": "17.0.2",
    "latest": "18.3.1",
    "location": "node_modules/react"
  },
  "lodash": {
    "current": "4.17.20",
    "wanted": "4.17.21",
    "latest": "4.17.21",
    "location": "node_modules/lodash"
  }
}"#
}

/// Install a fake package manager executable into `dir`
#[cfg(unix)]
fn install_fake_tool(dir: &Path, name: &str, stdout: &str, code: i32) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\ncat <<'LISTING'\n{}\nLISTING\nexit {}\n",
        stdout, code
    );
    fs::write(&path, script).expect("Failed to write fake tool");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to mark fake tool executable");
}

/// PATH value with `dir` resolved before the real tools
#[cfg(unix)]
fn path_with(dir: &Path) -> String {
    let current = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", dir.display(), current)
}

mod cli_basics {
    use super::*;

    /// Test that help succeeds and documents the main options
    #[test]
    fn test_help_succeeds() {
        depjira()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--dry-run"))
            .stdout(predicate::str::contains("--packages"))
            .stdout(predicate::str::contains("--jira-url"));
    }

    /// Test that version succeeds and names the binary
    #[test]
    fn test_version_succeeds() {
        depjira()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("depjira"));
    }

    /// Test that a run without a dependency file fails with a clear message
    #[test]
    fn test_missing_dependency_file_fails() {
        depjira()
            .arg("--dry-run")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("DEPENDENCY_FILE"));
    }
}

mod manifest_validation {
    use super::*;

    /// Test that a nonexistent manifest path fails
    #[test]
    fn test_nonexistent_manifest_fails() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");

        depjira()
            .arg("--dry-run")
            .arg(dir.path().join("package.json"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("not found"));
    }

    /// Test that a directory in place of a manifest fails
    #[test]
    fn test_directory_as_manifest_fails() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");

        depjira()
            .arg("--dry-run")
            .arg(dir.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("not a regular file"));
    }

    /// Test that an unrecognized manifest filename fails
    #[test]
    fn test_unsupported_manifest_fails() {
        let (_dir, manifest) = project_with_manifest("deps.lock");

        depjira()
            .arg("--dry-run")
            .arg(&manifest)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("unsupported dependency file"));
    }

    /// Test that a relative manifest resolves against the workspace option
    #[test]
    fn test_workspace_resolves_relative_manifest() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");

        depjira()
            .args(["--dry-run", "--workspace"])
            .arg(dir.path())
            .arg("package.json")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("not found"))
            .stderr(predicate::str::contains("package.json"));
    }
}

mod credential_validation {
    use super::*;

    /// Test that a live run refuses to start without tracker settings
    #[test]
    fn test_live_run_requires_tracker_settings() {
        let (_dir, manifest) = project_with_manifest("package.json");

        depjira()
            .arg(&manifest)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("JIRA_URL"));
    }

    /// Test that the first missing setting is the one reported
    #[test]
    fn test_partial_tracker_settings_name_missing_one() {
        let (_dir, manifest) = project_with_manifest("package.json");

        depjira()
            .env("JIRA_URL", "https://example.atlassian.net")
            .env("JIRA_USER_EMAIL", "bot@example.com")
            .env("JIRA_PROJECT_KEY", "OPS")
            .arg(&manifest)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("JIRA_API_TOKEN"));
    }

    /// Test that DRY_RUN=false from the environment still requires settings
    #[test]
    fn test_falsey_dry_run_env_requires_settings() {
        let (_dir, manifest) = project_with_manifest("package.json");

        depjira()
            .env("DRY_RUN", "false")
            .arg(&manifest)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("JIRA_URL"));
    }
}

#[cfg(unix)]
mod scan_runs {
    use super::*;

    /// Test a dry run against a fake npm producing outdated packages
    #[test]
    fn test_dry_run_reports_would_create() {
        let (_project, manifest) = project_with_manifest("package.json");
        let tools = tempfile::tempdir().expect("Failed to create tools directory");
        // npm outdated exits 1 when outdated packages exist
        install_fake_tool(tools.path(), "npm", npm_listing(), 1);

        let assert = depjira()
            .env("PATH", path_with(tools.path()))
            .args(["--dry-run", "--json"])
            .arg(&manifest)
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON");

        assert_eq!(json["dry_run"], true);
        assert_eq!(json["ecosystem"], "npm");
        assert_eq!(json["packages"]["react"]["status"], "dry_run_would_create");
        assert!(json["packages"]["react"]["ticket_key"].is_null());
        assert_eq!(json["summary"]["would_create"], 2);
        assert_eq!(json["summary"]["created"], 0);
    }

    /// Test the text report of a dry run
    #[test]
    fn test_dry_run_text_report() {
        let (_project, manifest) = project_with_manifest("package.json");
        let tools = tempfile::tempdir().expect("Failed to create tools directory");
        install_fake_tool(tools.path(), "npm", npm_listing(), 1);

        depjira()
            .env("PATH", path_with(tools.path()))
            .arg("--dry-run")
            .arg(&manifest)
            .assert()
            .success()
            .stdout(predicate::str::contains("(dry-run)"))
            .stdout(predicate::str::contains("react"))
            .stdout(predicate::str::contains("outdated"));
    }

    /// Test that DRY_RUN=true from the environment enables dry-run mode
    #[test]
    fn test_dry_run_env_variable() {
        let (_project, manifest) = project_with_manifest("package.json");
        let tools = tempfile::tempdir().expect("Failed to create tools directory");
        install_fake_tool(tools.path(), "npm", npm_listing(), 1);

        let assert = depjira()
            .env("PATH", path_with(tools.path()))
            .env("DRY_RUN", "true")
            .arg("--json")
            .arg(&manifest)
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON");
        assert_eq!(json["dry_run"], true);
    }

    /// Test that an up-to-date project produces an empty report
    #[test]
    fn test_empty_listing_reports_nothing_outdated() {
        let (_project, manifest) = project_with_manifest("package.json");
        let tools = tempfile::tempdir().expect("Failed to create tools directory");
        install_fake_tool(tools.path(), "npm", "{}", 0);

        let assert = depjira()
            .env("PATH", path_with(tools.path()))
            .args(["--dry-run", "--json"])
            .arg(&manifest)
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON");
        assert_eq!(json["summary"]["outdated"], 0);
        assert!(json["packages"].as_object().unwrap().is_empty());
    }

    /// Test the package filter from the PACKAGES environment variable
    #[test]
    fn test_packages_env_filters_reconciliation() {
        let (_project, manifest) = project_with_manifest("package.json");
        let tools = tempfile::tempdir().expect("Failed to create tools directory");
        install_fake_tool(tools.path(), "npm", npm_listing(), 1);

        let assert = depjira()
            .env("PATH", path_with(tools.path()))
            .env("PACKAGES", "react")
            .args(["--dry-run", "--json"])
            .arg(&manifest)
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON");
        assert_eq!(json["packages"]["react"]["status"], "dry_run_would_create");
        assert_eq!(json["packages"]["lodash"]["status"], "filtered_out");
        assert_eq!(json["summary"]["filtered"], 1);
    }

    /// Test a pip scan through the requirements.txt manifest
    #[test]
    fn test_pip_scan() {
        let (_project, manifest) = project_with_manifest("requirements.txt");
        let tools = tempfile::tempdir().expect("Failed to create tools directory");
        let listing = r#"[
  {"name": "requests", "version": "2.28.0", "latest_version": "2.32.0", "latest_filetype": "wheel"}
]"#;
        install_fake_tool(tools.path(), "pip", listing, 0);

        let assert = depjira()
            .env("PATH", path_with(tools.path()))
            .args(["--dry-run", "--json"])
            .arg(&manifest)
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON");
        assert_eq!(json["ecosystem"], "pip");
        assert_eq!(json["packages"]["requests"]["severity"], "minor");
    }

    /// Test that a failing listing command exits with code 1
    #[test]
    fn test_listing_failure_is_fatal() {
        let (_project, manifest) = project_with_manifest("composer.json");
        let tools = tempfile::tempdir().expect("Failed to create tools directory");
        install_fake_tool(tools.path(), "composer", "", 2);

        depjira()
            .env("PATH", path_with(tools.path()))
            .arg("--dry-run")
            .arg(&manifest)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("composer"));
    }

    /// Test that an unreachable tracker yields exit code 2 and error statuses
    #[test]
    fn test_unreachable_tracker_exits_with_partial_failure() {
        let (_project, manifest) = project_with_manifest("package.json");
        let tools = tempfile::tempdir().expect("Failed to create tools directory");
        install_fake_tool(tools.path(), "npm", npm_listing(), 1);

        let assert = depjira()
            .env("PATH", path_with(tools.path()))
            .env("JIRA_URL", "http://127.0.0.1:1")
            .env("JIRA_USER_EMAIL", "bot@example.com")
            .env("JIRA_API_TOKEN", "token")
            .env("JIRA_PROJECT_KEY", "OPS")
            .arg("--json")
            .arg(&manifest)
            .assert()
            .code(2);

        let json: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON");
        assert_eq!(json["packages"]["react"]["status"], "processing_error");
        assert!(json["packages"]["react"]["ticket_key"].is_null());
        assert_eq!(json["summary"]["errors"], 2);
        assert_eq!(json["summary"]["created"], 0);
    }
}
