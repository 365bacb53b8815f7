//! External command execution
//!
//! This module provides:
//! - CommandOutput capturing both streams and the exit status
//! - CommandRunner trait so callers can swap in test doubles
//! - SystemCommandRunner backed by tokio::process with a timeout

use crate::error::CommandError;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default timeout for package manager commands (5 minutes)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Captured result of a finished command.
///
/// A non-zero exit is not an error at this layer: listing commands
/// routinely exit non-zero when outdated packages exist, so the policy
/// of what counts as failure belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Whether the process exited with status zero
    pub success: bool,
}

impl CommandOutput {
    /// Creates a new command output
    pub fn new(
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        code: Option<i32>,
        success: bool,
    ) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            code,
            success,
        }
    }

    /// Returns stdout with surrounding whitespace removed
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.trim()
    }
}

/// Trait for executing external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs a program with arguments in the given working directory
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError>;
}

/// Command runner backed by real subprocesses
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    /// Creates a runner with the default timeout
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom execution timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError> {
        if !working_dir.is_dir() {
            return Err(CommandError::directory_not_found(working_dir));
        }

        tracing::debug!(
            "executing '{} {}' in {}",
            program,
            args.join(" "),
            working_dir.display()
        );

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let result = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| CommandError::timeout(program, self.timeout.as_secs()))?
            .map_err(|e| CommandError::launch_failed(program, e))?;

        let output = CommandOutput {
            stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            code: result.status.code(),
            success: result.status.success(),
        };

        tracing::debug!(
            "'{}' exited with code {:?}, {} bytes on stdout",
            program,
            output.code,
            output.stdout.len()
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_command_output_new() {
        let output = CommandOutput::new("out", "err", Some(0), true);
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "err");
        assert_eq!(output.code, Some(0));
        assert!(output.success);
    }

    #[test]
    fn test_trimmed_stdout() {
        let output = CommandOutput::new("  {}\n", "", Some(0), true);
        assert_eq!(output.trimmed_stdout(), "{}");

        let output = CommandOutput::new("\n  \t", "", Some(0), true);
        assert_eq!(output.trimmed_stdout(), "");
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = SystemCommandRunner::new();
        let dir = std::env::temp_dir();
        let output = runner.run("echo", &["hello"], &dir).await.unwrap();

        assert!(output.success);
        assert_eq!(output.code, Some(0));
        assert_eq!(output.trimmed_stdout(), "hello");
    }

    #[tokio::test]
    async fn test_run_captures_stderr_and_exit_code() {
        let runner = SystemCommandRunner::new();
        let dir = std::env::temp_dir();
        let output = runner
            .run("sh", &["-c", "echo oops >&2; exit 3"], &dir)
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert!(output.stderr.contains("oops"));
        assert!(output.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_run_missing_working_directory() {
        let runner = SystemCommandRunner::new();
        let dir = PathBuf::from("/nonexistent/working/dir");
        let err = runner.run("echo", &["hello"], &dir).await.unwrap_err();

        assert!(matches!(err, CommandError::DirectoryNotFound { .. }));
    }

    #[tokio::test]
    async fn test_run_nonexistent_program() {
        let runner = SystemCommandRunner::new();
        let dir = std::env::temp_dir();
        let err = runner
            .run("definitely-not-a-real-program-zzz", &[], &dir)
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::LaunchFailed { .. }));
    }

    #[tokio::test]
    async fn test_run_timeout() {
        let runner = SystemCommandRunner::new().with_timeout(Duration::from_millis(50));
        let dir = std::env::temp_dir();
        let err = runner.run("sleep", &["5"], &dir).await.unwrap_err();

        assert!(matches!(err, CommandError::Timeout { .. }));
    }
}
