//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Issues with run configuration and the dependency file
//! - CommandError: Package manager subprocess failures
//! - ParseError: Hard failures decoding listing output
//! - TrackerError: Issues with issue tracker communication

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Ecosystem;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Subprocess related errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Listing output parse errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Issue tracker related errors
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Errors related to run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting is absent
    #[error("missing required setting: {name}")]
    MissingSetting { name: String },

    /// Dependency file does not exist
    #[error("dependency file not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Dependency file path exists but is not a regular file
    #[error("dependency file is not a regular file: {path}")]
    ManifestNotAFile { path: PathBuf },

    /// Dependency file exists but cannot be opened
    #[error("dependency file is not readable: {path}: {source}")]
    ManifestNotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dependency file name maps to no supported ecosystem
    #[error(
        "unsupported dependency file: {path} (expected composer.json, package.json, or requirements.txt)"
    )]
    UnsupportedManifest { path: PathBuf },
}

/// Errors related to running package manager commands
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started
    #[error("failed to launch '{program}': {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but signalled a hard failure
    #[error("'{program}' command failed: {message}")]
    Failed { program: String, message: String },

    /// The program exceeded the execution timeout
    #[error("'{program}' timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },

    /// The working directory for the command does not exist
    #[error("working directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The program produced no usable output
    #[error("no output received from '{program}'")]
    EmptyOutput { program: String },
}

/// Hard failures decoding listing output
#[derive(Error, Debug)]
pub enum ParseError {
    /// Output is not valid JSON
    #[error("failed to parse {ecosystem} listing output: {message}")]
    MalformedJson {
        ecosystem: Ecosystem,
        message: String,
    },

    /// Output is valid JSON but not the expected shape
    #[error("unexpected {ecosystem} listing output: {message}")]
    UnexpectedShape {
        ecosystem: Ecosystem,
        message: String,
    },
}

/// Errors related to issue tracker communication
#[derive(Error, Debug)]
pub enum TrackerError {
    /// HTTP client construction failed
    #[error("failed to create HTTP client: {message}")]
    Client { message: String },

    /// Transport-level request failure
    #[error("tracker request failed: {message}")]
    Request { message: String },

    /// Tracker answered with a non-success status
    #[error("tracker returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Tracker response body could not be decoded
    #[error("invalid tracker response: {message}")]
    InvalidResponse { message: String },

    /// Creation succeeded but no issue key came back
    #[error("tracker response did not contain an issue key")]
    MissingKey,
}

impl ConfigError {
    /// Creates a new MissingSetting error
    pub fn missing_setting(name: impl Into<String>) -> Self {
        ConfigError::MissingSetting { name: name.into() }
    }

    /// Creates a new ManifestNotFound error
    pub fn manifest_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::ManifestNotFound { path: path.into() }
    }

    /// Creates a new ManifestNotAFile error
    pub fn manifest_not_a_file(path: impl Into<PathBuf>) -> Self {
        ConfigError::ManifestNotAFile { path: path.into() }
    }

    /// Creates a new ManifestNotReadable error
    pub fn manifest_not_readable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ManifestNotReadable {
            path: path.into(),
            source,
        }
    }

    /// Creates a new UnsupportedManifest error
    pub fn unsupported_manifest(path: impl Into<PathBuf>) -> Self {
        ConfigError::UnsupportedManifest { path: path.into() }
    }
}

impl CommandError {
    /// Creates a new LaunchFailed error
    pub fn launch_failed(program: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::LaunchFailed {
            program: program.into(),
            source,
        }
    }

    /// Creates a new Failed error
    pub fn failed(program: impl Into<String>, message: impl Into<String>) -> Self {
        CommandError::Failed {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(program: impl Into<String>, seconds: u64) -> Self {
        CommandError::Timeout {
            program: program.into(),
            seconds,
        }
    }

    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        CommandError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new EmptyOutput error
    pub fn empty_output(program: impl Into<String>) -> Self {
        CommandError::EmptyOutput {
            program: program.into(),
        }
    }
}

impl ParseError {
    /// Creates a new MalformedJson error
    pub fn malformed_json(ecosystem: Ecosystem, message: impl Into<String>) -> Self {
        ParseError::MalformedJson {
            ecosystem,
            message: message.into(),
        }
    }

    /// Creates a new UnexpectedShape error
    pub fn unexpected_shape(ecosystem: Ecosystem, message: impl Into<String>) -> Self {
        ParseError::UnexpectedShape {
            ecosystem,
            message: message.into(),
        }
    }
}

impl TrackerError {
    /// Creates a new Client error
    pub fn client(message: impl Into<String>) -> Self {
        TrackerError::Client {
            message: message.into(),
        }
    }

    /// Creates a new Request error
    pub fn request(message: impl Into<String>) -> Self {
        TrackerError::Request {
            message: message.into(),
        }
    }

    /// Creates a new Status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        TrackerError::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        TrackerError::InvalidResponse {
            message: message.into(),
        }
    }
}
