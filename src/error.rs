//! Error handling for the setup run
//!
//! Every failure the library can produce is a [`SetupError`]. The binary
//! turns it into a console message and an exit code.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for the setup run
#[derive(Error, Debug)]
pub enum SetupError {
    /// The token command is not on PATH
    #[error("Token command '{command}' not found in PATH")]
    TokenCommandNotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    /// The token command exists but could not be started
    #[error("Failed to run token command '{command}': {source}")]
    TokenCommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The token command ran and reported failure
    #[error("Token command '{command}' exited with {status}: {stderr}")]
    TokenCommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Client ID or secret left blank
    #[error("Client ID and Secret are required")]
    MissingCredentials,

    /// Reading from the operator failed
    #[error("Failed to read operator input: {0}")]
    Prompt(#[source] io::Error),

    /// Writing instructions or prompts to the console failed
    #[error("Failed to write to console: {0}")]
    Console(#[source] io::Error),

    /// The OS random source is unavailable
    #[error("Failed to gather random bytes: {0}")]
    Randomness(getrandom::Error),

    /// The env file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    WriteEnvFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Broad buckets used for messaging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Process,
    Validation,
    Filesystem,
    Resource,
}

impl SetupError {
    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            SetupError::TokenCommandNotFound { .. }
            | SetupError::TokenCommandSpawn { .. }
            | SetupError::TokenCommandFailed { .. } => ErrorCategory::Process,
            SetupError::MissingCredentials => ErrorCategory::Validation,
            SetupError::Prompt(_) | SetupError::Console(_) | SetupError::WriteEnvFile { .. } => {
                ErrorCategory::Filesystem
            }
            SetupError::Randomness(_) => ErrorCategory::Resource,
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Validation => 1,
            ErrorCategory::Process => 2,
            ErrorCategory::Filesystem | ErrorCategory::Resource => 3,
        }
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            SetupError::TokenCommandNotFound { command, .. } => format!(
                "'{}' is not installed or not on PATH. Install the Google Cloud SDK and run 'gcloud auth login'.",
                command
            ),
            SetupError::TokenCommandSpawn { command, source } => {
                format!("Could not start '{}': {}", command, source)
            }
            SetupError::TokenCommandFailed {
                command, stderr, ..
            } => {
                if stderr.is_empty() {
                    format!("'{}' failed. Are you logged in? Try 'gcloud auth login'.", command)
                } else {
                    format!("'{}' failed: {}", command, stderr)
                }
            }
            SetupError::MissingCredentials => "Error: Client ID and Secret are required".to_string(),
            SetupError::Prompt(err) => format!("Could not read input: {}", err),
            SetupError::Console(err) => format!("Could not write to the console: {}", err),
            SetupError::Randomness(err) => format!("Could not generate the JWT secret: {}", err),
            SetupError::WriteEnvFile { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
        }
    }
}

pub type SetupResult<T> = Result<T, SetupError>;
