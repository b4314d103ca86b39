//! Bearer token acquisition
//!
//! The token comes from an already-authenticated external CLI
//! (`gcloud auth print-access-token`). Nothing here talks to Google directly.

use crate::config::{GCLOUD_BIN, GCLOUD_TOKEN_ARGS};
use crate::error::{SetupError, SetupResult};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::process::Command;
use tracing::{debug, warn};

/// Short-lived bearer token printed by the external CLI.
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Anything able to hand out a bearer token.
pub trait TokenSource {
    fn access_token(&self) -> SetupResult<AccessToken>;
}

/// External program plus fixed arguments whose stdout is the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TokenCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `gcloud auth print-access-token`
    pub fn gcloud() -> Self {
        Self::new(GCLOUD_BIN, GCLOUD_TOKEN_ARGS)
    }

    /// Command line as shown to the operator.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TokenSource for TokenCommand {
    fn access_token(&self) -> SetupResult<AccessToken> {
        fetch_access_token(self)
    }
}

/// Run the token command and return its trimmed stdout.
pub fn fetch_access_token(command: &TokenCommand) -> SetupResult<AccessToken> {
    let program = which::which(&command.program).map_err(|source| {
        SetupError::TokenCommandNotFound {
            command: command.program.clone(),
            source,
        }
    })?;
    debug!(program = %program.display(), "Resolved token command");

    let output = Command::new(&program)
        .args(&command.args)
        .output()
        .map_err(|source| SetupError::TokenCommandSpawn {
            command: command.display(),
            source,
        })?;

    if !output.status.success() {
        return Err(SetupError::TokenCommandFailed {
            command: command.display(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let token = AccessToken::new(String::from_utf8_lossy(&output.stdout).trim());
    if token.is_empty() {
        warn!(command = %command.display(), "Token command printed nothing");
    } else {
        debug!("Access token acquired");
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        assert_eq!(TokenCommand::gcloud().display(), "gcloud auth print-access-token");
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = AccessToken::new("ya29.secret");
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("ya29"));
        assert_eq!(token.expose(), "ya29.secret");
    }

    #[test]
    fn missing_program_is_not_found() {
        let command = TokenCommand::new("prodmon-no-such-binary-3f9a", Vec::<String>::new());
        match fetch_access_token(&command) {
            Err(SetupError::TokenCommandNotFound { command, .. }) => {
                assert_eq!(command, "prodmon-no-such-binary-3f9a");
            }
            other => panic!("expected TokenCommandNotFound, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn stdout_is_trimmed() {
        let command = TokenCommand::new("sh", ["-c", "printf '  ya29.abc \\n'"]);
        let token = fetch_access_token(&command).expect("token");
        assert_eq!(token.expose(), "ya29.abc");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_stderr() {
        let command = TokenCommand::new("sh", ["-c", "echo 'not logged in' >&2; exit 1"]);
        match fetch_access_token(&command) {
            Err(SetupError::TokenCommandFailed { status, stderr, .. }) => {
                assert_eq!(status.code(), Some(1));
                assert_eq!(stderr, "not logged in");
            }
            other => panic!("expected TokenCommandFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn empty_stdout_is_accepted() {
        let command = TokenCommand::new("true", Vec::<String>::new());
        let token = fetch_access_token(&command).expect("token");
        assert!(token.is_empty());
    }
}
