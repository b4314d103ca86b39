//! Productivity Monkey OAuth setup
//!
//! Walks an operator through creating the server's Google OAuth client by
//! hand, then writes the credentials and a fresh JWT secret to `.env`.

pub mod cli;
pub mod config;
pub mod env_file;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod secret;
pub mod setup;
pub mod token;

pub use config::SetupConfig;
pub use error::{ErrorCategory, SetupError, SetupResult};
pub use prompt::{CredentialPrompter, LinePrompter, OAuthCredentials, TerminalPrompter};
pub use secret::{generate_signing_secret, SigningSecret};
pub use setup::{render_summary, run_setup, SetupReport};
pub use token::{fetch_access_token, AccessToken, TokenCommand, TokenSource};
