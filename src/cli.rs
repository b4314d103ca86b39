//! Command line definition
//!
//! The program takes no options of its own; clap contributes `--help` and
//! `--version`.

use clap::Parser;
use std::ffi::OsString;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "prodmon-oauth-setup",
    version,
    about = "Create the Productivity Monkey OAuth client and write .env",
    long_about = "Fetches a token with 'gcloud auth print-access-token', walks you through \
creating an OAuth 2.0 web client in the Google Cloud console, then writes the pasted \
Client ID and Client Secret together with a fresh JWT secret to ./.env (overwriting it)."
)]
pub struct Cli {}

impl Cli {
    pub fn parse_command() -> Self {
        Self::parse()
    }

    pub fn try_parse_command_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}
