//! Operator-facing instructions and credential prompts

use crate::config::SetupConfig;
use crate::error::{SetupError, SetupResult};
use console::Term;
use dialoguer::Input;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

const BANNER_WIDTH: usize = 60;
pub const BANNER_TITLE: &str = "Productivity Monkey OAuth Setup";
pub const CLIENT_ID_PROMPT: &str = "Enter Client ID: ";
pub const CLIENT_SECRET_PROMPT: &str = "Enter Client Secret: ";

/// Client ID and secret pasted by the operator.
pub struct OAuthCredentials {
    client_id: String,
    client_secret: SecretString,
}

impl OAuthCredentials {
    /// Trims both values. Either one blank means the run cannot continue.
    pub fn new(client_id: &str, client_secret: &str) -> SetupResult<Self> {
        let client_id = client_id.trim();
        let client_secret = client_secret.trim();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(SetupError::MissingCredentials);
        }
        Ok(Self {
            client_id: client_id.to_string(),
            client_secret: SecretString::new(client_secret.to_string()),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Source of one line of operator input per call.
pub trait CredentialPrompter {
    fn prompt(&mut self, label: &str) -> io::Result<String>;
}

/// Interactive prompt on the controlling terminal.
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialPrompter for TerminalPrompter {
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        // dialoguer appends its own ": "
        let label = label.trim_end().trim_end_matches(':');
        Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(io::Error::other)
    }
}

/// Which prompter suits the current stdio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrompterKind {
    Terminal,
    Line,
}

/// dialoguer needs a terminal on both ends; anything redirected reads lines.
pub fn prompter_kind(stdin_is_terminal: bool, stdout_is_terminal: bool) -> PrompterKind {
    if stdin_is_terminal && stdout_is_terminal {
        PrompterKind::Terminal
    } else {
        PrompterKind::Line
    }
}

/// Prompter for the process's own stdin/stdout. Stderr plays no part.
pub fn stdio_prompter() -> Box<dyn CredentialPrompter> {
    let stdin = io::stdin();
    match prompter_kind(stdin.is_terminal(), io::stdout().is_terminal()) {
        PrompterKind::Terminal => Box::new(TerminalPrompter::new()),
        PrompterKind::Line => Box::new(LinePrompter::new(stdin.lock(), io::stdout())),
    }
}

/// Plain line reader for piped stdin and tests.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> CredentialPrompter for LinePrompter<R, W> {
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        // EOF leaves the line empty, which the caller treats as missing
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Ask for the client ID then the client secret. No retries.
pub fn read_credentials(prompter: &mut dyn CredentialPrompter) -> SetupResult<OAuthCredentials> {
    let client_id = prompter.prompt(CLIENT_ID_PROMPT).map_err(SetupError::Prompt)?;
    let client_secret = prompter
        .prompt(CLIENT_SECRET_PROMPT)
        .map_err(SetupError::Prompt)?;
    OAuthCredentials::new(&client_id, &client_secret)
}

pub fn render_banner() -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("{rule}\n{BANNER_TITLE}\n{rule}\n")
}

/// Instructions for creating the OAuth client by hand in the console.
pub fn render_instructions(config: &SetupConfig) -> String {
    let mut text = String::new();
    text.push_str("Creating OAuth 2.0 credentials...\n");
    text.push_str(&format!("Project: {}\n", config.project_id));
    text.push_str(&format!("Redirect URI: {}\n", config.redirect_uri));
    text.push('\n');
    text.push_str("⚠️  Google Cloud doesn't provide a public API to create OAuth web clients.\n");
    text.push_str("You need to create the credentials manually via Cloud Console:\n");
    text.push('\n');
    text.push_str(&format!("🔗 {}\n", config.console_url()));
    text.push('\n');
    text.push_str("Configuration:\n");
    text.push_str("  - Type: OAuth client ID\n");
    text.push_str("  - Application type: Web application\n");
    text.push_str(&format!("  - Name: {}\n", config.client_name));
    text.push_str(&format!(
        "  - Authorized redirect URIs: {}\n",
        config.redirect_uri
    ));
    text.push('\n');
    text.push_str("After creating, paste the Client ID and Client Secret below:\n");
    text.push('\n');
    text
}
