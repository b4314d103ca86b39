//! The setup run, start to finish
//!
//! Token first, then instructions, then the two prompts. Nothing touches the
//! filesystem until both credentials are present.

use crate::config::SetupConfig;
use crate::env_file::{parse_env_file, render_env_file, write_env_file};
use crate::error::{SetupError, SetupResult};
use crate::prompt::{read_credentials, render_instructions, CredentialPrompter};
use crate::secret::generate_signing_secret;
use crate::token::TokenSource;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

const CLIENT_ID_PREVIEW_CHARS: usize = 20;
const MASK: &str = "********************";
pub const NEXT_STEPS_COMMAND: &str = "npm run build:server && npm run server";

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub env_path: PathBuf,
    pub client_id: String,
    pub redirect_uri: String,
}

/// Run every step against the given collaborators.
///
/// `out` receives the instruction text; prompts go through `prompter`.
pub fn run_setup(
    config: &SetupConfig,
    tokens: &dyn TokenSource,
    prompter: &mut dyn CredentialPrompter,
    out: &mut dyn Write,
) -> SetupResult<SetupReport> {
    debug!(
        project = %config.project_id,
        project_number = %config.project_number,
        "Starting OAuth setup"
    );
    let token = tokens.access_token()?;
    debug!(empty = token.is_empty(), "Bearer token ready");

    out.write_all(render_instructions(config).as_bytes())
        .and_then(|_| out.flush())
        .map_err(SetupError::Console)?;

    let credentials = read_credentials(prompter)?;
    info!(client_id = credentials.client_id(), "Credentials received");

    let signing_secret = generate_signing_secret()?;
    let contents = render_env_file(config, &credentials, &signing_secret);
    write_env_file(&config.env_path, &contents)?;
    info!(
        path = %config.env_path.display(),
        keys = parse_env_file(&contents).len(),
        "Env file written"
    );

    Ok(SetupReport {
        env_path: config.env_path.clone(),
        client_id: credentials.client_id().to_string(),
        redirect_uri: config.redirect_uri.clone(),
    })
}

/// Confirmation shown after the file is written. The secret never appears.
pub fn render_summary(report: &SetupReport) -> String {
    let preview: String = report
        .client_id
        .chars()
        .take(CLIENT_ID_PREVIEW_CHARS)
        .collect();

    let mut text = String::new();
    text.push_str(&format!(
        "✅ {} file created successfully!\n",
        report.env_path.display()
    ));
    text.push('\n');
    text.push_str("Configuration saved:\n");
    text.push_str(&format!("  - Client ID: {}...\n", preview));
    text.push_str(&format!("  - Client Secret: {}\n", MASK));
    text.push_str(&format!("  - Redirect URI: {}\n", report.redirect_uri));
    text.push_str("  - JWT Secret: Generated\n");
    text.push('\n');
    text.push_str("✅ Setup complete! You can now start the server:\n");
    text.push_str(&format!("   {}\n", NEXT_STEPS_COMMAND));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompter;
    use crate::token::AccessToken;
    use std::cell::Cell;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    struct FixedToken {
        calls: Cell<usize>,
    }

    impl TokenSource for FixedToken {
        fn access_token(&self) -> SetupResult<AccessToken> {
            self.calls.set(self.calls.get() + 1);
            Ok(AccessToken::new("ya29.fixed"))
        }
    }

    struct BrokenToken;

    impl TokenSource for BrokenToken {
        fn access_token(&self) -> SetupResult<AccessToken> {
            Err(SetupError::TokenCommandNotFound {
                command: "gcloud".to_string(),
                source: which::Error::CannotFindBinaryPath,
            })
        }
    }

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn writes_env_file_with_pasted_values() {
        let dir = tempdir().expect("temp dir");
        let config = SetupConfig::default().with_env_path(dir.path().join(".env"));
        let tokens = FixedToken { calls: Cell::new(0) };
        let mut input = prompter("client.apps.googleusercontent.com\nGOCSPX-s3cret\n");
        let mut out = Vec::new();

        let report = run_setup(&config, &tokens, &mut input, &mut out).expect("setup");

        assert_eq!(tokens.calls.get(), 1);
        assert_eq!(report.client_id, "client.apps.googleusercontent.com");
        let written = fs::read_to_string(&report.env_path).expect("read");
        let pairs = parse_env_file(&written);
        assert!(pairs.contains(&(
            "GOOGLE_CLIENT_ID".to_string(),
            "client.apps.googleusercontent.com".to_string()
        )));
        assert!(pairs.contains(&("GOOGLE_CLIENT_SECRET".to_string(), "GOCSPX-s3cret".to_string())));

        let shown = String::from_utf8(out).expect("utf8");
        assert!(shown.contains("console.cloud.google.com"));
    }

    #[test]
    fn missing_secret_leaves_no_file() {
        let dir = tempdir().expect("temp dir");
        let config = SetupConfig::default().with_env_path(dir.path().join(".env"));
        let tokens = FixedToken { calls: Cell::new(0) };
        let mut input = prompter("client-id\n\n");
        let mut out = Vec::new();

        let result = run_setup(&config, &tokens, &mut input, &mut out);
        assert!(matches!(result, Err(SetupError::MissingCredentials)));
        assert!(!config.env_path.exists());
    }

    #[test]
    fn token_failure_stops_before_prompting() {
        let dir = tempdir().expect("temp dir");
        let config = SetupConfig::default().with_env_path(dir.path().join(".env"));
        let mut input = prompter("client-id\nsecret\n");
        let mut out = Vec::new();

        let result = run_setup(&config, &BrokenToken, &mut input, &mut out);
        assert!(matches!(result, Err(SetupError::TokenCommandNotFound { .. })));
        assert!(out.is_empty());
        assert!(input.into_output().is_empty());
        assert!(!config.env_path.exists());
    }

    #[test]
    fn summary_truncates_client_id_and_masks_secret() {
        let report = SetupReport {
            env_path: PathBuf::from(".env"),
            client_id: "123456789012-abcdefghijklmnop.apps.googleusercontent.com".to_string(),
            redirect_uri: "https://prodmon.haielab.org/auth/google/callback".to_string(),
        };
        let summary = render_summary(&report);
        assert!(summary.contains("  - Client ID: 123456789012-abcdefg...\n"));
        assert!(summary.contains("  - Client Secret: ********************\n"));
        assert!(summary.contains("JWT Secret: Generated"));
        assert!(summary.contains(NEXT_STEPS_COMMAND));
    }
}
