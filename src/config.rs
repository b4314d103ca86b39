//! Fixed project settings and the [`SetupConfig`] they populate

use std::path::PathBuf;

use crate::token::TokenCommand;

pub const PROJECT_ID: &str = "haie-454813";
pub const PROJECT_NUMBER: &str = "337048330114";
pub const CLIENT_DISPLAY_NAME: &str = "Productivity Monkey Server";
pub const REDIRECT_URI: &str = "https://prodmon.haielab.org/auth/google/callback";
pub const CONSOLE_CREDENTIALS_URL: &str = "https://console.cloud.google.com/apis/credentials";

// Values consumed by the prodmon server on startup
pub const SERVER_PORT: u16 = 3000;
pub const DB_PATH: &str = "./prodmon-server.db";

pub const ENV_FILE_NAME: &str = ".env";

pub const GCLOUD_BIN: &str = "gcloud";
pub const GCLOUD_TOKEN_ARGS: [&str; 2] = ["auth", "print-access-token"];

pub const DEBUG_ENV: &str = "PRODMON_SETUP_DEBUG";

/// Everything the setup run needs to know up front.
///
/// [`SetupConfig::default`] carries the production values. Tests swap the
/// output path and the token command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    pub project_id: String,
    pub project_number: String,
    pub client_name: String,
    pub redirect_uri: String,
    pub port: u16,
    pub db_path: String,
    pub env_path: PathBuf,
    pub token_command: TokenCommand,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            project_id: PROJECT_ID.to_string(),
            project_number: PROJECT_NUMBER.to_string(),
            client_name: CLIENT_DISPLAY_NAME.to_string(),
            redirect_uri: REDIRECT_URI.to_string(),
            port: SERVER_PORT,
            db_path: DB_PATH.to_string(),
            env_path: PathBuf::from(ENV_FILE_NAME),
            token_command: TokenCommand::gcloud(),
        }
    }
}

impl SetupConfig {
    /// Same settings, written somewhere else.
    pub fn with_env_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_path = path.into();
        self
    }

    pub fn with_token_command(mut self, command: TokenCommand) -> Self {
        self.token_command = command;
        self
    }

    /// Cloud console page where the operator creates the client.
    pub fn console_url(&self) -> String {
        match url::Url::parse_with_params(
            CONSOLE_CREDENTIALS_URL,
            &[("project", self.project_id.as_str())],
        ) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}?project={}", CONSOLE_CREDENTIALS_URL, self.project_id),
        }
    }
}

/// Returns true when `PRODMON_SETUP_DEBUG` asks for verbose logs.
pub fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|value| matches!(value.trim(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_production_values() {
        let config = SetupConfig::default();
        assert_eq!(config.project_id, "haie-454813");
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, "./prodmon-server.db");
        assert_eq!(config.env_path, PathBuf::from(".env"));
        assert_eq!(config.token_command.program, "gcloud");
        assert_eq!(config.token_command.args, vec!["auth", "print-access-token"]);
    }

    #[test]
    fn console_url_points_at_project_credentials() {
        let config = SetupConfig::default();
        assert_eq!(
            config.console_url(),
            "https://console.cloud.google.com/apis/credentials?project=haie-454813"
        );
    }

    #[test]
    fn builders_replace_only_their_field() {
        let config = SetupConfig::default()
            .with_env_path("/tmp/out.env")
            .with_token_command(TokenCommand::new("echo", ["token"]));
        assert_eq!(config.env_path, PathBuf::from("/tmp/out.env"));
        assert_eq!(config.token_command.program, "echo");
        assert_eq!(config.redirect_uri, REDIRECT_URI);
    }
}
