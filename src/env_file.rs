//! `.env` rendering and persistence
//!
//! The file is always rewritten from scratch. Values are inserted verbatim,
//! with no quoting or escaping.

use crate::config::SetupConfig;
use crate::error::{SetupError, SetupResult};
use crate::prompt::OAuthCredentials;
use crate::secret::SigningSecret;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub const PORT_KEY: &str = "PORT";
pub const DB_PATH_KEY: &str = "DB_PATH";
pub const CLIENT_ID_KEY: &str = "GOOGLE_CLIENT_ID";
pub const CLIENT_SECRET_KEY: &str = "GOOGLE_CLIENT_SECRET";
pub const REDIRECT_URI_KEY: &str = "GOOGLE_REDIRECT_URI";
pub const JWT_SECRET_KEY: &str = "JWT_SECRET";

/// Fill the fixed template.
pub fn render_env_file(
    config: &SetupConfig,
    credentials: &OAuthCredentials,
    signing_secret: &SigningSecret,
) -> String {
    format!(
        "# Server Configuration
{PORT_KEY}={port}
{DB_PATH_KEY}={db_path}

# Google OAuth Configuration
{CLIENT_ID_KEY}={client_id}
{CLIENT_SECRET_KEY}={client_secret}
{REDIRECT_URI_KEY}={redirect_uri}

# JWT Secret
{JWT_SECRET_KEY}={jwt_secret}

# Gemini API Key (optional, for AI insights)
# GEMINI_API_KEY=your-gemini-api-key
",
        port = config.port,
        db_path = config.db_path,
        client_id = credentials.client_id(),
        client_secret = credentials.client_secret(),
        redirect_uri = config.redirect_uri,
        jwt_secret = signing_secret.expose(),
    )
}

/// Replace whatever is at `path` with `contents`.
pub fn write_env_file(path: &Path, contents: &str) -> SetupResult<()> {
    let wrap = |source: std::io::Error| SetupError::WriteEnvFile {
        path: path.to_path_buf(),
        source,
    };

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // Secrets inside, keep it owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(wrap)?;
    file.write_all(contents.as_bytes()).map_err(wrap)?;
    file.flush().map_err(wrap)?;

    // mode() only applies on create; tighten an existing file too
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(wrap)?;
    }

    debug!(path = %path.display(), bytes = contents.len(), "Env file written");
    Ok(())
}

/// `KEY=VALUE` pairs in file order, ignoring blank lines and comments.
pub fn parse_env_file(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .collect()
}
