//! JWT signing secret generation

use crate::error::{SetupError, SetupResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Bytes of OS randomness behind each secret.
pub const SIGNING_SECRET_BYTES: usize = 32;

/// Unpadded base64 length of [`SIGNING_SECRET_BYTES`].
pub const MIN_SIGNING_SECRET_LEN: usize = (SIGNING_SECRET_BYTES * 4).div_ceil(3);

/// Random URL-safe string the server uses to sign session tokens.
pub struct SigningSecret(SecretString);

impl SigningSecret {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

/// Draw a fresh secret from the OS random source.
pub fn generate_signing_secret() -> SetupResult<SigningSecret> {
    let mut bytes = [0u8; SIGNING_SECRET_BYTES];
    getrandom::getrandom(&mut bytes).map_err(SetupError::Randomness)?;
    Ok(SigningSecret(SecretString::new(URL_SAFE_NO_PAD.encode(bytes))))
}

/// True for strings made only of `A-Z a-z 0-9 - _` and at least
/// [`MIN_SIGNING_SECRET_LEN`] long.
pub fn is_url_safe_token(value: &str) -> bool {
    value.len() >= MIN_SIGNING_SECRET_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
