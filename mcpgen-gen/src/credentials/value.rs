use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::credentials::CredentialError;

/// A non-empty bearer credential. Never printable; zeroized on drop.
pub struct Credential(SecretString);

impl Credential {
    /// Trims surrounding whitespace (trailing newlines in key files are common) and rejects
    /// values that end up empty.
    pub fn new(source_name: &str, raw: &str) -> Result<Self, CredentialError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Empty(source_name.to_string()));
        }
        Ok(Self(SecretString::from(trimmed.to_string())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
