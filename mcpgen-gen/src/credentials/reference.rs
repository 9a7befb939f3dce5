use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::credentials::{CredentialSource, EnvCredentialSource, FileCredentialSource};

/// Textual pointer to a credential source: `env:NAME` or `file:PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialRef {
    Env(String),
    File(PathBuf),
}

impl CredentialRef {
    pub fn parse(input: &str) -> Result<Self, CredentialRefParseError> {
        let s = input.trim();
        let (scheme, id) = s
            .split_once(':')
            .ok_or(CredentialRefParseError::MissingScheme)?;
        if id.is_empty() {
            return Err(CredentialRefParseError::EmptyId);
        }
        match scheme {
            "env" => Ok(Self::Env(id.to_string())),
            "file" => Ok(Self::File(PathBuf::from(id))),
            other => Err(CredentialRefParseError::UnknownScheme(other.to_string())),
        }
    }

    pub fn into_source(self) -> Arc<dyn CredentialSource> {
        match self {
            Self::Env(var) => Arc::new(EnvCredentialSource::new(var)),
            Self::File(path) => Arc::new(FileCredentialSource::new(path)),
        }
    }
}

impl fmt::Display for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // safe to display: this names where the credential lives, not its value.
        match self {
            Self::Env(var) => write!(f, "env:{var}"),
            Self::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}

impl std::str::FromStr for CredentialRef {
    type Err = CredentialRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CredentialRefParseError {
    #[error("credential reference must look like env:NAME or file:PATH")]
    MissingScheme,
    #[error("unknown credential scheme: {0} (expected env or file)")]
    UnknownScheme(String),
    #[error("credential reference must name a variable or path")]
    EmptyId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_schemes() {
        assert_eq!(
            CredentialRef::parse("env:OPENAI_API_KEY").unwrap(),
            CredentialRef::Env("OPENAI_API_KEY".to_string())
        );
        assert_eq!(
            CredentialRef::parse(" file:/run/secrets/key ").unwrap(),
            CredentialRef::File(PathBuf::from("/run/secrets/key"))
        );
    }

    #[test]
    fn rejects_malformed_refs() {
        assert_eq!(
            CredentialRef::parse("OPENAI_API_KEY"),
            Err(CredentialRefParseError::MissingScheme)
        );
        assert_eq!(
            CredentialRef::parse("vault:x"),
            Err(CredentialRefParseError::UnknownScheme("vault".to_string()))
        );
        assert_eq!(CredentialRef::parse("env:"), Err(CredentialRefParseError::EmptyId));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let r = CredentialRef::File(PathBuf::from("keys/openai"));
        assert_eq!(CredentialRef::parse(&r.to_string()).unwrap(), r);
    }
}
