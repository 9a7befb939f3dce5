//! Where backends get their bearer credential from.
//!
//! Sources are injected, so tests can hand a backend a [`StaticCredentialSource`] and never
//! touch the environment or the filesystem.

mod error;
mod reference;
mod source;
mod value;

pub use error::CredentialError;
pub use reference::{CredentialRef, CredentialRefParseError};
pub use source::{CredentialSource, EnvCredentialSource, FileCredentialSource, StaticCredentialSource};
pub use value::Credential;
