//! Credential resolution domain

mod credential;
mod provider;

pub use credential::{CredentialKind, CredentialSource, Resolution, ResolvedCredential};
pub use provider::CredentialProvider;

#[cfg(test)]
pub use provider::mock;
