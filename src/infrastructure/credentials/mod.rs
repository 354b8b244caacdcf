//! Credential provider implementations

mod chain;
mod env_provider;
mod pattern_file_provider;
mod service;

pub use chain::{ChainedCredentialProvider, ChainedCredentialProviderBuilder};
pub use env_provider::EnvCredentialProvider;
pub use pattern_file_provider::PatternFileProvider;
pub use service::CredentialResolver;
