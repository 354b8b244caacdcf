//! Domain layer - Core entities and traits

pub mod credentials;
pub mod environment;
pub mod error;
pub mod migration;

pub use credentials::{
    CredentialKind, CredentialProvider, CredentialSource, Resolution, ResolvedCredential,
};
pub use environment::Environment;
pub use error::DomainError;
pub use migration::{CredentialSet, MigrationConfig, MigrationSettings, MissingPolicy};
