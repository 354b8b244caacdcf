//! Infrastructure layer - file, environment and logging adapters

pub mod credentials;
pub mod environment;
pub mod logging;

pub use credentials::CredentialResolver;
pub use environment::load_environment;
