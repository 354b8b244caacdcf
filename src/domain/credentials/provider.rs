use std::fmt::Debug;

use super::{CredentialKind, ResolvedCredential};

/// A single source of credential values (config file, environment, ...)
pub trait CredentialProvider: Send + Sync + Debug {
    /// Look up a credential. `None` means this source has no value and the
    /// next source in the chain should be tried.
    fn lookup(&self, kind: CredentialKind) -> Option<ResolvedCredential>;

    /// Check if this provider can ever answer for the given kind
    fn supports(&self, kind: CredentialKind) -> bool;

    /// Get provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}
