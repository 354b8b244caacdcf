//! d1-config
//!
//! Resolves the credentials a schema migration tool needs to reach a
//! Cloudflare D1 database:
//! - database id from `wrangler.jsonc`, falling back to the environment
//! - account id and API token from the environment (with `.dev.vars`)
//! - migration tool configuration emitted as JSON

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use domain::{CredentialKind, Environment, Resolution};
use infrastructure::CredentialResolver;

/// Resolve the database id with the default sources: `wrangler.jsonc` in
/// the working directory, then `CLOUDFLARE_D1_DATABASE_ID` in `env`.
/// Never fails; a missing or unreadable file only logs a warning.
pub fn resolve_database_id(env: Environment) -> Resolution {
    match CredentialResolver::new(&AppConfig::default(), env) {
        Ok(resolver) => resolver.resolve(CredentialKind::DatabaseId),
        Err(e) => {
            tracing::warn!(error = %e, "Could not build credential resolver");
            Resolution::Absent(CredentialKind::DatabaseId)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_database_id_falls_back_without_wrangler_file() {
        // No wrangler.jsonc exists at the crate root.
        let env = Environment::new().with_var("CLOUDFLARE_D1_DATABASE_ID", "env-value");

        assert_eq!(resolve_database_id(env).value(), Some("env-value"));
    }

    #[test]
    fn test_resolve_database_id_absent() {
        assert!(!resolve_database_id(Environment::new()).is_found());
    }
}
