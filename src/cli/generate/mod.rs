//! Generate command - emits the migration tool configuration

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use super::{bootstrap, GlobalArgs};
use crate::domain::{
    CredentialKind, CredentialSet, DomainError, MigrationConfig, MigrationSettings, MissingPolicy,
};

/// Arguments for the generate command
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Emit `null` for unresolved credentials instead of failing
    #[arg(long)]
    pub allow_missing: bool,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    fn policy(&self) -> MissingPolicy {
        if self.allow_missing {
            MissingPolicy::Allow
        } else {
            MissingPolicy::Fail
        }
    }
}

/// Run the generate command
pub fn run(global: &GlobalArgs, args: GenerateArgs) -> anyhow::Result<()> {
    let (config, resolver) = bootstrap(global)?;

    let credentials = resolver.resolve_all();
    log_sources(&credentials);

    let json = build(&config.migration, credentials, args.policy(), |kind| {
        resolver.hint(kind)
    })?;

    match &args.output {
        Some(path) => {
            write_output(path, &json)?;
            info!(path = %path.display(), "Migration config written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn build<F>(
    settings: &MigrationSettings,
    credentials: CredentialSet,
    policy: MissingPolicy,
    hint: F,
) -> anyhow::Result<String>
where
    F: Fn(CredentialKind) -> String,
{
    let config = MigrationConfig::from_credentials(settings, credentials, policy, hint)?;
    Ok(config.to_json_pretty()?)
}

fn write_output(path: &Path, json: &str) -> Result<(), DomainError> {
    std::fs::write(path, format!("{json}\n"))
        .map_err(|e| DomainError::io(format!("failed to write {}: {}", path.display(), e)))
}

fn log_sources(credentials: &CredentialSet) {
    for kind in CredentialKind::ALL {
        match credentials.get(kind).credential() {
            Some(cred) => info!(credential = %kind, source = %cred.source(), "Resolved"),
            None => tracing::warn!(credential = %kind, "Unresolved"),
        }
    }
}
