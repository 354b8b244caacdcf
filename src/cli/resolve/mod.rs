//! Resolve command - prints one credential

use clap::{Args, ValueEnum};
use serde_json::json;

use super::{bootstrap, GlobalArgs};
use crate::domain::{CredentialKind, Resolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    AccountId,
    DatabaseId,
    Token,
}

impl From<KindArg> for CredentialKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::AccountId => CredentialKind::AccountId,
            KindArg::DatabaseId => CredentialKind::DatabaseId,
            KindArg::Token => CredentialKind::ApiToken,
        }
    }
}

/// Arguments for the resolve command
#[derive(Args, Clone, Debug)]
pub struct ResolveArgs {
    /// Credential to resolve
    #[arg(long, value_enum, default_value = "database-id")]
    pub kind: KindArg,

    /// Exit with an error when the credential cannot be resolved
    #[arg(long)]
    pub require: bool,

    /// Print value, source and timestamp as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the resolve command
pub fn run(global: &GlobalArgs, args: ResolveArgs) -> anyhow::Result<()> {
    let (_config, resolver) = bootstrap(global)?;
    let kind = CredentialKind::from(args.kind);

    let mut resolution = resolver.resolve(kind);
    if args.require {
        resolution = Resolution::Found(resolution.require(&resolver.hint(kind))?);
    } else if !resolution.is_found() {
        tracing::info!(credential = %kind, "Credential not resolved");
    }

    if let Some(output) = render(&resolution, args.json)? {
        println!("{output}");
    }
    Ok(())
}

/// Plain output is the bare value, `None` when absent.
fn render(resolution: &Resolution, as_json: bool) -> anyhow::Result<Option<String>> {
    if !as_json {
        return Ok(resolution.value().map(str::to_string));
    }

    let body = match resolution.credential() {
        Some(cred) => serde_json::to_value(cred)?,
        None => json!({ "kind": resolution.kind(), "value": null }),
    };
    Ok(Some(serde_json::to_string_pretty(&body)?))
}
