//! CLI module for d1-config
//!
//! Subcommands:
//! - `resolve`: print a single resolved credential
//! - `generate`: emit the migration tool configuration as JSON

pub mod generate;
pub mod resolve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::{load_environment, logging, CredentialResolver};

/// d1-config - resolve Cloudflare D1 credentials for schema migrations
#[derive(Parser)]
#[command(name = "d1-config")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Application config file (skips config/default, config/local and env overrides)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Comment-permitting JSON file holding the database id (overrides config)
    #[arg(long, global = true)]
    pub wrangler: Option<PathBuf>,

    /// Dotenv file merged under the process environment (overrides config)
    #[arg(long, global = true)]
    pub dev_vars: Option<PathBuf>,
}

impl GlobalArgs {
    /// Command-line paths win over every configuration layer
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(path) = &self.wrangler {
            config.sources.wrangler_path = path.clone();
        }
        if let Some(path) = &self.dev_vars {
            config.sources.dev_vars_path = path.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print one resolved credential
    Resolve(resolve::ResolveArgs),

    /// Emit the migration tool configuration
    Generate(generate::GenerateArgs),
}

/// Load configuration, start logging and build the resolver
pub(crate) fn bootstrap(global: &GlobalArgs) -> anyhow::Result<(AppConfig, CredentialResolver)> {
    let (mut config, load_error) = match &global.config_file {
        Some(path) => (
            AppConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None,
        ),
        None => match AppConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };

    global.apply_to(&mut config);

    logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Could not load configuration, using defaults");
    }

    let env = load_environment(&config.sources.dev_vars_path);
    let resolver = CredentialResolver::new(&config, env)?;

    Ok((config, resolver))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = AppConfig::default();
        config.sources.wrangler_path = PathBuf::from("from-config.jsonc");

        GlobalArgs::default().apply_to(&mut config);

        assert_eq!(config.sources.wrangler_path, PathBuf::from("from-config.jsonc"));
        assert_eq!(config.sources.dev_vars_path, PathBuf::from(".dev.vars"));
    }

    #[test]
    fn test_path_overrides_win() {
        let mut config = AppConfig::default();
        config.sources.wrangler_path = PathBuf::from("from-config.jsonc");

        let global = GlobalArgs {
            config_file: None,
            wrangler: Some(PathBuf::from("cli/wrangler.jsonc")),
            dev_vars: Some(PathBuf::from("cli/.dev.vars")),
        };
        global.apply_to(&mut config);

        assert_eq!(config.sources.wrangler_path, PathBuf::from("cli/wrangler.jsonc"));
        assert_eq!(config.sources.dev_vars_path, PathBuf::from("cli/.dev.vars"));
        assert_eq!(config.sources.database_id_field, "database_id");
    }

    #[test]
    fn test_global_args_parse() {
        let cli = Cli::try_parse_from([
            "d1-config",
            "resolve",
            "--wrangler",
            "infra/wrangler.jsonc",
            "--dev-vars",
            "infra/.dev.vars",
        ])
        .unwrap();

        assert_eq!(cli.global.wrangler, Some(PathBuf::from("infra/wrangler.jsonc")));
        assert_eq!(cli.global.dev_vars, Some(PathBuf::from("infra/.dev.vars")));
        assert!(matches!(cli.command, Command::Resolve(_)));
    }
}
