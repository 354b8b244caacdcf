use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{CredentialKind, MigrationSettings};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub env: EnvVarsConfig,
    #[serde(default)]
    pub migration: MigrationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Files credentials are read from
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Comment-permitting JSON file holding the database id
    #[serde(default = "default_wrangler_path")]
    pub wrangler_path: PathBuf,
    /// Field searched for in `wrangler_path`
    #[serde(default = "default_database_id_field")]
    pub database_id_field: String,
    /// Dotenv file merged under the process environment
    #[serde(default = "default_dev_vars_path")]
    pub dev_vars_path: PathBuf,
}

/// Environment variable names for each credential
#[derive(Debug, Clone, Deserialize)]
pub struct EnvVarsConfig {
    #[serde(default = "default_account_id_var")]
    pub account_id: String,
    #[serde(default = "default_database_id_var")]
    pub database_id: String,
    #[serde(default = "default_token_var")]
    pub token: String,
}

impl EnvVarsConfig {
    pub fn var_for(&self, kind: CredentialKind) -> &str {
        match kind {
            CredentialKind::AccountId => &self.account_id,
            CredentialKind::DatabaseId => &self.database_id,
            CredentialKind::ApiToken => &self.token,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_wrangler_path() -> PathBuf {
    PathBuf::from("wrangler.jsonc")
}

fn default_database_id_field() -> String {
    "database_id".to_string()
}

fn default_dev_vars_path() -> PathBuf {
    PathBuf::from(".dev.vars")
}

fn default_account_id_var() -> String {
    "CLOUDFLARE_ACCOUNT_ID".to_string()
}

fn default_database_id_var() -> String {
    "CLOUDFLARE_D1_DATABASE_ID".to_string()
}

fn default_token_var() -> String {
    "CF_D1_TOKEN".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            wrangler_path: default_wrangler_path(),
            database_id_field: default_database_id_field(),
            dev_vars_path: default_dev_vars_path(),
        }
    }
}

impl Default for EnvVarsConfig {
    fn default() -> Self {
        Self {
            account_id: default_account_id_var(),
            database_id: default_database_id_var(),
            token: default_token_var(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(Self::env_layer())
    }

    /// `D1CONFIG__<SECTION>__<KEY>` overrides
    fn env_layer() -> config::Environment {
        config::Environment::with_prefix("D1CONFIG")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(env: config::Environment) -> Result<Self, config::ConfigError> {
        Self::builder().add_source(env).build()?.try_deserialize()
    }

    /// Load from a single explicit file, without the default file lookup
    /// or environment overrides.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
    }
}
