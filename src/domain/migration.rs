//! Configuration object consumed by the schema migration tool

use serde::{Deserialize, Serialize};

use super::credentials::{CredentialKind, Resolution};
use super::DomainError;

/// Static pass-through settings. Nothing here is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationSettings {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_out")]
    pub out: String,
    #[serde(default = "default_dialect")]
    pub dialect: String,
    #[serde(default = "default_driver")]
    pub driver: String,
    #[serde(default = "default_true")]
    pub verbose: bool,
    #[serde(default = "default_true")]
    pub strict: bool,
}

fn default_schema() -> String {
    "./src/server/modules/*/db/schema.ts".to_string()
}

fn default_out() -> String {
    "./drizzle".to_string()
}

fn default_dialect() -> String {
    "sqlite".to_string()
}

fn default_driver() -> String {
    "d1-http".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            out: default_out(),
            dialect: default_dialect(),
            driver: default_driver(),
            verbose: true,
            strict: true,
        }
    }
}

/// The three resolutions the migration tool needs
#[derive(Debug, Clone)]
pub struct CredentialSet {
    pub account_id: Resolution,
    pub database_id: Resolution,
    pub api_token: Resolution,
}

impl CredentialSet {
    pub fn get(&self, kind: CredentialKind) -> &Resolution {
        match kind {
            CredentialKind::AccountId => &self.account_id,
            CredentialKind::DatabaseId => &self.database_id,
            CredentialKind::ApiToken => &self.api_token,
        }
    }

    pub fn missing(&self) -> Vec<CredentialKind> {
        CredentialKind::ALL
            .into_iter()
            .filter(|kind| !self.get(*kind).is_found())
            .collect()
    }
}

/// What to do when a credential could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    #[default]
    Fail,
    Allow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbCredentials {
    pub account_id: Option<String>,
    pub database_id: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    pub schema: String,
    pub out: String,
    pub dialect: String,
    pub driver: String,
    pub db_credentials: DbCredentials,
    pub verbose: bool,
    pub strict: bool,
}

impl MigrationConfig {
    /// Assemble the config. With [`MissingPolicy::Fail`] the first absent
    /// credential is reported using `hint` to name its variable.
    pub fn from_credentials<F>(
        settings: &MigrationSettings,
        credentials: CredentialSet,
        policy: MissingPolicy,
        hint: F,
    ) -> Result<Self, DomainError>
    where
        F: Fn(CredentialKind) -> String,
    {
        if policy == MissingPolicy::Fail {
            if let Some(kind) = credentials.missing().first() {
                return Err(DomainError::missing_credential(kind.to_string(), hint(*kind)));
            }
        }

        let value = |r: Resolution| r.into_option().map(|c| c.into_value());

        Ok(Self {
            schema: settings.schema.clone(),
            out: settings.out.clone(),
            dialect: settings.dialect.clone(),
            driver: settings.driver.clone(),
            db_credentials: DbCredentials {
                account_id: value(credentials.account_id),
                database_id: value(credentials.database_id),
                token: value(credentials.api_token),
            },
            verbose: settings.verbose,
            strict: settings.strict,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
