use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::DomainError;

/// Which credential the migration tool needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    AccountId,
    DatabaseId,
    ApiToken,
}

impl CredentialKind {
    pub const ALL: [CredentialKind; 3] = [
        CredentialKind::AccountId,
        CredentialKind::DatabaseId,
        CredentialKind::ApiToken,
    ];
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialKind::AccountId => write!(f, "account_id"),
            CredentialKind::DatabaseId => write!(f, "database_id"),
            CredentialKind::ApiToken => write!(f, "api_token"),
        }
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    ConfigFile { path: PathBuf },
    Environment { variable: String },
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::ConfigFile { path } => write!(f, "file:{}", path.display()),
            CredentialSource::Environment { variable } => write!(f, "env:{}", variable),
        }
    }
}

/// A credential value picked by the precedence chain.
///
/// The value is kept verbatim: an empty string is still a resolved value.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedCredential {
    kind: CredentialKind,
    value: String,
    source: CredentialSource,
    resolved_at: DateTime<Utc>,
}

impl ResolvedCredential {
    pub fn new(kind: CredentialKind, value: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            kind,
            value: value.into(),
            source,
            resolved_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }
}

/// Outcome of resolving one credential. Absence is not an error here;
/// callers decide with [`Resolution::require`].
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(ResolvedCredential),
    Absent(CredentialKind),
}

impl Resolution {
    pub fn kind(&self) -> CredentialKind {
        match self {
            Resolution::Found(cred) => cred.kind(),
            Resolution::Absent(kind) => *kind,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Resolution::Found(cred) => Some(cred.value()),
            Resolution::Absent(_) => None,
        }
    }

    pub fn credential(&self) -> Option<&ResolvedCredential> {
        match self {
            Resolution::Found(cred) => Some(cred),
            Resolution::Absent(_) => None,
        }
    }

    pub fn into_option(self) -> Option<ResolvedCredential> {
        match self {
            Resolution::Found(cred) => Some(cred),
            Resolution::Absent(_) => None,
        }
    }

    /// Treat absence as fatal. `hint` names what the user should set.
    pub fn require(self, hint: &str) -> Result<ResolvedCredential, DomainError> {
        match self {
            Resolution::Found(cred) => Ok(cred),
            Resolution::Absent(kind) => Err(DomainError::missing_credential(kind.to_string(), hint)),
        }
    }
}
