use regex::Regex;
use std::path::{Path, PathBuf};

use crate::domain::{
    CredentialKind, CredentialProvider, CredentialSource, DomainError, ResolvedCredential,
};

/// Reads the database id out of a comment-permitting JSON file by text
/// pattern, not by parsing.
///
/// The match is not structurally scoped: a key inside a `//` comment or at
/// any nesting depth matches, and the first occurrence wins. An empty
/// quoted value is a match.
#[derive(Debug)]
pub struct PatternFileProvider {
    path: PathBuf,
    pattern: Regex,
}

impl PatternFileProvider {
    pub fn new(path: impl Into<PathBuf>, field: &str) -> Result<Self, DomainError> {
        if field.is_empty() {
            return Err(DomainError::configuration("database id field name is empty"));
        }

        let pattern = Regex::new(&format!(r#""{}"\s*:\s*"([^"]*)""#, regex::escape(field)))
            .map_err(|e| DomainError::configuration(format!("invalid field pattern: {}", e)))?;

        Ok(Self {
            path: path.into(),
            pattern,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First captured value in `content`, if any
    pub fn find_in(&self, content: &str) -> Option<String> {
        self.pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn read(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Could not read config file, falling back"
                );
                None
            }
        }
    }
}

impl CredentialProvider for PatternFileProvider {
    fn lookup(&self, kind: CredentialKind) -> Option<ResolvedCredential> {
        if !self.supports(kind) {
            return None;
        }

        let content = self.read()?;
        let value = self.find_in(&content);

        if value.is_none() {
            tracing::debug!(path = %self.path.display(), "No database id in config file");
        }

        value.map(|v| {
            ResolvedCredential::new(
                kind,
                v,
                CredentialSource::ConfigFile {
                    path: self.path.clone(),
                },
            )
        })
    }

    fn supports(&self, kind: CredentialKind) -> bool {
        kind == CredentialKind::DatabaseId
    }

    fn provider_name(&self) -> &'static str {
        "config_file"
    }
}
