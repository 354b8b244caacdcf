use std::collections::HashMap;

use crate::config::EnvVarsConfig;
use crate::domain::{
    CredentialKind, CredentialProvider, CredentialSource, Environment, ResolvedCredential,
};

/// Credential provider that reads from an explicit environment snapshot
#[derive(Debug)]
pub struct EnvCredentialProvider {
    env: Environment,
    mappings: HashMap<CredentialKind, String>,
}

impl EnvCredentialProvider {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            mappings: HashMap::new(),
        }
    }

    pub fn with_mapping(mut self, kind: CredentialKind, var: impl Into<String>) -> Self {
        self.mappings.insert(kind, var.into());
        self
    }

    pub fn with_vars(mut self, vars: &EnvVarsConfig) -> Self {
        for kind in CredentialKind::ALL {
            self.mappings.insert(kind, vars.var_for(kind).to_string());
        }
        self
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn lookup(&self, kind: CredentialKind) -> Option<ResolvedCredential> {
        let var = self.mappings.get(&kind)?;
        let value = self.env.get(var)?;

        Some(ResolvedCredential::new(
            kind,
            value,
            CredentialSource::Environment {
                variable: var.clone(),
            },
        ))
    }

    fn supports(&self, kind: CredentialKind) -> bool {
        self.mappings.contains_key(&kind)
    }

    fn provider_name(&self) -> &'static str {
        "env"
    }
}
