use std::sync::Arc;

use crate::domain::{CredentialKind, CredentialProvider, Resolution};

/// Chain of credential providers that tries each in order
#[derive(Debug, Clone)]
pub struct ChainedCredentialProvider {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl ChainedCredentialProvider {
    pub fn new(providers: Vec<Arc<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    pub fn builder() -> ChainedCredentialProviderBuilder {
        ChainedCredentialProviderBuilder::new()
    }

    /// First provider with a value wins. Never fails.
    pub fn resolve(&self, kind: CredentialKind) -> Resolution {
        for provider in &self.providers {
            if !provider.supports(kind) {
                continue;
            }

            match provider.lookup(kind) {
                Some(cred) => {
                    tracing::debug!(
                        provider = provider.provider_name(),
                        credential = %kind,
                        source = %cred.source(),
                        "Credential resolved"
                    );
                    return Resolution::Found(cred);
                }
                None => {
                    tracing::debug!(
                        provider = provider.provider_name(),
                        credential = %kind,
                        "No value, trying next"
                    );
                }
            }
        }

        tracing::debug!(credential = %kind, "No provider could supply credential");
        Resolution::Absent(kind)
    }
}

/// Builder for ChainedCredentialProvider
#[derive(Default)]
pub struct ChainedCredentialProviderBuilder {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl ChainedCredentialProviderBuilder {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> ChainedCredentialProvider {
        ChainedCredentialProvider::new(self.providers)
    }
}
