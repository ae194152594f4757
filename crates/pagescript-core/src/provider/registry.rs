//! Cloud provider lookup by settings kind.

use std::collections::HashMap;
use std::sync::Arc;

use pagescript_protocols::{CloudProvider, ProviderKind};

/// The configured cloud providers, at most one per kind.
#[derive(Default, Clone)]
pub struct CloudProviders {
    providers: HashMap<ProviderKind, Arc<dyn CloudProvider>>,
}

impl CloudProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider, replacing any previous one of the same kind.
    pub fn with(mut self, provider: Arc<dyn CloudProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn register(&mut self, provider: Arc<dyn CloudProvider>) {
        self.providers.insert(provider.kind(), provider);
    }

    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn CloudProvider>> {
        self.providers.get(&kind).cloned()
    }

    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.keys().copied().collect()
    }
}
