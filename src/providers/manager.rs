use crate::providers::traits::ProviderAdapter;
use crate::providers::types::ProviderId;
use std::sync::Arc;

/// The set of adapters connected for one request.
///
/// Built by the service layer from whatever the user has linked and handed
/// to the engine explicitly. At most one adapter per `ProviderId`.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an adapter. A second adapter for the same id replaces the first
    /// in place, keeping its position.
    pub fn register(&mut self, provider: Arc<dyn ProviderAdapter>) {
        let id = provider.id();
        log::info!("Registering provider: {} ({})", provider.name(), id);
        match self.providers.iter_mut().find(|p| p.id() == id) {
            Some(slot) => {
                log::warn!("Provider {} was already registered, replacing it", id);
                *slot = provider;
            }
            None => self.providers.push(provider),
        }
    }

    pub fn with(mut self, provider: Arc<dyn ProviderAdapter>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers.iter().find(|p| p.id() == id).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ProviderAdapter>> {
        self.providers.iter()
    }

    pub fn ids(&self) -> Vec<ProviderId> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl FromIterator<Arc<dyn ProviderAdapter>> for ProviderRegistry {
    fn from_iter<I: IntoIterator<Item = Arc<dyn ProviderAdapter>>>(iter: I) -> Self {
        let mut registry = Self::new();
        for provider in iter {
            registry.register(provider);
        }
        registry
    }
}
