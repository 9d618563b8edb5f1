//! Runtime provider abstraction.
//!
//! Decoding contexts may come from a live chain registry, a file-backed
//! cache, or in-memory fixtures. Callers depend on [`RuntimeProvider`] only.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use delegated_sign_types::ChainId;

use crate::context::RuntimeContext;
use crate::metadata::RuntimeMetadata;

/// Failure to obtain a decoding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// No runtime is known for the chain.
    Unavailable { chain_id: ChainId, reason: String },
    /// A runtime was found but its metadata could not be used.
    InvalidMetadata { chain_id: ChainId, message: String },
}

impl RuntimeError {
    pub fn chain_id(&self) -> &ChainId {
        match self {
            RuntimeError::Unavailable { chain_id, .. }
            | RuntimeError::InvalidMetadata { chain_id, .. } => chain_id,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Unavailable { chain_id, reason } => {
                write!(f, "runtime unavailable for chain {}: {}", chain_id, reason)
            }
            RuntimeError::InvalidMetadata { chain_id, message } => {
                write!(f, "invalid runtime metadata for chain {}: {}", chain_id, message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Source of decoding contexts.
#[async_trait::async_trait]
pub trait RuntimeProvider: Send + Sync {
    /// Fetch the active decoding context for a chain.
    async fn fetch_context(&self, chain_id: &ChainId) -> Result<Arc<RuntimeContext>, RuntimeError>;
}

#[async_trait::async_trait]
impl<P: RuntimeProvider + ?Sized> RuntimeProvider for Arc<P> {
    async fn fetch_context(&self, chain_id: &ChainId) -> Result<Arc<RuntimeContext>, RuntimeError> {
        (**self).fetch_context(chain_id).await
    }
}

/// In-memory runtime registry keyed by chain id.
///
/// Thread-safe via internal RwLock.
#[derive(Debug, Default)]
pub struct RuntimeRegistry {
    contexts: RwLock<HashMap<ChainId, Arc<RuntimeContext>>>,
}

impl RuntimeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from metadata and make it the active one for its chain.
    pub fn register(&self, metadata: RuntimeMetadata) -> Arc<RuntimeContext> {
        let context = Arc::new(RuntimeContext::new(metadata));
        self.insert(context.clone());
        context
    }

    /// Insert a prepared context, replacing any previous one for the chain.
    pub fn insert(&self, context: Arc<RuntimeContext>) {
        self.contexts
            .write()
            .insert(context.chain_id().clone(), context);
    }

    pub fn get(&self, chain_id: &ChainId) -> Option<Arc<RuntimeContext>> {
        self.contexts.read().get(chain_id).cloned()
    }

    pub fn remove(&self, chain_id: &ChainId) -> Option<Arc<RuntimeContext>> {
        self.contexts.write().remove(chain_id)
    }

    pub fn contains(&self, chain_id: &ChainId) -> bool {
        self.contexts.read().contains_key(chain_id)
    }

    pub fn chains(&self) -> Vec<ChainId> {
        let mut chains: Vec<ChainId> = self.contexts.read().keys().cloned().collect();
        chains.sort();
        chains
    }

    pub fn len(&self) -> usize {
        self.contexts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.read().is_empty()
    }
}

#[async_trait::async_trait]
impl RuntimeProvider for RuntimeRegistry {
    async fn fetch_context(&self, chain_id: &ChainId) -> Result<Arc<RuntimeContext>, RuntimeError> {
        self.get(chain_id).ok_or_else(|| RuntimeError::Unavailable {
            chain_id: chain_id.clone(),
            reason: "no runtime registered".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registry_fetch() {
        let registry = RuntimeRegistry::new();
        assert!(registry.is_empty());

        registry.register(RuntimeMetadata::new("polkadot", 1_002_000).with_delegation_pallets());

        let context = registry
            .fetch_context(&ChainId::new("POLKADOT"))
            .await
            .unwrap();
        assert_eq!(context.spec_version(), 1_002_000);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_registry_unavailable() {
        let registry = RuntimeRegistry::new();
        let err = registry
            .fetch_context(&ChainId::new("kusama"))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Unavailable { .. }));
        assert_eq!(err.chain_id(), &ChainId::new("kusama"));
    }

    #[tokio::test]
    async fn test_register_replaces_previous_runtime() {
        let registry = Arc::new(RuntimeRegistry::new());
        registry.register(RuntimeMetadata::new("polkadot", 1));
        registry.register(RuntimeMetadata::new("polkadot", 2));

        let context = registry
            .fetch_context(&ChainId::new("polkadot"))
            .await
            .unwrap();
        assert_eq!(context.spec_version(), 2);
        assert_eq!(registry.chains(), vec![ChainId::new("polkadot")]);

        assert!(registry.remove(&ChainId::new("polkadot")).is_some());
        assert!(!registry.contains(&ChainId::new("polkadot")));
    }
}
