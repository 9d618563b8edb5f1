//! Runtime providers with controlled behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use delegated_sign::{ChainId, RuntimeContext, RuntimeError, RuntimeProvider, RuntimeRegistry};

/// Never yields a context; used to exercise cancellation.
pub struct PendingProvider;

#[async_trait::async_trait]
impl RuntimeProvider for PendingProvider {
    async fn fetch_context(&self, _chain_id: &ChainId) -> Result<Arc<RuntimeContext>, RuntimeError> {
        futures::future::pending().await
    }
}

/// Delegates to a registry and counts fetches.
pub struct CountingProvider {
    inner: RuntimeRegistry,
    fetches: AtomicUsize,
}

impl CountingProvider {
    pub fn new(inner: RuntimeRegistry) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RuntimeProvider for CountingProvider {
    async fn fetch_context(&self, chain_id: &ChainId) -> Result<Arc<RuntimeContext>, RuntimeError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_context(chain_id).await
    }
}
