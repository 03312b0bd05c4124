use shortlink_core::cache::Result;
use shortlink_core::{CacheStore, LinkCache};
use tracing::debug;

/// Wraps a store so that loads go through and saves are dropped.
#[derive(Debug, Clone)]
pub struct ReadOnlyStore<S> {
    inner: S,
}

impl<S: CacheStore> ReadOnlyStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: CacheStore> CacheStore for ReadOnlyStore<S> {
    fn location(&self) -> String {
        self.inner.location()
    }

    fn load(&self) -> Result<LinkCache> {
        self.inner.load()
    }

    fn save(&self, cache: &LinkCache) -> Result<()> {
        debug!(path = %self.inner.location(), entries = cache.len(), "read-only store, not saving");
        Ok(())
    }
}
