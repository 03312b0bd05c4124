use shortlink_core::cache::Result;
use shortlink_core::{CacheStore, LinkCache};
use std::cell::{Cell, RefCell};

/// An in-process cache store.
///
/// Useful for dry runs and tests: `load` returns the last saved snapshot
/// (or the seed), `save` replaces it and counts the write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<LinkCache>,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that initially holds `cache`.
    pub fn with_cache(cache: LinkCache) -> Self {
        Self {
            snapshot: RefCell::new(cache),
            saves: Cell::new(0),
        }
    }

    /// Returns a copy of the current snapshot.
    pub fn snapshot(&self) -> LinkCache {
        self.snapshot.borrow().clone()
    }

    /// Number of times [`CacheStore::save`] has been called.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl CacheStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn load(&self) -> Result<LinkCache> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, cache: &LinkCache) -> Result<()> {
        *self.snapshot.borrow_mut() = cache.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
