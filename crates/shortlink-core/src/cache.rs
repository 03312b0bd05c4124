use crate::error::CacheError;
use crate::short_url::ShortUrl;
use std::collections::{BTreeMap, HashSet};

pub type Result<T> = std::result::Result<T, CacheError>;

/// The mapping from page key to the short URL issued for it.
///
/// Besides the forward map the cache keeps the set of issued URLs, so
/// generators can check for a collision without scanning every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCache {
    entries: BTreeMap<String, ShortUrl>,
    issued: HashSet<ShortUrl>,
}

impl LinkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cache from previously persisted entries.
    pub fn from_entries(entries: BTreeMap<String, ShortUrl>) -> Self {
        let issued = entries.values().cloned().collect();
        Self { entries, issued }
    }

    pub fn get(&self, key: &str) -> Option<&ShortUrl> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns `true` if `url` has already been issued to some page.
    pub fn contains_value(&self, url: &ShortUrl) -> bool {
        self.issued.contains(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries ordered by page key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShortUrl)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn entries(&self) -> &BTreeMap<String, ShortUrl> {
        &self.entries
    }

    /// Returns the URL stored for `key`, computing and storing it on a miss.
    ///
    /// `compute` sees the cache as it is before the insertion. If it fails,
    /// nothing is stored and the error is returned unchanged. An existing
    /// entry is never replaced.
    pub fn get_or_compute<F, E>(&mut self, key: &str, compute: F) -> std::result::Result<ShortUrl, E>
    where
        F: FnOnce(&LinkCache) -> std::result::Result<ShortUrl, E>,
    {
        if let Some(url) = self.entries.get(key) {
            return Ok(url.clone());
        }

        let url = compute(self)?;
        self.issued.insert(url.clone());
        self.entries.insert(key.to_owned(), url.clone());
        Ok(url)
    }
}

/// Durable storage for a [`LinkCache`].
///
/// The cache is read once at the start of a run and written back once at
/// the end, as a whole. Implementations decide the encoding.
pub trait CacheStore {
    /// Human readable location of the store, used in diagnostics.
    fn location(&self) -> String;

    /// Loads the persisted cache. A store that has never been written
    /// yields an empty cache.
    fn load(&self) -> Result<LinkCache>;

    /// Replaces the persisted cache with `cache`.
    fn save(&self, cache: &LinkCache) -> Result<()>;
}

impl<S: CacheStore + ?Sized> CacheStore for &S {
    fn location(&self) -> String {
        (**self).location()
    }

    fn load(&self) -> Result<LinkCache> {
        (**self).load()
    }

    fn save(&self, cache: &LinkCache) -> Result<()> {
        (**self).save(cache)
    }
}
