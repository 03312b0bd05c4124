use crate::Generator;
use shortlink_core::{GenerationError, LinkCache, ShortUrl};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Failure reported by a shortening provider.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ProviderError(String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A third-party shortening capability, identified by name.
///
/// The provider's answer is used as the short URL as is.
pub trait ShortenProvider {
    /// Identifier used as the `method` value to select this provider.
    fn id(&self) -> &str;

    /// Shortens an absolute URL.
    fn shorten(&self, url: &str) -> Result<String, ProviderError>;
}

/// The set of providers a run may select from.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn ShortenProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` under its id, returning the provider it replaced.
    pub fn register<P>(&mut self, provider: P) -> Option<Arc<dyn ShortenProvider>>
    where
        P: ShortenProvider + 'static,
    {
        let id = provider.id().to_string();
        self.providers.insert(id, Arc::new(provider))
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn ShortenProvider>> {
        self.providers.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ids()).finish()
    }
}

/// Delegates shortening of a page to an external provider.
///
/// The provider receives the absolute page URL, i.e. the site URL joined
/// with the page key.
#[derive(Clone)]
pub struct ExternalAdapter {
    provider: Arc<dyn ShortenProvider>,
    site_url: Url,
}

impl ExternalAdapter {
    pub fn new(provider: Arc<dyn ShortenProvider>, site_url: Url) -> Self {
        Self { provider, site_url }
    }

    /// Absolute URL of the page identified by `key`.
    pub fn absolute_url(&self, key: &str) -> Result<Url, GenerationError> {
        self.site_url
            .join(key)
            .map_err(|e| GenerationError::InvalidUrl {
                url: format!("{}{}", self.site_url, key),
                message: e.to_string(),
            })
    }
}

impl fmt::Debug for ExternalAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalAdapter")
            .field("provider", &self.provider.id())
            .field("site_url", &self.site_url.as_str())
            .finish()
    }
}

impl Generator for ExternalAdapter {
    fn name(&self) -> &str {
        self.provider.id()
    }

    fn generate(&self, key: &str, _cache: &LinkCache) -> Result<ShortUrl, GenerationError> {
        let url = self.absolute_url(key)?;
        self.provider
            .shorten(url.as_str())
            .map(ShortUrl::new_unchecked)
            .map_err(|e| GenerationError::Provider {
                provider: self.provider.id().to_string(),
                message: e.to_string(),
            })
    }
}
