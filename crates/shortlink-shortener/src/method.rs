use shortlink_core::{GenerationError, LinkCache, ShortUrl};
use shortlink_generator::{ExternalAdapter, Generator, HashedGenerator};

/// The strategy selected for a run, resolved once from the configuration.
#[derive(Debug, Clone)]
pub enum Method {
    /// Codes derived from a digest of the page key.
    Internal(HashedGenerator),
    /// Delegation to a named external provider.
    External(ExternalAdapter),
}

impl Generator for Method {
    fn name(&self) -> &str {
        match self {
            Method::Internal(generator) => generator.name(),
            Method::External(adapter) => adapter.name(),
        }
    }

    fn generate(&self, key: &str, cache: &LinkCache) -> Result<ShortUrl, GenerationError> {
        match self {
            Method::Internal(generator) => generator.generate(key, cache),
            Method::External(adapter) => adapter.generate(key, cache),
        }
    }
}
