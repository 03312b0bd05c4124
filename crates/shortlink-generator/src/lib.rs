//! Short URL strategies.
//!
//! Two strategies ship with the crate: [`HashedGenerator`] derives codes
//! from a digest of the page key, and [`ExternalAdapter`] hands the page URL
//! to a registered [`ShortenProvider`].

pub mod command;
pub mod external;
pub mod hashed;

pub use command::CommandProvider;
pub use external::{ExternalAdapter, ProviderError, ProviderRegistry, ShortenProvider};
pub use hashed::{candidate_codes, HashedGenerator, INTERNAL_METHOD};

use shortlink_core::{GenerationError, LinkCache, ShortUrl};

/// Trait for producing the short URL of a page.
///
/// Implementations may read the current cache (e.g. to avoid handing out a
/// URL twice) but never modify it; storing the result is the caller's job.
pub trait Generator {
    /// Name of the strategy, as reported in logs.
    fn name(&self) -> &str;

    /// Produces a short URL for the page identified by `key`.
    fn generate(&self, key: &str, cache: &LinkCache) -> Result<ShortUrl, GenerationError>;
}
