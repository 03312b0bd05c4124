use thiserror::Error;

/// Errors raised while reading or writing the persisted link cache.
///
/// All of them are fatal to a run: a cache that cannot be read must not be
/// silently replaced by an empty one.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cannot read cache `{path}`: {message}")]
    Read { path: String, message: String },
    #[error("cache `{path}` is not a key/value document: {message}")]
    Parse { path: String, message: String },
    #[error("cannot write cache `{path}`: {message}")]
    Write { path: String, message: String },
}

/// Errors raised while producing the short URL of a single page.
///
/// These never abort a run; the page is skipped and reported.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("all candidate codes for `{key}` are already taken")]
    NoCandidate { key: String },
    #[error("provider `{provider}` failed: {message}")]
    Provider { provider: String, message: String },
    #[error("cannot build url from `{url}`: {message}")]
    InvalidUrl { url: String, message: String },
}
