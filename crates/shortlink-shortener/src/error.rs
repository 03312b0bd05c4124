use shortlink_core::CacheError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

/// Problems with the configuration, detected before any cache I/O.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no shortening method configured")]
    MissingMethod,
    #[error("unknown shortening method `{method}`, expected one of: {}", known.join(", "))]
    UnknownMethod { method: String, known: Vec<String> },
    #[error("method `internal` requires `shorturl` to be set")]
    MissingBaseUrl,
    #[error("invalid short url base `{url}`: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("method `{method}` requires the site `url` to be set")]
    MissingSiteUrl { method: String },
    #[error("invalid site url `{url}`: {message}")]
    InvalidSiteUrl { url: String, message: String },
    #[error("invalid exclude pattern `{pattern}`: {message}")]
    InvalidExclude { pattern: String, message: String },
}

/// Errors that abort a whole run.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no pages selected for shortening")]
    EmptyPageSet,
    #[error(transparent)]
    Cache(#[from] CacheError),
}
