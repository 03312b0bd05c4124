//! Assigns stable short URLs to the pages of a site.
//!
//! A run validates the [`ShortenerConfig`], selects the pages through the
//! [`PageFilter`], loads the link cache once, fills in a short URL for every
//! selected page that does not have one yet, and saves the cache once.
//! Failures of a single page are collected in the [`RunReport`] instead of
//! aborting the run.

pub mod config;
pub mod error;
pub mod filter;
pub mod method;
pub mod report;
pub mod service;

pub use config::{Settings, ShortenerConfig};
pub use error::{ConfigError, ShortenerError};
pub use filter::PageFilter;
pub use method::Method;
pub use report::{PageOutcome, RunReport};
pub use service::{generate, generate_with, ShortenerService};

/// Target of every log line emitted by the shortener.
pub const LOG_TARGET: &str = "shortener";
