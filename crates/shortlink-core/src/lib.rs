//! Core types and traits for the Shortlink page shortener.
//!
//! This crate provides the page model, the short code and short URL types,
//! the in-memory link cache and the storage trait shared by the cache
//! backends, the generators and the shortener itself.

pub mod cache;
pub mod error;
pub mod page;
pub mod short_url;
pub mod shortcode;

pub use cache::{CacheStore, LinkCache};
pub use error::{CacheError, GenerationError};
pub use page::{Collection, Page, Site};
pub use short_url::ShortUrl;
pub use shortcode::ShortCode;
