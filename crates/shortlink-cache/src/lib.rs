//! Cache store implementations for the Shortlink shortener.

pub mod memory;
pub mod readonly;
pub mod yaml;

pub use memory::MemoryStore;
pub use readonly::ReadOnlyStore;
pub use shortlink_core::cache::Result;
pub use shortlink_core::{CacheError, CacheStore, LinkCache};
pub use yaml::{YamlFileStore, CACHE_FILE_NAME};
