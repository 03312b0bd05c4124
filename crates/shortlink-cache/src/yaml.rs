use shortlink_core::cache::Result;
use shortlink_core::{CacheError, CacheStore, LinkCache, ShortUrl};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File name of the cache inside the cache folder.
pub const CACHE_FILE_NAME: &str = "shortener-cache";

/// A cache persisted as a YAML mapping from page key to short URL.
///
/// ```yaml
/// /about/: https://s.example/UWSw04
/// /posts/hello: https://s.example/u2gKGM
/// ```
///
/// The document is meant to be readable and editable by hand. Entries are
/// written in key order so that the file diffs cleanly between builds.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    dir: PathBuf,
    file: PathBuf,
}

impl YamlFileStore {
    /// Creates a store for `<dir>/shortener-cache`.
    ///
    /// Nothing is touched on disk until [`CacheStore::save`] is called.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = dir.join(CACHE_FILE_NAME);
        Self { dir, file }
    }

    /// Path of the cache file.
    pub fn path(&self) -> &Path {
        &self.file
    }

    fn read_error(&self, e: io::Error) -> CacheError {
        CacheError::Read {
            path: self.location(),
            message: e.to_string(),
        }
    }

    fn write_error(&self, e: impl ToString) -> CacheError {
        CacheError::Write {
            path: self.location(),
            message: e.to_string(),
        }
    }
}

impl CacheStore for YamlFileStore {
    fn location(&self) -> String {
        self.file.display().to_string()
    }

    fn load(&self) -> Result<LinkCache> {
        let content = match fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %self.location(), "no cache file yet, starting empty");
                return Ok(LinkCache::new());
            }
            Err(e) => return Err(self.read_error(e)),
        };

        // An uninitialized document is an empty cache, not a parse error.
        if matches!(content.trim(), "" | "---") {
            return Ok(LinkCache::new());
        }

        let entries: Option<BTreeMap<String, ShortUrl>> =
            serde_yaml::from_str(&content).map_err(|e| CacheError::Parse {
                path: self.location(),
                message: e.to_string(),
            })?;
        let cache = LinkCache::from_entries(entries.unwrap_or_default());

        debug!(path = %self.location(), entries = cache.len(), "loaded link cache");
        Ok(cache)
    }

    fn save(&self, cache: &LinkCache) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| self.write_error(e))?;

        let document = serde_yaml::to_string(cache.entries()).map_err(|e| self.write_error(e))?;

        // The previous snapshot stays in place until the rename.
        let staging = self.file.with_extension("tmp");
        if let Err(e) = fs::write(&staging, document).and_then(|()| fs::rename(&staging, &self.file)) {
            let _ = fs::remove_file(&staging);
            return Err(CacheError::Write {
                path: staging.display().to_string(),
                message: e.to_string(),
            });
        }

        debug!(path = %self.location(), entries = cache.len(), "saved link cache");
        Ok(())
    }
}
