//! The `[shortener]` section of a site configuration.
//!
//! ```toml
//! [shortener]
//! method = "internal"
//! shorturl = "https://s.example/"
//! cache_folder = ".cache"
//! pages = true
//! collections = ["posts"]
//! exclude = ["^/drafts/"]
//! debug = false
//! ```
//!
//! [`ShortenerConfig`] is the raw, serde-friendly form. [`ShortenerConfig::validate`]
//! resolves it once into [`Settings`], which is what a run works with.

use crate::error::ConfigError;
use crate::filter::PageFilter;
use crate::method::Method;
use serde::{Deserialize, Serialize};
use shortlink_generator::{ExternalAdapter, HashedGenerator, ProviderRegistry, INTERNAL_METHOD};
use std::path::{Path, PathBuf};
use typed_builder::TypedBuilder;
use url::Url;

/// Cache folder used when none is configured, relative to the site source.
pub const DEFAULT_CACHE_FOLDER: &str = ".cache";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct ShortenerConfig {
    /// Strategy name: `internal` or the id of a registered provider.
    #[builder(default, setter(strip_option, into))]
    pub method: Option<String>,
    /// Base URL the internal codes are appended to.
    #[builder(default, setter(strip_option, into))]
    pub shorturl: Option<String>,
    #[builder(default = PathBuf::from(DEFAULT_CACHE_FOLDER), setter(into))]
    pub cache_folder: PathBuf,
    /// Include the top-level pages of the site.
    #[builder(default)]
    pub pages: bool,
    /// Names of the collections whose documents are included.
    #[builder(default)]
    pub collections: Vec<String>,
    /// Regular expressions; pages whose key matches any of them are skipped.
    #[builder(default)]
    pub exclude: Vec<String>,
    /// Log every assignment and a summary of the run.
    #[builder(default)]
    pub debug: bool,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A validated configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub method: Method,
    pub filter: PageFilter,
    /// Absolute or source-relative folder holding the cache file.
    pub cache_dir: PathBuf,
    pub debug: bool,
}

impl ShortenerConfig {
    /// Resolves the strategy, compiles the exclusion patterns and locates
    /// the cache folder under `source_dir`.
    ///
    /// External providers need the public URL of the site to build absolute
    /// page URLs, so `site_url` is required when `method` names one.
    pub fn validate(
        &self,
        registry: &ProviderRegistry,
        site_url: Option<&str>,
        source_dir: &Path,
    ) -> Result<Settings, ConfigError> {
        let method = self.resolve_method(registry, site_url)?;
        let filter = PageFilter::from_patterns(self.pages, self.collections.clone(), &self.exclude)?;

        Ok(Settings {
            method,
            filter,
            cache_dir: source_dir.join(&self.cache_folder),
            debug: self.debug,
        })
    }

    fn resolve_method(
        &self,
        registry: &ProviderRegistry,
        site_url: Option<&str>,
    ) -> Result<Method, ConfigError> {
        let name = self
            .method
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingMethod)?;

        if name == INTERNAL_METHOD {
            let base = self
                .shorturl
                .as_deref()
                .map(str::trim)
                .filter(|base| !base.is_empty())
                .ok_or(ConfigError::MissingBaseUrl)?;
            let base = parse_base(base).map_err(|message| ConfigError::InvalidBaseUrl {
                url: base.to_string(),
                message,
            })?;
            return Ok(Method::Internal(HashedGenerator::new(base)));
        }

        let Some(provider) = registry.get(name) else {
            return Err(ConfigError::UnknownMethod {
                method: name.to_string(),
                known: std::iter::once(INTERNAL_METHOD)
                    .chain(registry.ids())
                    .map(str::to_string)
                    .collect(),
            });
        };

        let site_url = site_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::MissingSiteUrl {
                method: name.to_string(),
            })?;
        let site_url = parse_base(site_url).map_err(|message| ConfigError::InvalidSiteUrl {
            url: site_url.to_string(),
            message,
        })?;

        Ok(Method::External(ExternalAdapter::new(provider, site_url)))
    }
}

fn parse_base(url: &str) -> Result<Url, String> {
    let url = Url::parse(url).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("cannot be used as a base url".to_string());
    }
    Ok(url)
}
