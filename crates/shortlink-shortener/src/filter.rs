use crate::error::ConfigError;
use regex::Regex;
use shortlink_core::{Page, Site};
use tracing::trace;

/// Key of the site root, which never gets a short URL.
pub const ROOT_KEY: &str = "/";

/// Selects the pages that receive a short URL.
#[derive(Debug, Clone)]
pub struct PageFilter {
    include_pages: bool,
    collections: Vec<String>,
    exclude: Vec<Regex>,
}

impl PageFilter {
    pub fn new(include_pages: bool, collections: Vec<String>, exclude: Vec<Regex>) -> Self {
        Self {
            include_pages,
            collections,
            exclude,
        }
    }

    /// Builds a filter, compiling each exclusion pattern.
    pub fn from_patterns(
        include_pages: bool,
        collections: Vec<String>,
        patterns: &[String],
    ) -> Result<Self, ConfigError> {
        let exclude = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidExclude {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(include_pages, collections, exclude))
    }

    /// Returns `true` if the page with `key` must not be shortened.
    pub fn is_excluded(&self, key: &str) -> bool {
        key == ROOT_KEY || self.exclude.iter().any(|re| re.is_match(key))
    }

    /// Returns the eligible pages: the top-level pages if enabled, then the
    /// documents of each configured collection in configuration order.
    ///
    /// A page listed in several selected collections is returned once per
    /// listing. Unknown collection names select nothing.
    pub fn filter<'a>(&self, site: &'a Site) -> Vec<&'a Page> {
        let pages: &[Page] = if self.include_pages { &site.pages } else { &[] };

        let docs = self.collections.iter().flat_map(|name| {
            let docs = site.collection_docs(name);
            if docs.is_none() {
                trace!(collection = %name, "collection not found in site");
            }
            docs.unwrap_or_default()
        });

        pages
            .iter()
            .chain(docs)
            .filter(|page| !self.is_excluded(&page.key))
            .collect()
    }
}
