use anyhow::{Context, Result};
use serde::Deserialize;
use shortlink_core::{Collection, Page, Site};
use shortlink_shortener::ShortenerConfig;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A site described in TOML, as written by a build driver.
///
/// ```toml
/// url = "https://blog.example"
///
/// [[pages]]
/// key = "/about/"
///
/// [collections.posts]
/// label = "posts"
/// docs = [{ key = "/posts/hello" }]
///
/// [shortener]
/// method = "internal"
/// shorturl = "https://s.example/"
/// collections = ["posts"]
/// ```
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub collections: BTreeMap<String, Collection>,
    #[serde(default)]
    pub shortener: ShortenerConfig,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read site manifest `{}`", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("invalid site manifest `{}`", path.display()))
    }

    /// Splits the manifest into the site and its shortener configuration.
    pub fn into_parts(self) -> (Site, ShortenerConfig) {
        let site = Site {
            url: self.url,
            pages: self.pages,
            collections: self.collections,
        };
        (site, self.shortener)
    }
}
