use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A fully qualified short URL, e.g. `https://s.example/u2gKGM`.
///
/// Values read back from a cache file or returned by an external provider
/// are taken as they are; no validation is performed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortUrl(String);

impl ShortUrl {
    /// Wraps a string without checking that it is a URL.
    pub fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShortUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<url::Url> for ShortUrl {
    fn from(url: url::Url) -> Self {
        Self(url.into())
    }
}
