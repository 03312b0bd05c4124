use crate::error::GenerationError;
use crate::short_url::ShortUrl;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;
use url::Url;

/// The path suffix of a short URL, e.g. `u2gKGM`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShortCode(SmolStr);

impl ShortCode {
    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. the hashed generator, whose alphabet is URL safe).
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code))
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the code against `base` the way a relative link would be.
    ///
    /// A base ending in `/` gets the code appended; otherwise the last path
    /// segment of the base is replaced.
    pub fn to_url(&self, base: &Url) -> Result<ShortUrl, GenerationError> {
        base.join(&self.0)
            .map(ShortUrl::from)
            .map_err(|e| GenerationError::InvalidUrl {
                url: base.to_string(),
                message: e.to_string(),
            })
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
