use crate::short_url::ShortUrl;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A content page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// The canonical path of the page, e.g. `/posts/hello`.
    ///
    /// The path is used as the cache key rather than an internal id because
    /// it survives reorganisation of the content tree.
    pub key: String,
    /// The short URL assigned by the last run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorturl: Option<ShortUrl>,
}

impl Page {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shorturl: None,
        }
    }
}

/// A named group of documents, such as `posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub docs: Vec<Page>,
}

/// The site being built: its top-level pages and its collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Public base URL of the site, used to build absolute page URLs.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub collections: BTreeMap<String, Collection>,
}

impl Site {
    /// Returns the documents of the named collection, if it exists.
    pub fn collection_docs(&self, name: &str) -> Option<&[Page]> {
        self.collections.get(name).map(|c| c.docs.as_slice())
    }

    /// Sets `shorturl` on every page from the outputs of a run.
    ///
    /// Pages are matched by key wherever they appear, so a document listed in
    /// two collections receives the same URL in both places. Pages without an
    /// entry in `outputs` end up with no `shorturl`, even if one was set
    /// before.
    pub fn apply(&mut self, outputs: &BTreeMap<String, ShortUrl>) {
        let collections = self.collections.values_mut().flat_map(|c| c.docs.iter_mut());
        for page in self.pages.iter_mut().chain(collections) {
            page.shorturl = outputs.get(&page.key).cloned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        let mut collections = BTreeMap::new();
        collections.insert(
            "posts".to_string(),
            Collection {
                label: "posts".to_string(),
                docs: vec![Page::new("/posts/hello"), Page::new("/posts/world")],
            },
        );
        Site {
            url: Some("https://blog.example".to_string()),
            pages: vec![Page::new("/about/"), Page::new("/posts/hello")],
            collections,
        }
    }

    #[test]
    fn apply_sets_matching_pages_everywhere() {
        let mut site = site();
        let mut outputs = BTreeMap::new();
        outputs.insert(
            "/posts/hello".to_string(),
            ShortUrl::new_unchecked("https://s.example/u2gKGM"),
        );

        site.apply(&outputs);

        assert_eq!(
            site.pages[1].shorturl.as_ref().map(ShortUrl::as_str),
            Some("https://s.example/u2gKGM")
        );
        let docs = site.collection_docs("posts").unwrap();
        assert_eq!(
            docs[0].shorturl.as_ref().map(ShortUrl::as_str),
            Some("https://s.example/u2gKGM")
        );
        assert!(docs[1].shorturl.is_none());
        assert!(site.pages[0].shorturl.is_none());
    }

    #[test]
    fn apply_clears_stale_urls() {
        let mut site: Site = toml::from_str(
            r#"
            [[pages]]
            key = "/about/"
            shorturl = "https://s.example/stale"
            "#,
        )
        .unwrap();
        assert!(site.pages[0].shorturl.is_some());

        site.apply(&BTreeMap::new());

        assert!(site.pages[0].shorturl.is_none());
    }

    #[test]
    fn missing_collection_is_none() {
        assert!(site().collection_docs("drafts").is_none());
    }

    #[test]
    fn deserializes_with_defaults() {
        let site: Site = toml::from_str(
            r#"
            [[pages]]
            key = "/about/"
            "#,
        )
        .unwrap();
        assert_eq!(site.pages, vec![Page::new("/about/")]);
        assert!(site.url.is_none());
        assert!(site.collections.is_empty());
    }
}
