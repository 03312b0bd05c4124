use crate::config::{Settings, ShortenerConfig};
use crate::error::{Result, ShortenerError};
use crate::report::{PageOutcome, RunReport};
use crate::LOG_TARGET;
use shortlink_cache::YamlFileStore;
use shortlink_core::{CacheStore, Site};
use shortlink_generator::{Generator, ProviderRegistry};
use std::path::Path;
use tracing::{debug, error};

/// Runs the shortener over a site with a validated configuration.
///
/// The service owns the cache for the duration of [`run`](Self::run): it is
/// loaded once, filled page by page in filter order and saved once. Pages
/// are processed sequentially because each generated URL must be visible to
/// the collision check of the next page.
#[derive(Debug)]
pub struct ShortenerService<S> {
    settings: Settings,
    store: S,
}

impl<S: CacheStore> ShortenerService<S> {
    pub fn new(settings: Settings, store: S) -> Self {
        Self { settings, store }
    }

    /// Assigns a short URL to every selected page of `site`.
    ///
    /// Fails without touching the store when no page is selected. A page
    /// whose URL cannot be produced is recorded as skipped and does not
    /// stop the run. The report is logged before the cache is saved, so
    /// skipped pages are reported even when the save fails.
    pub fn run(&self, site: &Site) -> Result<RunReport> {
        let pages = self.settings.filter.filter(site);
        if pages.is_empty() {
            return Err(ShortenerError::EmptyPageSet);
        }

        let method = &self.settings.method;
        let mut cache = self.store.load()?;
        debug!(
            target: LOG_TARGET,
            store = %self.store.location(),
            entries = cache.len(),
            pages = pages.len(),
            method = %method.name(),
            "processing pages"
        );

        let mut outcomes = Vec::with_capacity(pages.len());
        for page in pages {
            let key = page.key.as_str();
            let cached = cache.contains_key(key);
            let outcome = match cache.get_or_compute(key, |cache| method.generate(key, cache)) {
                Ok(url) => PageOutcome::Assigned {
                    key: key.to_string(),
                    url,
                    cached,
                },
                Err(error) => PageOutcome::Skipped {
                    key: key.to_string(),
                    error,
                },
            };
            outcomes.push(outcome);
        }

        let report = RunReport {
            method: method.name().to_string(),
            outcomes,
        };
        report.log(self.settings.debug);

        self.store.save(&cache)?;
        Ok(report)
    }
}

/// Runs the shortener with the YAML cache in the configured cache folder.
///
/// This is the entry point for a site build: the configuration is
/// validated, the run is executed, and every selected page of `site` gets
/// its `shorturl` (none when the page was skipped). Relative cache folders are
/// resolved against `source_dir`.
pub fn generate(
    config: &ShortenerConfig,
    site: &mut Site,
    registry: &ProviderRegistry,
    source_dir: &Path,
) -> Result<RunReport> {
    generate_with(config, site, registry, source_dir, |settings| {
        YamlFileStore::new(&settings.cache_dir)
    })
}

/// Like [`generate`], with the cache store built by `open_store`.
///
/// `open_store` is only called once the configuration is valid.
pub fn generate_with<S, F>(
    config: &ShortenerConfig,
    site: &mut Site,
    registry: &ProviderRegistry,
    source_dir: &Path,
    open_store: F,
) -> Result<RunReport>
where
    S: CacheStore,
    F: FnOnce(&Settings) -> S,
{
    let result = config
        .validate(registry, site.url.as_deref(), source_dir)
        .map_err(ShortenerError::from)
        .and_then(|settings| {
            let store = open_store(&settings);
            ShortenerService::new(settings, store).run(site)
        });

    match result {
        Ok(report) => {
            site.apply(&report.outputs());
            Ok(report)
        }
        Err(e) => {
            error!(target: LOG_TARGET, error = %e, "shortener run aborted");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortlink_cache::MemoryStore;
    use shortlink_core::{GenerationError, LinkCache, Page, ShortUrl};
    use shortlink_generator::candidate_codes;
    use std::collections::BTreeMap;

    fn settings(config: ShortenerConfig) -> Settings {
        config
            .validate(&ProviderRegistry::new(), None, Path::new("/site"))
            .unwrap()
    }

    fn internal() -> Settings {
        settings(
            ShortenerConfig::builder()
                .method("internal")
                .shorturl("https://s.example/")
                .pages(true)
                .build(),
        )
    }

    fn site(keys: &[&str]) -> Site {
        Site {
            pages: keys.iter().map(|k| Page::new(*k)).collect(),
            ..Site::default()
        }
    }

    fn candidate_urls(key: &str) -> Vec<ShortUrl> {
        candidate_codes(key)
            .iter()
            .map(|c| ShortUrl::new_unchecked(format!("https://s.example/{c}")))
            .collect()
    }

    #[test]
    fn run_assigns_and_saves_once() {
        let store = MemoryStore::new();
        let service = ShortenerService::new(internal(), &store);

        let report = service.run(&site(&["/posts/hello", "/about/"])).unwrap();

        assert_eq!(report.method, "internal");
        assert_eq!(
            report.outputs()["/posts/hello"].as_str(),
            "https://s.example/u2gKGM"
        );
        assert_eq!(report.outputs()["/about/"].as_str(), "https://s.example/UWSw04");
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn cached_entries_are_reused() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "/posts/hello".to_string(),
            ShortUrl::new_unchecked("https://s.example/legacy"),
        );
        let store = MemoryStore::with_cache(LinkCache::from_entries(entries));
        let service = ShortenerService::new(internal(), &store);

        let report = service.run(&site(&["/posts/hello"])).unwrap();

        match &report.outcomes[0] {
            PageOutcome::Assigned { url, cached, .. } => {
                assert_eq!(url.as_str(), "https://s.example/legacy");
                assert!(*cached);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(report.generated(), 0);
    }

    #[test]
    fn duplicate_keys_compute_once() {
        let store = MemoryStore::new();
        let service = ShortenerService::new(internal(), &store);

        let report = service
            .run(&site(&["/posts/hello", "/posts/hello"]))
            .unwrap();

        let urls: Vec<_> = report.assigned().map(|(_, url)| url.clone()).collect();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], urls[1]);
        assert_eq!(report.generated(), 1);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn exhausted_candidates_skip_only_that_page() {
        let entries: BTreeMap<_, _> = candidate_urls("/posts/hello")
            .into_iter()
            .enumerate()
            .map(|(i, url)| (format!("/taken/{i}"), url))
            .collect();
        let store = MemoryStore::with_cache(LinkCache::from_entries(entries));
        let service = ShortenerService::new(internal(), &store);

        let report = service.run(&site(&["/posts/hello", "/about/"])).unwrap();

        let skipped: Vec<_> = report.skipped().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0, "/posts/hello");
        assert!(matches!(skipped[0].1, GenerationError::NoCandidate { .. }));
        assert!(report.outputs().contains_key("/about/"));
        assert_eq!(store.save_count(), 1);
        assert!(!store.snapshot().contains_key("/posts/hello"));
    }

    #[test]
    fn empty_page_set_touches_no_store() {
        let store = MemoryStore::new();
        let service = ShortenerService::new(internal(), &store);

        let err = service.run(&site(&["/"])).unwrap_err();

        assert!(matches!(err, ShortenerError::EmptyPageSet));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn generate_with_applies_outputs_to_site() {
        let config = ShortenerConfig::builder()
            .method("internal")
            .shorturl("https://s.example/")
            .pages(true)
            .build();
        let mut site = site(&["/", "/posts/hello"]);
        let store = MemoryStore::new();

        generate_with(&config, &mut site, &ProviderRegistry::new(), Path::new("/site"), |_| &store)
            .unwrap();

        assert!(site.pages[0].shorturl.is_none());
        assert_eq!(
            site.pages[1].shorturl.as_ref().map(ShortUrl::as_str),
            Some("https://s.example/u2gKGM")
        );
    }

    #[test]
    fn generate_with_does_not_open_store_on_config_error() {
        let config = ShortenerConfig::builder().method("internal").build();
        let mut site = site(&["/posts/hello"]);
        let mut opened = false;

        let err = generate_with(
            &config,
            &mut site,
            &ProviderRegistry::new(),
            Path::new("/site"),
            |_| {
                opened = true;
                MemoryStore::new()
            },
        )
        .unwrap_err();

        assert!(matches!(err, ShortenerError::Config(_)));
        assert!(!opened);
        assert!(site.pages[0].shorturl.is_none());
    }
}
