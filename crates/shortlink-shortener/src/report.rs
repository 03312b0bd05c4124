use crate::LOG_TARGET;
use shortlink_core::{GenerationError, ShortUrl};
use std::collections::BTreeMap;
use tracing::{error, info};

/// What happened to one selected page.
#[derive(Debug, Clone)]
pub enum PageOutcome {
    /// The page has a short URL; `cached` tells whether it came from the
    /// cache rather than being generated in this run.
    Assigned {
        key: String,
        url: ShortUrl,
        cached: bool,
    },
    /// No short URL could be produced; the page keeps none.
    Skipped { key: String, error: GenerationError },
}

impl PageOutcome {
    pub fn key(&self) -> &str {
        match self {
            PageOutcome::Assigned { key, .. } | PageOutcome::Skipped { key, .. } => key,
        }
    }
}

/// Result of a completed run, one outcome per selected page in order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub method: String,
    pub outcomes: Vec<PageOutcome>,
}

impl RunReport {
    /// Pages that received a URL, with the URL.
    pub fn assigned(&self) -> impl Iterator<Item = (&str, &ShortUrl)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            PageOutcome::Assigned { key, url, .. } => Some((key.as_str(), url)),
            PageOutcome::Skipped { .. } => None,
        })
    }

    /// Pages that were skipped, with the reason.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &GenerationError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            PageOutcome::Skipped { key, error } => Some((key.as_str(), error)),
            PageOutcome::Assigned { .. } => None,
        })
    }

    /// The `shorturl` output attribute of every assigned page, by key.
    pub fn outputs(&self) -> BTreeMap<String, ShortUrl> {
        self.assigned()
            .map(|(key, url)| (key.to_string(), url.clone()))
            .collect()
    }

    /// Number of URLs generated in this run (cache misses that succeeded).
    pub fn generated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PageOutcome::Assigned { cached: false, .. }))
            .count()
    }

    /// Emits the run's log lines.
    ///
    /// Skipped pages are always reported at error level. Per-page traces and
    /// the closing summary only appear with `debug`.
    pub fn log(&self, debug: bool) {
        for outcome in &self.outcomes {
            match outcome {
                PageOutcome::Skipped { key, error } => {
                    error!(target: LOG_TARGET, key = %key, method = %self.method, error = %error, "cannot shorten page");
                }
                PageOutcome::Assigned { key, url, cached } if debug => {
                    info!(target: LOG_TARGET, key = %key, url = %url, cached, "short url assigned");
                }
                PageOutcome::Assigned { .. } => {}
            }
        }

        if debug {
            info!(
                target: LOG_TARGET,
                method = %self.method,
                pages = self.outcomes.len(),
                generated = self.generated(),
                skipped = self.skipped().count(),
                "pages processed"
            );
        }
    }
}
