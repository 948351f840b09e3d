//! Run orchestration
//!
//! Decides whether today's page has to be fetched, keeps the cache file in
//! step, then prints each configured currency's rates in order.

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::RatesCache;
use crate::config::{Config, Extraction};
use crate::fetch::{FetchError, PageRenderer};
use crate::rates::{self, Currency, RateLookup};

/// Fatal errors that end a run
#[derive(Debug, Error)]
pub enum RunError {
    /// Rendering the rates page failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The rendered page could not be cached
    #[error("Failed to write to cache file {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No page was fetched and the cache could not be read
    #[error("Could not read an old rates file from {path}: {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Printing to the console failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// What a run does about the rates page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// The bank publishes nothing on weekends, so use whatever is cached
    SkipWeekend,
    /// The cache is missing or stale and today is a business day
    NeedFetch,
    /// The cache was already written today
    CacheFresh,
}

impl Schedule {
    /// Chooses the schedule for `today` given the cache state.
    pub fn decide(today: NaiveDate, cache: &RatesCache) -> Self {
        if is_weekend(today) {
            Schedule::SkipWeekend
        } else if !cache.is_fresh(today) {
            Schedule::NeedFetch
        } else {
            Schedule::CacheFresh
        }
    }
}

/// Saturday and Sunday carry no rate updates
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Looks up one currency with the configured extraction strategy.
pub fn lookup(currency: Currency, document: &str, extraction: Extraction) -> RateLookup {
    match extraction {
        Extraction::Table => rates::find_rate_row(currency, document),
        Extraction::Lines => match rates::extract_section(currency.code(), document) {
            Some(section) => rates::parse_section(section),
            None => RateLookup::NotFound,
        },
    }
}

/// Drives one run of the rates pipeline.
pub struct App<'a> {
    config: Config,
    cache: RatesCache,
    renderer: &'a dyn PageRenderer,
}

impl<'a> App<'a> {
    /// Creates an app that renders pages with `renderer`.
    pub fn new(config: Config, renderer: &'a dyn PageRenderer) -> Self {
        let cache = RatesCache::new(config.cache_path.clone());
        Self {
            config,
            cache,
            renderer,
        }
    }

    /// Returns the rates page to use for `today`, fetching it if needed.
    pub async fn load_document(&self, today: NaiveDate) -> Result<String, RunError> {
        let schedule = Schedule::decide(today, &self.cache);
        info!(?schedule, %today, "schedule decided");

        let mut document = None;
        if schedule == Schedule::NeedFetch {
            info!(url = %self.config.url, "fetching rates page");
            let page = self.renderer.render(&self.config.url).await?;
            debug!(bytes = page.len(), "rates page rendered");

            self.cache
                .write(&page)
                .map_err(|source| RunError::CacheWrite {
                    path: self.cache.path().to_path_buf(),
                    source,
                })?;
            info!(path = %self.cache.path().display(), "rates page cached");
            document = Some(page);
        }

        match document {
            Some(page) => Ok(page),
            None => {
                let page = self.cache.read().map_err(|source| RunError::CacheRead {
                    path: self.cache.path().to_path_buf(),
                    source,
                })?;
                info!(path = %self.cache.path().display(), "using cached rates page");
                Ok(page)
            }
        }
    }

    /// Loads the page for `today` and prints every configured currency to `out`.
    pub async fn run<W: Write>(&self, today: NaiveDate, out: &mut W) -> Result<(), RunError> {
        let document = self.load_document(today).await?;

        for &currency in &self.config.currencies {
            let result = lookup(currency, &document, self.config.extraction);
            match &result {
                RateLookup::Found(_) => debug!(%currency, "rates found"),
                RateLookup::NotFound => warn!(%currency, "currency not present in rates page"),
                RateLookup::Malformed(reason) => warn!(%currency, "incomplete rate row: {reason}"),
            }
            rates::print_lookup(&result, out)?;
        }

        out.flush()?;
        Ok(())
    }
}
