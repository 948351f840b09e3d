//! Run configuration
//!
//! Everything the pipeline needs to know about where to fetch from and where
//! to cache to. Defaults point at the Central Bank of Seychelles daily rates
//! page and a cache file in `/tmp`.

use std::path::PathBuf;

use crate::rates::Currency;

/// Page listing the daily indicative exchange rates
pub const DEFAULT_RATES_URL: &str = "https://www.cbs.sc/marketinfo/DailyRates.html";

/// Where the rendered page is kept between runs on the same day
pub const DEFAULT_CACHE_PATH: &str = "/tmp/cbsrates.html";

/// How a currency's row is located in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extraction {
    /// Parse the markup and find the table row by its header cell
    #[default]
    Table,
    /// Take the line holding the currency code plus the next four lines
    Lines,
}

impl Extraction {
    /// Parses an extraction mode name from the command line
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "tree" => Some(Extraction::Table),
            "lines" | "window" => Some(Extraction::Lines),
            _ => None,
        }
    }
}

/// Configuration for one run of the rates pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Page to render
    pub url: String,
    /// Cache file for the rendered page
    pub cache_path: PathBuf,
    /// Currencies to print, in order
    pub currencies: Vec<Currency>,
    /// Row lookup strategy
    pub extraction: Extraction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_RATES_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            currencies: Currency::ALL.to_vec(),
            extraction: Extraction::default(),
        }
    }
}
