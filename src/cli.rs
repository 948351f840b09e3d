//! Command-line interface parsing for cbsrates
//!
//! Every flag is optional. With none given the run uses the built-in page URL,
//! cache path and headless Chromium.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::{Config, Extraction};
use crate::fetch::FetcherKind;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified fetcher name is not recognized
    #[error("Invalid fetcher: '{0}'. Valid fetchers: chromium, http")]
    InvalidFetcher(String),

    /// The specified extraction mode is not recognized
    #[error("Invalid extraction mode: '{0}'. Valid modes: table, lines")]
    InvalidExtraction(String),
}

/// cbsrates - Central Bank of Seychelles daily exchange rates
#[derive(Parser, Debug)]
#[command(name = "cbsrates")]
#[command(about = "Print today's CBS buying, selling and mid rates for USD, EUR and GBP")]
#[command(version)]
pub struct Cli {
    /// Rates page to render
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// File the rendered page is cached in
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// How to download the page: chromium (default) or http
    #[arg(long, value_name = "FETCHER")]
    pub fetcher: Option<String>,

    /// Chromium executable to launch instead of the auto-detected one
    #[arg(long, value_name = "PATH")]
    pub chromium: Option<PathBuf>,

    /// How to locate rate rows: table (default) or lines
    #[arg(long, value_name = "MODE")]
    pub extract: Option<String>,
}

/// Settings derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Pipeline configuration
    pub config: Config,
    /// Which renderer to build
    pub fetcher: FetcherKind,
    /// Chromium binary override
    pub chromium: Option<PathBuf>,
}

/// Parses a fetcher name argument.
pub fn parse_fetcher_arg(s: &str) -> Result<FetcherKind, CliError> {
    FetcherKind::from_str(s).ok_or_else(|| CliError::InvalidFetcher(s.to_string()))
}

/// Parses an extraction mode argument.
pub fn parse_extraction_arg(s: &str) -> Result<Extraction, CliError> {
    Extraction::from_str(s).ok_or_else(|| CliError::InvalidExtraction(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with defaults replaced by any given flags
    /// * `Err(CliError)` if a fetcher or extraction name is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut startup = StartupConfig::default();

        if let Some(url) = &cli.url {
            startup.config.url = url.clone();
        }
        if let Some(cache) = &cli.cache {
            startup.config.cache_path = cache.clone();
        }
        if let Some(extract) = &cli.extract {
            startup.config.extraction = parse_extraction_arg(extract)?;
        }
        if let Some(fetcher) = &cli.fetcher {
            startup.fetcher = parse_fetcher_arg(fetcher)?;
        }
        startup.chromium = cli.chromium.clone();

        Ok(startup)
    }
}
