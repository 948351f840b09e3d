//! Exchange rate models and extraction
//!
//! Two ways of pulling a currency's row out of the rates page live here:
//! `table` walks the parsed document tree, `extract` slices a fixed window of
//! lines around the currency code and pattern-matches it. Both report through
//! [`RateLookup`] so absent or partial rows are handled the same way.

pub mod extract;
pub mod format;
pub mod table;

pub use extract::{extract_section, parse_section};
pub use format::print_lookup;
pub use table::find_rate_row;

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Currencies published on the daily rates page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// All supported currencies in print order
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Gbp];

    /// ISO 4217 code as it appears in the page
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One currency's rates, kept exactly as the page renders them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTuple {
    /// Label from the row's header cell
    pub currency: String,
    pub buying: String,
    pub selling: String,
    pub mid: String,
}

/// Outcome of looking up a currency's row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLookup {
    /// A complete row with all three rates
    Found(RateTuple),
    /// Nothing in the document refers to the currency
    NotFound,
    /// The currency's row exists but its rate cells are missing or not numeric
    Malformed(String),
}

impl RateLookup {
    /// Returns the rates if the row was complete
    pub fn found(&self) -> Option<&RateTuple> {
        match self {
            RateLookup::Found(rates) => Some(rates),
            _ => None,
        }
    }
}

/// Reports whether `s` is a decimal with a mandatory fractional part
pub(crate) fn is_rate_value(s: &str) -> bool {
    static RATE_VALUE: OnceLock<Regex> = OnceLock::new();
    RATE_VALUE
        .get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("rate value pattern is valid"))
        .is_match(s)
}
