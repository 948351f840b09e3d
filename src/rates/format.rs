//! Console layout for a currency's rates

use super::RateLookup;
use std::io::{self, Write};

/// Printed when a currency has no complete rate row
pub const NO_RATES_MESSAGE: &str = "No rates found.";

/// Writes one currency's block to `out`.
///
/// A complete row prints four aligned fields and a blank line; anything else
/// prints [`NO_RATES_MESSAGE`].
pub fn print_lookup<W: Write>(lookup: &RateLookup, out: &mut W) -> io::Result<()> {
    match lookup {
        RateLookup::Found(rates) => {
            writeln!(out, "Currency: {}", rates.currency)?;
            writeln!(out, "Buying:   {}", rates.buying)?;
            writeln!(out, "Selling:  {}", rates.selling)?;
            writeln!(out, "Mid-rate: {}", rates.mid)?;
            writeln!(out)
        }
        RateLookup::NotFound | RateLookup::Malformed(_) => writeln!(out, "{NO_RATES_MESSAGE}"),
    }
}
