//! Cache module for storing the fetched rates page on disk
//!
//! The rates page only changes once per business day, so the rendered markup
//! is kept in a single file and reused for the rest of the calendar day.

mod manager;

pub use manager::RatesCache;
