//! Line-window extraction
//!
//! The rates page lays every currency row out over the same number of lines:
//! the header cell carrying the code, then the cells and closing tag. Taking
//! the matching line plus a fixed number of followers isolates one row
//! without parsing the document.

use super::{RateLookup, RateTuple};
use regex::Regex;
use std::sync::OnceLock;

/// Lines captured after the one containing the currency code
pub const SECTION_TRAILING_LINES: usize = 4;

/// Header cell followed by three decimal data cells
const ROW_PATTERN: &str = r"<th[^>]*>\s*([A-Za-z0-9_]+)\s*</th>\s*<td[^>]*>\s*([0-9]+\.[0-9]+)\s*</td>\s*<td[^>]*>\s*([0-9]+\.[0-9]+)\s*</td>\s*<td[^>]*>\s*([0-9]+\.[0-9]+)\s*</td>";

/// Any header cell, used to tell a partial row from a missing one
const HEADER_PATTERN: &str = r"<th[^>]*>\s*([A-Za-z0-9_]+)\s*</th>";

fn row_regex() -> &'static Regex {
    static ROW: OnceLock<Regex> = OnceLock::new();
    ROW.get_or_init(|| Regex::new(ROW_PATTERN).expect("row pattern is valid"))
}

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(HEADER_PATTERN).expect("header pattern is valid"))
}

/// Returns the section of `document` holding the row for `code`.
///
/// The section is the first line containing `code` (case-sensitive) plus the
/// next [`SECTION_TRAILING_LINES`] lines, whatever they contain. Later
/// occurrences of the code are ignored. Returns `None` when the code never
/// appears or too few lines follow it.
pub fn extract_section<'a>(code: &str, document: &'a str) -> Option<&'a str> {
    let at = document.find(code)?;
    let line_start = document[..at].rfind('\n').map_or(0, |i| i + 1);

    let mut newlines = document[at..].match_indices('\n').map(|(i, _)| at + i);
    newlines.nth(SECTION_TRAILING_LINES - 1)?;
    let end = newlines.next().unwrap_or(document.len());

    Some(&document[line_start..end])
}

/// Pulls the rate row out of a section returned by [`extract_section`].
///
/// A section with a header cell but without three decimal cells after it is
/// reported as malformed; one without any header cell as not found.
pub fn parse_section(section: &str) -> RateLookup {
    if let Some(caps) = row_regex().captures(section) {
        return RateLookup::Found(RateTuple {
            currency: caps[1].to_string(),
            buying: caps[2].to_string(),
            selling: caps[3].to_string(),
            mid: caps[4].to_string(),
        });
    }

    match header_regex().captures(section) {
        Some(caps) => RateLookup::Malformed(format!(
            "row for {} does not have three decimal rate cells",
            &caps[1]
        )),
        None => RateLookup::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/daily_rates.html");

    #[test]
    fn test_section_is_matched_line_plus_four() {
        let doc = "a\nb USD c\n1\n2\n3\n4\n5\n";
        assert_eq!(extract_section("USD", doc), Some("b USD c\n1\n2\n3\n4"));
    }

    #[test]
    fn test_section_at_end_of_document() {
        let doc = "USD\n1\n2\n3\n4";
        assert_eq!(extract_section("USD", doc), Some("USD\n1\n2\n3\n4"));
    }

    #[test]
    fn test_section_uses_first_occurrence() {
        let doc = "x\nfirst USD\na\nb\nc\nd\nsecond USD\ne\nf\ng\nh\n";
        assert_eq!(extract_section("USD", doc), Some("first USD\na\nb\nc\nd"));
    }

    #[test]
    fn test_section_is_case_sensitive() {
        let doc = "usd\n1\n2\n3\n4\n";
        assert_eq!(extract_section("USD", doc), None);
    }

    #[test]
    fn test_section_missing_code() {
        assert_eq!(extract_section("GBP", "USD\n1\n2\n3\n4\n"), None);
    }

    #[test]
    fn test_section_too_few_following_lines() {
        assert_eq!(extract_section("USD", "USD\n1\n2\n3"), None);
    }

    #[test]
    fn test_section_is_idempotent() {
        let first = extract_section("EUR", FIXTURE);
        let second = extract_section("EUR", FIXTURE);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_section_from_fixture_spans_five_lines() {
        let section = extract_section("USD", FIXTURE).unwrap();
        let lines: Vec<&str> = section.lines().collect();
        assert_eq!(lines.len(), SECTION_TRAILING_LINES + 1);
        assert!(lines[0].contains(">USD</th>"));
        assert_eq!(lines[4], "</tr>");
    }

    #[test]
    fn test_parse_section_found() {
        let section = extract_section("USD", FIXTURE).unwrap();
        assert_eq!(
            parse_section(section),
            RateLookup::Found(RateTuple {
                currency: "USD".to_string(),
                buying: "14.1021".to_string(),
                selling: "14.6734".to_string(),
                mid: "14.3878".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_section_partial_row_is_malformed() {
        let section = extract_section("GBP", FIXTURE).unwrap();
        assert!(matches!(parse_section(section), RateLookup::Malformed(_)));
    }

    #[test]
    fn test_parse_section_without_row_is_not_found() {
        assert_eq!(parse_section("plain text\nno table here"), RateLookup::NotFound);
    }

    #[test]
    fn test_parse_section_rejects_integer_rates() {
        let section = "<th>USD</th>\n<td>14</td>\n<td>15</td>\n<td>14.5</td>";
        assert!(matches!(parse_section(section), RateLookup::Malformed(_)));
    }

    #[test]
    fn test_parse_section_rejects_non_ascii_digits() {
        let section = "<th>USD</th>\n<td>١٤.١</td>\n<td>١٤.٦</td>\n<td>١٤.٣</td>";
        assert!(matches!(parse_section(section), RateLookup::Malformed(_)));
    }
}
