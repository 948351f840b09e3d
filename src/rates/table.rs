//! Document-tree extraction
//!
//! Locates a currency's row by structure rather than line layout: the first
//! `<tr>` whose header cell reads exactly the currency code, and the data
//! cells that follow it.

use super::{is_rate_value, Currency, RateLookup, RateTuple};
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Data cells expected after the currency header: buying, selling, mid
const RATE_CELLS: usize = 3;

fn row_selector() -> &'static Selector {
    static ROW: OnceLock<Selector> = OnceLock::new();
    ROW.get_or_init(|| Selector::parse("tr").expect("row selector is valid"))
}

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Returns the row's own header cell, ignoring any nested tables
fn header_cell(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "th")
}

/// Finds the rate row for `currency` in the rendered rates page.
///
/// Only the data cells directly after the header cell count; anything before
/// it, or a non-`<td>` sibling in the way, makes the row malformed.
pub fn find_rate_row(currency: Currency, document: &str) -> RateLookup {
    let html = Html::parse_document(document);

    let code = currency.code();
    let header = html
        .select(row_selector())
        .filter_map(header_cell)
        .find(|th| cell_text(*th) == code);

    let Some(th) = header else {
        return RateLookup::NotFound;
    };

    let mut cells = Vec::with_capacity(RATE_CELLS);
    for sibling in th.next_siblings().filter_map(ElementRef::wrap).take(RATE_CELLS) {
        if sibling.value().name() != "td" {
            break;
        }
        cells.push(cell_text(sibling));
    }

    if cells.len() < RATE_CELLS || !cells.iter().all(|c| is_rate_value(c)) {
        return RateLookup::Malformed(format!(
            "row for {code} has cells {cells:?}, expected {RATE_CELLS} decimal rates"
        ));
    }

    let mut cells = cells.into_iter();
    RateLookup::Found(RateTuple {
        currency: code.to_string(),
        buying: cells.next().unwrap_or_default(),
        selling: cells.next().unwrap_or_default(),
        mid: cells.next().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/daily_rates.html");

    #[test]
    fn test_finds_complete_rows() {
        let usd = find_rate_row(Currency::Usd, FIXTURE);
        let usd = usd.found().expect("USD row should be complete");
        assert_eq!(usd.currency, "USD");
        assert_eq!(usd.buying, "14.1021");
        assert_eq!(usd.selling, "14.6734");
        assert_eq!(usd.mid, "14.3878");

        let eur = find_rate_row(Currency::Eur, FIXTURE);
        assert_eq!(eur.found().map(|r| r.mid.as_str()), Some("16.7283"));
    }

    #[test]
    fn test_partial_row_is_malformed() {
        let gbp = find_rate_row(Currency::Gbp, FIXTURE);
        match gbp {
            RateLookup::Malformed(reason) => assert!(reason.contains("GBP")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_currency_is_not_found() {
        let doc = "<table><tr><th>USD</th><td>1.0</td><td>2.0</td><td>1.5</td></tr></table>";
        assert_eq!(find_rate_row(Currency::Eur, doc), RateLookup::NotFound);
    }

    #[test]
    fn test_ignores_layout_and_attributes() {
        let doc = r#"<table><tbody><tr class="x"><th
            data-foo="bar">  EUR </th><td class="a">16.1</td>
            <td>17.2</td><td>16.65</td></tr></tbody></table>"#;

        let eur = find_rate_row(Currency::Eur, doc);
        assert_eq!(
            eur,
            RateLookup::Found(RateTuple {
                currency: "EUR".to_string(),
                buying: "16.1".to_string(),
                selling: "17.2".to_string(),
                mid: "16.65".to_string(),
            })
        );
    }

    #[test]
    fn test_code_in_other_text_does_not_match() {
        let doc = "<p>Rates for USD and EUR</p><table><tr><th>Currency</th></tr>\
                   <tr><th>USD</th><td>1.1</td><td>1.2</td><td>1.15</td></tr></table>";
        assert_eq!(
            find_rate_row(Currency::Usd, doc).found().map(|r| r.buying.as_str()),
            Some("1.1")
        );
    }

    #[test]
    fn test_first_matching_row_wins() {
        let doc = "<table>\
                   <tr><th>USD</th><td>1.1</td><td>1.2</td><td>1.15</td></tr>\
                   <tr><th>USD</th><td>9.1</td><td>9.2</td><td>9.15</td></tr>\
                   </table>";
        assert_eq!(
            find_rate_row(Currency::Usd, doc).found().map(|r| r.buying.as_str()),
            Some("1.1")
        );
    }

    #[test]
    fn test_too_few_cells_is_malformed() {
        let doc = "<table><tr><th>USD</th><td>1.1</td></tr></table>";
        assert!(matches!(
            find_rate_row(Currency::Usd, doc),
            RateLookup::Malformed(_)
        ));
    }

    #[test]
    fn test_cells_before_header_are_ignored() {
        let doc = "<table><tr><td>9.9</td><th>USD</th><td>1.1</td><td>1.2</td></tr></table>";
        assert!(matches!(
            find_rate_row(Currency::Usd, doc),
            RateLookup::Malformed(_)
        ));
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        let doc = "<table><tr><th>USD</th><td>١٤.١</td><td>١٤.٦</td><td>١٤.٣</td></tr></table>";
        assert!(matches!(
            find_rate_row(Currency::Usd, doc),
            RateLookup::Malformed(_)
        ));
    }
}
