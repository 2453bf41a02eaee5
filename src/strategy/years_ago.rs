//! Prehistoric "N years ago" patterns, anchored to the page year.

use std::sync::LazyLock;

use regex::Regex;
use span_types::{PageContext, Precision, Span, from_axis_year};

use super::{END, finish, label};
use crate::calendar::{MULTIPLIER_RE, QUANTITY_RE, parse_quantity};

// Real data examples:
//   250,000 years ago – earliest Homo sapiens
//   c. 10 thousand years ago
//   5-2 million years ago – Australopithecus
//   200,000–100,000 years ago

const APPROX: &str = r"(?:(?:about|around|approximately|roughly|some)\s+|(?:circa|ca\.|c\.)\s*|~\s*)?";

static RE_YEARS_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^{APPROX}(?P<n>{QUANTITY_RE})\s*(?P<mult>{MULTIPLIER_RE})?\s+years?\s+ago{END}"
    ))
    .expect("years ago regex")
});

static RE_YEARS_AGO_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^{APPROX}(?P<a>{QUANTITY_RE})\s*(?P<a_mult>{MULTIPLIER_RE})?\s*(?:-|\bto\b)\s*(?P<b>{QUANTITY_RE})\s*(?P<b_mult>{MULTIPLIER_RE})?\s+years?\s+ago{END}"
    ))
    .expect("years ago range regex")
});

/// BC magnitude of the year `offset` years before the page year.
/// `None` when the result is not BC or does not fit.
fn bc_year_before(page: &PageContext, offset: u64) -> Option<u32> {
    let offset = i64::try_from(offset).ok()?;
    let axis = page.axis_year().checked_sub(offset)?;
    match from_axis_year(axis)? {
        (year, true) => Some(year),
        (_, false) => None,
    }
}

/// "250,000 years ago": always BC, the page year minus the offset.
pub fn years_ago(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_YEARS_AGO.captures(text)?;
    let offset = parse_quantity(
        caps.name("n")?.as_str(),
        caps.name("mult").map(|m| m.as_str()),
    )?;
    let year = bc_year_before(page, offset)?;
    finish(Span::year(year, true, Precision::Circa, label("Years ago", &caps)))
}

/// "5-2 million years ago": a multiplier on the right side also scales a
/// bare left side.
pub fn years_ago_range(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_YEARS_AGO_RANGE.captures(text)?;
    let b_mult = caps.name("b_mult").map(|m| m.as_str());
    let a_mult = caps.name("a_mult").map(|m| m.as_str()).or(b_mult);
    let older = parse_quantity(caps.name("a")?.as_str(), a_mult)?;
    let newer = parse_quantity(caps.name("b")?.as_str(), b_mult)?;
    let start = bc_year_before(page, older)?;
    let end = bc_year_before(page, newer)?;
    finish(Span::years(
        start,
        true,
        end,
        true,
        Precision::Circa,
        label("Years ago range", &caps),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageContext {
        PageContext::new(2000, Some(false))
    }

    #[test]
    fn test_years_ago_comma_number() {
        let s = years_ago("250,000 years ago - earliest Homo sapiens", &page()).unwrap();
        // axis 2000 - 250000 = -248000 → 248001 BC
        assert_eq!(s.start_year, 248_001);
        assert_eq!(s.end_year, 248_001);
        assert!(s.start_year_is_bc && s.end_year_is_bc);
        assert_eq!(s.precision, Precision::Circa);
    }

    #[test]
    fn test_years_ago_multiplier_and_approx_prefix() {
        let s = years_ago("c. 10 thousand years ago", &page()).unwrap();
        assert_eq!(s.start_year, 8_001);
        let s = years_ago("about 2.5 million years ago", &page()).unwrap();
        assert_eq!(s.start_year, 2_498_001);
    }

    #[test]
    fn test_years_ago_bc_page_anchor() {
        let p = PageContext::new(500, Some(true));
        // axis -499 - 1000 = -1499 → 1500 BC
        let s = years_ago("1000 years ago", &p).unwrap();
        assert_eq!(s.start_year, 1500);
    }

    #[test]
    fn test_years_ago_landing_in_ad_is_no_match() {
        assert!(years_ago("50 years ago", &page()).is_none());
    }

    #[test]
    fn test_years_ago_range_shared_multiplier() {
        let s = years_ago_range("5-2 million years ago", &page()).unwrap();
        assert_eq!(s.start_year, 4_998_001);
        assert_eq!(s.end_year, 1_998_001);
        assert!(s.start_year_is_bc && s.end_year_is_bc);
    }

    #[test]
    fn test_years_ago_range_commas() {
        let s = years_ago_range("200,000-100,000 years ago", &page()).unwrap();
        assert_eq!((s.start_year, s.end_year), (198_001, 98_001));
    }

    #[test]
    fn test_years_ago_range_rejects_reversed() {
        assert!(years_ago_range("2-5 million years ago", &page()).is_none());
    }

    #[test]
    fn test_years_ago_single_does_not_take_ranges() {
        assert!(years_ago("5-2 million years ago", &page()).is_none());
    }
}
