//! Decade patterns: "1990s", "the 1960s–70s".

use std::sync::LazyLock;

use regex::Regex;
use span_types::{PageContext, Precision, Span};

use super::{END, finish, label};
use crate::era::{self, EraPolicy};

static RE_DECADE: LazyLock<Regex> = LazyLock::new(|| {
    let era = &*era::MARKER_RE;
    Regex::new(&format!(
        r"(?i)^(?:the\s+)?(?P<d>\d{{1,3}}0)'?s(?:\s*(?P<era>{era}))?{END}"
    ))
    .expect("decade regex")
});

static RE_DECADE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let era = &*era::MARKER_RE;
    Regex::new(&format!(
        r"(?i)^(?:the\s+)?(?P<a>\d{{1,3}}0)'?s(?:\s*(?P<a_era>{era}))?\s*(?:-|\bto\b)\s*(?:the\s+)?'?(?P<b>\d{{1,3}}0)'?s(?:\s*(?P<b_era>{era}))?{END}"
    ))
    .expect("decade range regex")
});

/// Year magnitudes covered by a decade, in chronological order.
/// BC decades invert: the 1990s BC run from 1999 BC down to 1990 BC.
fn decade_bounds(d: u32, is_bc: bool) -> (u32, u32) {
    if is_bc { (d + 9, d) } else { (d, d + 9) }
}

/// Expand a two-digit second decade ("1960s-70s") using the first decade's
/// century, rolling over when it would precede the first.
fn expand_short_decade(first: u32, short: &str) -> Option<u32> {
    let n: u32 = short.parse().ok()?;
    if short.len() != 2 || first < 100 {
        return Some(n);
    }
    let candidate = first / 100 * 100 + n;
    Some(if candidate < first { candidate + 100 } else { candidate })
}

/// "1990s" → 1990..1999 AD. Decades read as AD unless the text carries a
/// BC marker or the page context is explicitly BC.
pub fn decade(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_DECADE.captures(text)?;
    let d: u32 = caps.name("d")?.as_str().parse().ok()?;
    let marker = caps.name("era").and_then(|m| era::parse_marker(m.as_str()));
    let is_bc = era::resolve_single(marker, page);
    let (start, end) = decade_bounds(d, is_bc);
    finish(Span::years(
        start,
        is_bc,
        end,
        is_bc,
        Precision::YearOnly,
        label("Decade", &caps),
    ))
}

/// "1960s–1970s" → 1960..1979; "490s–480s BC" → 499..480 BC.
pub fn decade_range(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_DECADE_RANGE.captures(text)?;
    let a: u32 = caps.name("a")?.as_str().parse().ok()?;
    let b = expand_short_decade(a, caps.name("b")?.as_str())?;
    let a_era = caps.name("a_era").and_then(|m| era::parse_marker(m.as_str()));
    let b_era = caps.name("b_era").and_then(|m| era::parse_marker(m.as_str()));
    let (start_bc, end_bc) = era::resolve_pair(a_era, b_era, EraPolicy::Propagate, page)?;
    let (start, _) = decade_bounds(a, start_bc);
    let (_, end) = decade_bounds(b, end_bc);
    finish(Span::years(
        start,
        start_bc,
        end,
        end_bc,
        Precision::YearOnly,
        label("Decade range", &caps),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(is_bc: Option<bool>) -> PageContext {
        PageContext::new(1990, is_bc)
    }

    fn years(s: &Span) -> (u32, bool, u32, bool) {
        (s.start_year, s.start_year_is_bc, s.end_year, s.end_year_is_bc)
    }

    #[test]
    fn test_decade_ad() {
        for p in [page(Some(false)), page(None)] {
            let s = decade("1990s", &p).unwrap();
            assert_eq!(years(&s), (1990, false, 1999, false));
            assert_eq!(s.precision, Precision::YearOnly);
        }
        let s = decade("the 1960's", &page(None)).unwrap();
        assert_eq!(years(&s), (1960, false, 1969, false));
    }

    #[test]
    fn test_decade_inverts_on_bc_page() {
        let s = decade("1990s", &page(Some(true))).unwrap();
        assert_eq!(years(&s), (1999, true, 1990, true));
    }

    #[test]
    fn test_decade_marker_overrides_page() {
        let s = decade("490s BC", &page(Some(false))).unwrap();
        assert_eq!(years(&s), (499, true, 490, true));
        let s = decade("1990s AD", &page(Some(true))).unwrap();
        assert_eq!(years(&s), (1990, false, 1999, false));
    }

    #[test]
    fn test_decade_rejects_non_decades() {
        assert!(decade("1995s", &page(None)).is_none());
        assert!(decade("1990", &page(None)).is_none());
        assert!(decade("0s", &page(None)).is_none());
        assert!(decade("1990s-2000s", &page(None)).is_some());
    }

    #[test]
    fn test_decade_range_full_and_short() {
        let s = decade_range("1960s-1970s", &page(None)).unwrap();
        assert_eq!(years(&s), (1960, false, 1979, false));
        let s = decade_range("1960s-70s", &page(None)).unwrap();
        assert_eq!(years(&s), (1960, false, 1979, false));
        let s = decade_range("1990s-00s", &page(None)).unwrap();
        assert_eq!(years(&s), (1990, false, 2009, false));
    }

    #[test]
    fn test_decade_range_bc() {
        let s = decade_range("490s-480s BC", &page(None)).unwrap();
        assert_eq!(years(&s), (499, true, 480, true));
    }

    #[test]
    fn test_decade_range_rejects_reversed() {
        assert!(decade_range("1970s-1960s", &page(None)).is_none());
    }
}
