//! Plain year patterns: single years, ranges, mirrored-era ranges and
//! circa forms.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use span_types::{PageContext, Precision, Span};

use super::{CIRCA, END, YearCapture, finish, finish_scaled, label, year_group};
use crate::era::{self, Era, EraPolicy};

// ── Patterns ─────────────────────────────────────────────────────────
//
// Real data examples:
//   490 BC – Battle of Marathon
//   AD 79 – Eruption of Vesuvius
//   8000-5000 BCE: domestication of wheat
//   220 BC – AD 200 Han dynasty
//   c. 450 BC, circa 1450, ~1450

/// Range separator: hyphen or the word "to".
const RANGE_SEP: &str = r"\s*(?:-|\bto\b)\s*";

static RE_EXPLICIT_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{}{END}", year_group("s"))).expect("explicit year regex")
});

static RE_YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^{}{RANGE_SEP}{}{END}",
        year_group("s"),
        year_group("e")
    ))
    .expect("year range regex")
});

static RE_CIRCA_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{CIRCA}\s*{}{END}", year_group("s"))).expect("circa year regex")
});

static RE_TILDE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^~\s*{}{END}", year_group("s"))).expect("tilde year regex")
});

static RE_CIRCA_YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:{CIRCA}|~)\s*{}{RANGE_SEP}(?:(?:{CIRCA}|~)\s*)?{}{END}",
        year_group("s"),
        year_group("e")
    ))
    .expect("circa year range regex")
});

// ── Helpers ──────────────────────────────────────────────────────────

fn single(caps: &Captures<'_>, page: &PageContext, precision: Precision, rule: &str) -> Option<Span> {
    let y = YearCapture::from_caps(caps, "s")?;
    let is_bc = era::resolve_single(y.marker().ok()?, page);
    Some(Span::year(y.year, is_bc, precision, label(rule, caps)))
}

fn range(
    caps: &Captures<'_>,
    page: &PageContext,
    precision: Precision,
    rule: &str,
) -> Option<Span> {
    let s = YearCapture::from_caps(caps, "s")?;
    let e = YearCapture::from_caps(caps, "e")?;
    let (start_bc, end_bc) =
        era::resolve_pair(s.marker().ok()?, e.marker().ok()?, EraPolicy::Propagate, page)?;
    Some(Span::years(
        s.year,
        start_bc,
        e.year,
        end_bc,
        precision,
        label(rule, caps),
    ))
}

// ── Strategies ───────────────────────────────────────────────────────

/// "490 BC", "AD 1066", "1066". Weight is scaled by precision.
pub fn explicit_year(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_EXPLICIT_YEAR.captures(text)?;
    finish_scaled(single(&caps, page, Precision::YearOnly, "Explicit year")?)
}

/// "8000-5000 BCE": a lone marker covers both years; BC on one side and
/// AD on the other is left to [`mirrored_era_range`].
pub fn year_range(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_YEAR_RANGE.captures(text)?;
    finish_scaled(range(&caps, page, Precision::YearOnly, "Year range")?)
}

/// "220 BC – AD 200": exactly one BC-class and one AD-class marker, one on
/// each endpoint. "AD 200 – 220 BC" runs backwards and fails validation.
pub fn mirrored_era_range(text: &str, _page: &PageContext) -> Option<Span> {
    let caps = RE_YEAR_RANGE.captures(text)?;
    let s = YearCapture::from_caps(&caps, "s")?;
    let e = YearCapture::from_caps(&caps, "e")?;
    let (start_era, end_era) = match (s.marker().ok()?, e.marker().ok()?) {
        (Some(a), Some(b)) if a != b => (a, b),
        _ => return None,
    };
    finish_scaled(Span::years(
        s.year,
        start_era == Era::Bc,
        e.year,
        end_era == Era::Bc,
        Precision::YearOnly,
        label("Mirrored era range", &caps),
    ))
}

/// "c. 450 BC", "ca. 1450", "circa 1450".
pub fn circa_year(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_CIRCA_YEAR.captures(text)?;
    finish(single(&caps, page, Precision::Circa, "Circa year")?)
}

/// "~1450".
pub fn tilde_circa_year(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_TILDE_YEAR.captures(text)?;
    finish(single(&caps, page, Precision::Circa, "Tilde circa year")?)
}

/// "c. 1450–1500", "c. 2500 – c. 2000 BC". Era rules as [`year_range`].
pub fn circa_year_range(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_CIRCA_YEAR_RANGE.captures(text)?;
    finish(range(&caps, page, Precision::Circa, "Circa year range")?)
}
