//! Month and day patterns. Without an explicit year they sit inside the
//! page year and era; only the sub-year fields vary.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use span_types::{PageContext, Precision, Span};

use super::{END, YearCapture, finish, label, year_group};
use crate::calendar::{MONTH_RE, SEASON_RE, days_in_month, parse_month, season_bounds};
use crate::era::{self, EraPolicy};

// ── Patterns ─────────────────────────────────────────────────────────
//
// Real data examples:
//   September 25 – Hurricane makes landfall
//   25–28 September: summit in Geneva
//   September 28 – October 2
//   March 15, 44 BC – Assassination of Julius Caesar
//   December 7, 1941 – September 2, 1945
//   Summer 1969, Sept. 1990
//
// Each shape comes month-first and day-first; both regexes are tried in
// that order.

fn month(tag: &str) -> String {
    format!(r"(?P<{tag}>{MONTH_RE})")
}

fn day(tag: &str) -> String {
    format!(r"(?P<{tag}>\d{{1,2}})(?:st|nd|rd|th)?")
}

fn both_orders(month_first: String, day_first: String, what: &str) -> [Regex; 2] {
    [month_first, day_first].map(|p| Regex::new(&format!(r"(?i)^{p}{END}")).expect(what))
}

static RE_MONTH_DAY: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    both_orders(
        format!(r"{}\s+{}", month("m"), day("d")),
        format!(r"{}\s+{}", day("d"), month("m")),
        "month day",
    )
});

static RE_MONTH_DAY_RANGE: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    both_orders(
        format!(r"{}\s+{}\s*-\s*{}", month("m"), day("d1"), day("d2")),
        format!(r"{}\s*-\s*{}\s+{}", day("d1"), day("d2"), month("m")),
        "month day range",
    )
});

static RE_CROSS_MONTH: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    both_orders(
        format!(
            r"{}\s+{}\s*-\s*{}\s+{}",
            month("m1"),
            day("d1"),
            month("m2"),
            day("d2")
        ),
        format!(
            r"{}\s+{}\s*-\s*{}\s+{}",
            day("d1"),
            month("m1"),
            day("d2"),
            month("m2")
        ),
        "cross-month range",
    )
});

static RE_MONTH_DAY_YEAR: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    both_orders(
        format!(r"{}\s+{},?\s+{}", month("m"), day("d"), year_group("y")),
        format!(r"{}\s+{},?\s+{}", day("d"), month("m"), year_group("y")),
        "month day year",
    )
});

static RE_MULTI_YEAR: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    both_orders(
        format!(
            r"{}\s+{},?\s+{}\s*-\s*{}\s+{},?\s+{}",
            month("m1"),
            day("d1"),
            year_group("s"),
            month("m2"),
            day("d2"),
            year_group("e")
        ),
        format!(
            r"{}\s+{},?\s+{}\s*-\s*{}\s+{},?\s+{}",
            day("d1"),
            month("m1"),
            year_group("s"),
            day("d2"),
            month("m2"),
            year_group("e")
        ),
        "multi-year month day range",
    )
});

/// A bare month or season word must end the text or be followed by a
/// separator. "March on Rome" and "Winter War" are names, not dates.
const BARE_TAIL: &str = r"\s*(?:[:;,-]|$)";

static RE_MONTH_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^{}(?:,?\s+{}{END}|{BARE_TAIL})",
        month("m"),
        year_group("y")
    ))
    .expect("month only regex")
});

static RE_SEASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<season>{SEASON_RE})(?:\s+(?:of\s+)?{}{END}|{BARE_TAIL})",
        year_group("y")
    ))
    .expect("season regex")
});

// ── Helpers ──────────────────────────────────────────────────────────

fn captures<'h>(res: &[Regex], text: &'h str) -> Option<Captures<'h>> {
    res.iter().find_map(|re| re.captures(text))
}

fn month_of(caps: &Captures<'_>, name: &str) -> Option<u8> {
    parse_month(caps.name(name)?.as_str())
}

fn day_of(caps: &Captures<'_>, name: &str) -> Option<u8> {
    caps.name(name)?.as_str().parse().ok()
}

/// A sub-year span inside the page year.
fn in_page_year(
    page: &PageContext,
    start: (u8, u8),
    end: (u8, u8),
    rule: &str,
    caps: &Captures<'_>,
) -> Option<Span> {
    finish(
        Span::year(page.year, page.assume_bc(), Precision::Exact, label(rule, caps))
            .with_start_date(start.0, start.1)
            .with_end_date(end.0, end.1),
    )
}

/// Year magnitude and era of an optional trailing year. A short bare
/// number after a month ("May 5") is a day, not a year.
fn stated_year(caps: &Captures<'_>, page: &PageContext) -> Option<(u32, bool)> {
    match YearCapture::from_caps(caps, "y") {
        None => Some((page.year, page.assume_bc())),
        Some(y) => {
            let marker = y.marker().ok()?;
            if marker.is_none() && y.year < 100 {
                return None;
            }
            Some((y.year, era::resolve_single(marker, page)))
        }
    }
}

// ── Strategies ───────────────────────────────────────────────────────

/// "September 25", "25 September".
pub fn month_day(text: &str, page: &PageContext) -> Option<Span> {
    let caps = captures(&*RE_MONTH_DAY, text)?;
    let m = month_of(&caps, "m")?;
    let d = day_of(&caps, "d")?;
    in_page_year(page, (m, d), (m, d), "Month day", &caps)
}

/// "September 25–28", "25–28 September".
pub fn month_day_range(text: &str, page: &PageContext) -> Option<Span> {
    let caps = captures(&*RE_MONTH_DAY_RANGE, text)?;
    let m = month_of(&caps, "m")?;
    let d1 = day_of(&caps, "d1")?;
    let d2 = day_of(&caps, "d2")?;
    in_page_year(page, (m, d1), (m, d2), "Month day range", &caps)
}

/// "September 28 – October 2".
pub fn cross_month_range(text: &str, page: &PageContext) -> Option<Span> {
    let caps = captures(&*RE_CROSS_MONTH, text)?;
    let start = (month_of(&caps, "m1")?, day_of(&caps, "d1")?);
    let end = (month_of(&caps, "m2")?, day_of(&caps, "d2")?);
    in_page_year(page, start, end, "Cross-month range", &caps)
}

/// "September 28, 2020", "28 September 2020", "March 15, 44 BC".
pub fn month_day_year(text: &str, page: &PageContext) -> Option<Span> {
    let caps = captures(&*RE_MONTH_DAY_YEAR, text)?;
    let m = month_of(&caps, "m")?;
    let d = day_of(&caps, "d")?;
    let y = YearCapture::from_caps(&caps, "y")?;
    let is_bc = era::resolve_single(y.marker().ok()?, page);
    finish(
        Span::year(y.year, is_bc, Precision::Exact, label("Month day year", &caps))
            .with_start_date(m, d)
            .with_end_date(m, d),
    )
}

/// "September 28, 2020 – October 2, 2021". Explicit years override the
/// page; a lone marker covers both sides, two markers are kept.
pub fn multi_year_range(text: &str, page: &PageContext) -> Option<Span> {
    let caps = captures(&*RE_MULTI_YEAR, text)?;
    let s = YearCapture::from_caps(&caps, "s")?;
    let e = YearCapture::from_caps(&caps, "e")?;
    let (start_bc, end_bc) =
        era::resolve_pair(s.marker().ok()?, e.marker().ok()?, EraPolicy::KeepExplicit, page)?;
    finish(
        Span::years(
            s.year,
            start_bc,
            e.year,
            end_bc,
            Precision::Exact,
            label("Multi-year month day range", &caps),
        )
        .with_start_date(month_of(&caps, "m1")?, day_of(&caps, "d1")?)
        .with_end_date(month_of(&caps, "m2")?, day_of(&caps, "d2")?),
    )
}

/// "September", "September 1990": the whole month.
pub fn month_only(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_MONTH_ONLY.captures(text)?;
    let m = month_of(&caps, "m")?;
    let (year, is_bc) = stated_year(&caps, page)?;
    let last = days_in_month(year, is_bc, m)?;
    finish(
        Span::year(year, is_bc, Precision::MonthOnly, label("Month only", &caps))
            .with_start_date(m, 1)
            .with_end_date(m, last),
    )
}

/// "Summer 1969", "Winter": a fixed block of months in one year.
pub fn season(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_SEASON.captures(text)?;
    let season = caps.name("season")?;
    let ((sm, sd), (em, ed)) = season_bounds(season.as_str())?;
    let (year, is_bc) = stated_year(&caps, page)?;
    let ed = if em == 2 { days_in_month(year, is_bc, em)? } else { ed };
    finish(
        Span::year(year, is_bc, Precision::SeasonOnly, label("Season", &caps))
            .with_start_date(sm, sd)
            .with_end_date(em, ed),
    )
}
