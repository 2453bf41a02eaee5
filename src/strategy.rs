//! Single-pattern date recognizers.
//!
//! Every pattern family is one variant of the closed [`Strategy`] enum and
//! is dispatched through one `match`. Each recognizer takes dash-normalized,
//! trimmed text plus the page context and returns a validated [`Span`] or
//! `None`. Patterns are anchored at the start of the text, except the
//! parenthesized family which reads a trailing `(...)` qualifier.

mod century;
mod decade;
mod fallback;
mod month_day;
mod parenthesized;
mod year;
mod years_ago;

use regex::Captures;
use span_types::{PageContext, Span};
use tracing::trace;

use crate::calendar::normalize_dashes;
use crate::weight;

pub use parenthesized::{ParenShape, Parenthesized};

// ── Shared regex fragments ───────────────────────────────────────────

/// Right edge of a pattern: a non-word character or end of text.
pub(crate) const END: &str = r"(?:\W|$)";

/// Circa prefixes: "circa", "ca.", "c.", "c".
pub(crate) const CIRCA: &str = r"(?:circa|ca\.?|c\.|c)";

/// One year endpoint with optional leading and trailing era markers.
/// Group names are prefixed with `tag`: `{tag}_pre`, `{tag}_year`, `{tag}_suf`.
pub(crate) fn year_group(tag: &str) -> String {
    let era = &*crate::era::MARKER_RE;
    let num = crate::calendar::NUMBER_RE;
    format!(r"(?:(?P<{tag}_pre>{era})\s*)?(?P<{tag}_year>{num})(?:\s*(?P<{tag}_suf>{era}))?")
}

/// Markers and parsed magnitude of a `year_group` capture.
pub(crate) struct YearCapture<'h> {
    pub year: u32,
    pub prefix: Option<&'h str>,
    pub suffix: Option<&'h str>,
}

impl<'h> YearCapture<'h> {
    pub fn from_caps(caps: &Captures<'h>, tag: &str) -> Option<Self> {
        let year = caps
            .name(&format!("{tag}_year"))
            .and_then(|m| crate::calendar::parse_number(m.as_str()))?;
        Some(YearCapture {
            year,
            prefix: caps.name(&format!("{tag}_pre")).map(|m| m.as_str()),
            suffix: caps.name(&format!("{tag}_suf")).map(|m| m.as_str()),
        })
    }

    pub fn marker(&self) -> Result<Option<crate::era::Era>, crate::era::MarkerConflict> {
        crate::era::endpoint_marker(self.prefix, self.suffix)
    }
}

/// Provenance label: rule name plus the matched text without the
/// trailing boundary character.
pub(crate) fn label(rule: &str, caps: &Captures<'_>) -> String {
    let text = caps.get(0).map_or("", |m| m.as_str()).trim();
    let text = text.trim_end_matches(|c: char| {
        !(c.is_alphanumeric() || c == '.' || c == ')' || c == '~')
    });
    format!("{rule}: {text}")
}

/// Return the span only if it satisfies the span invariants.
pub(crate) fn finish(span: Span) -> Option<Span> {
    if span.is_valid() {
        Some(span)
    } else {
        trace!(match_type = %span.match_type, "pattern matched an impossible date");
        None
    }
}

/// [`finish`], then attach the precision-scaled weight.
pub(crate) fn finish_scaled(span: Span) -> Option<Span> {
    finish(span).map(|s| {
        let w = weight::precision_weight(&s);
        s.with_weight(w)
    })
}

// ── Strategy ─────────────────────────────────────────────────────────

/// A single-pattern recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// "490 BC", "AD 1066", "1066"
    ExplicitYear,
    /// "8000-5000 BCE"
    YearRange,
    /// "220 BC – AD 200"
    MirroredEraRange,
    /// "c. 450 BC", "circa 1450"
    CircaYear,
    /// "~1450"
    TildeCircaYear,
    /// "c. 1450–1500"
    CircaYearRange,
    /// "5th century BCE"
    Century,
    /// "11th–14th centuries"
    CenturyRange,
    /// "Early 1700s", "Late 16th century", "Before 17th century"
    CenturyWithModifier,
    /// "1990s"
    Decade,
    /// "1960s–1970s"
    DecadeRange,
    /// "250,000 years ago"
    YearsAgo,
    /// "5-2 million years ago"
    YearsAgoRange,
    /// "September 25"
    MonthDay,
    /// "September 25–28"
    MonthDayRange,
    /// "September 28 – October 2"
    MonthDayCrossMonthRange,
    /// "September 28, 2020"
    MonthDayYear,
    /// "September 28, 2020 – October 2, 2021"
    MultiYearMonthDayRange,
    /// "September", "September 1990"
    MonthOnly,
    /// "Summer 1969"
    Season,
    /// Trailing "(...)" qualifiers
    Parenthesized(Parenthesized),
    /// The page year as a whole-year span
    Fallback,
}

impl Strategy {
    /// Parse raw text: dashes are normalized and whitespace trimmed first.
    pub fn parse(&self, text: &str, page: &PageContext) -> Option<Span> {
        let normalized = normalize_dashes(text);
        self.parse_normalized(normalized.trim(), page)
    }

    /// Parse text that is already dash-normalized and trimmed.
    pub(crate) fn parse_normalized(&self, text: &str, page: &PageContext) -> Option<Span> {
        match self {
            Self::ExplicitYear => year::explicit_year(text, page),
            Self::YearRange => year::year_range(text, page),
            Self::MirroredEraRange => year::mirrored_era_range(text, page),
            Self::CircaYear => year::circa_year(text, page),
            Self::TildeCircaYear => year::tilde_circa_year(text, page),
            Self::CircaYearRange => year::circa_year_range(text, page),
            Self::Century => century::century(text, page),
            Self::CenturyRange => century::century_range(text, page),
            Self::CenturyWithModifier => century::century_with_modifier(text, page),
            Self::Decade => decade::decade(text, page),
            Self::DecadeRange => decade::decade_range(text, page),
            Self::YearsAgo => years_ago::years_ago(text, page),
            Self::YearsAgoRange => years_ago::years_ago_range(text, page),
            Self::MonthDay => month_day::month_day(text, page),
            Self::MonthDayRange => month_day::month_day_range(text, page),
            Self::MonthDayCrossMonthRange => month_day::cross_month_range(text, page),
            Self::MonthDayYear => month_day::month_day_year(text, page),
            Self::MultiYearMonthDayRange => month_day::multi_year_range(text, page),
            Self::MonthOnly => month_day::month_only(text, page),
            Self::Season => month_day::season(text, page),
            Self::Parenthesized(p) => p.parse(text, page),
            Self::Fallback => fallback::fallback(page),
        }
    }
}
