//! Shared value types for date spans parsed out of historical prose.
//!
//! A [`Span`] stores year magnitudes and era flags separately, so a range
//! may start BC and end AD. Comparisons go through the proleptic axis
//! (AD years as-is, BC years mapped to `-year + 1`), which has no year 0.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

// ── Precision ────────────────────────────────────────────────────────────

/// How precisely the source text pinned a date, ordered coarse to fine.
///
/// The numeric [`value`](Precision::value) doubles as a weight multiplier
/// in the year-family strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum Precision {
    Fallback,
    Circa,
    SeasonOnly,
    MonthOnly,
    YearOnly,
    Approximate,
    Exact,
}

impl Precision {
    pub const ALL: [Precision; 7] = [
        Self::Fallback,
        Self::Circa,
        Self::SeasonOnly,
        Self::MonthOnly,
        Self::YearOnly,
        Self::Approximate,
        Self::Exact,
    ];

    pub fn value(self) -> f64 {
        match self {
            Self::Fallback => 0.0,
            Self::Circa => 0.01,
            Self::SeasonOnly => 0.25,
            Self::MonthOnly => 1.0,
            Self::YearOnly => 10.0,
            Self::Approximate => 100.0,
            Self::Exact => 1000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fallback => "FALLBACK",
            Self::Circa => "CIRCA",
            Self::SeasonOnly => "SEASON_ONLY",
            Self::MonthOnly => "MONTH_ONLY",
            Self::YearOnly => "YEAR_ONLY",
            Self::Approximate => "APPROXIMATE",
            Self::Exact => "EXACT",
        }
    }
}

impl From<Precision> for f64 {
    fn from(p: Precision) -> Self {
        p.value()
    }
}

/// Rejected numeric precision value during deserialization.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownPrecision(pub f64);

impl std::fmt::Display for UnknownPrecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown precision value {}", self.0)
    }
}

impl std::error::Error for UnknownPrecision {}

impl TryFrom<f64> for Precision {
    type Error = UnknownPrecision;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|p| (p.value() - v).abs() < 1e-9)
            .ok_or(UnknownPrecision(v))
    }
}

// ── Proleptic axis ───────────────────────────────────────────────────────

/// Map a year magnitude and era onto the comparable axis: AD stays
/// positive, BC becomes `-year + 1` (1 BC → 0, 2 BC → -1).
pub fn axis_year(year: u32, is_bc: bool) -> i64 {
    if is_bc {
        1 - i64::from(year)
    } else {
        i64::from(year)
    }
}

/// Inverse of [`axis_year`]. `None` when the magnitude does not fit.
pub fn from_axis_year(axis: i64) -> Option<(u32, bool)> {
    if axis >= 1 {
        u32::try_from(axis).ok().map(|y| (y, false))
    } else {
        u32::try_from(1 - axis).ok().map(|y| (y, true))
    }
}

// ── Page context ─────────────────────────────────────────────────────────

/// Best guess at the year and era of the page a fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub year: u32,
    /// `None` when the page era could not be inferred.
    #[serde(default)]
    pub is_bc: Option<bool>,
}

impl PageContext {
    pub fn new(year: u32, is_bc: Option<bool>) -> Self {
        Self { year, is_bc }
    }

    /// Unknown page era is read as AD.
    pub fn assume_bc(&self) -> bool {
        self.is_bc.unwrap_or(false)
    }

    pub fn axis_year(&self) -> i64 {
        axis_year(self.year, self.assume_bc())
    }
}

// ── Span ─────────────────────────────────────────────────────────────────

/// A normalized date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SpanRecord", from = "SpanRecord")]
pub struct Span {
    pub start_year: u32,
    pub start_month: u8,
    pub start_day: u8,
    pub start_year_is_bc: bool,
    pub end_year: u32,
    pub end_month: u8,
    pub end_day: u8,
    pub end_year_is_bc: bool,
    pub precision: Precision,
    /// Which rule matched, e.g. "Century range: 11th-14th centuries".
    pub match_type: String,
    /// Inclusive duration in days, filled in after validation.
    pub weight: Option<i64>,
}

impl Span {
    /// Whole-year span: 1 January of the start year to 31 December of the end year.
    pub fn years(
        start_year: u32,
        start_year_is_bc: bool,
        end_year: u32,
        end_year_is_bc: bool,
        precision: Precision,
        match_type: impl Into<String>,
    ) -> Self {
        Self {
            start_year,
            start_month: 1,
            start_day: 1,
            start_year_is_bc,
            end_year,
            end_month: 12,
            end_day: 31,
            end_year_is_bc,
            precision,
            match_type: match_type.into(),
            weight: None,
        }
    }

    /// Single whole year.
    pub fn year(
        year: u32,
        is_bc: bool,
        precision: Precision,
        match_type: impl Into<String>,
    ) -> Self {
        Self::years(year, is_bc, year, is_bc, precision, match_type)
    }

    pub fn with_start_date(mut self, month: u8, day: u8) -> Self {
        self.start_month = month;
        self.start_day = day;
        self
    }

    pub fn with_end_date(mut self, month: u8, day: u8) -> Self {
        self.end_month = month;
        self.end_day = day;
        self
    }

    pub fn with_weight(mut self, weight: Option<i64>) -> Self {
        self.weight = weight;
        self
    }

    pub fn start_axis_year(&self) -> i64 {
        axis_year(self.start_year, self.start_year_is_bc)
    }

    pub fn end_axis_year(&self) -> i64 {
        axis_year(self.end_year, self.end_year_is_bc)
    }

    /// Legacy flag: true only when both endpoints are BC.
    pub fn is_bc(&self) -> bool {
        self.start_year_is_bc && self.end_year_is_bc
    }

    /// Check the three span invariants: no year zero, chronological
    /// order on the proleptic axis, and month/day bounds.
    pub fn is_valid(&self) -> bool {
        if self.start_year == 0 || self.end_year == 0 {
            return false;
        }
        let bounded = |m: u8, d: u8| (1..=12).contains(&m) && (1..=31).contains(&d);
        if !bounded(self.start_month, self.start_day) || !bounded(self.end_month, self.end_day) {
            return false;
        }
        let start = (self.start_axis_year(), self.start_month, self.start_day);
        let end = (self.end_axis_year(), self.end_month, self.end_day);
        start.cmp(&end) != Ordering::Greater
    }
}

// ── Serialized form ──────────────────────────────────────────────────────

/// Flat record written to artifacts. `is_bc` is kept for older consumers
/// and is ignored when reading a record back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanRecord {
    pub start_year: u32,
    pub start_month: u8,
    pub start_day: u8,
    pub start_year_is_bc: bool,
    pub end_year: u32,
    pub end_month: u8,
    pub end_day: u8,
    pub end_year_is_bc: bool,
    pub precision: Precision,
    pub match_type: String,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub is_bc: bool,
}

impl From<Span> for SpanRecord {
    fn from(s: Span) -> Self {
        let is_bc = s.is_bc();
        SpanRecord {
            start_year: s.start_year,
            start_month: s.start_month,
            start_day: s.start_day,
            start_year_is_bc: s.start_year_is_bc,
            end_year: s.end_year,
            end_month: s.end_month,
            end_day: s.end_day,
            end_year_is_bc: s.end_year_is_bc,
            precision: s.precision,
            match_type: s.match_type,
            weight: s.weight,
            is_bc,
        }
    }
}

impl From<SpanRecord> for Span {
    fn from(r: SpanRecord) -> Self {
        Span {
            start_year: r.start_year,
            start_month: r.start_month,
            start_day: r.start_day,
            start_year_is_bc: r.start_year_is_bc,
            end_year: r.end_year,
            end_month: r.end_month,
            end_day: r.end_day,
            end_year_is_bc: r.end_year_is_bc,
            precision: r.precision,
            match_type: r.match_type,
            weight: r.weight,
        }
    }
}
