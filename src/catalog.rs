//! Strategy identifiers and the factory that turns them into recognizers.
//!
//! Orchestrators name strategies by [`StrategyId`] so their precedence
//! lists stay readable and can be reordered without touching the patterns.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::era::EraPolicy;
use crate::strategy::{ParenShape, Parenthesized, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyId {
    ExplicitYear,
    YearRange,
    MirroredEraRange,
    CircaYear,
    TildeCircaYear,
    CircaYearRange,
    Century,
    CenturyRange,
    CenturyWithModifier,
    Decade,
    DecadeRange,
    YearsAgo,
    YearsAgoRange,
    MonthDay,
    MonthDayRange,
    MonthDayCrossMonthRange,
    MonthDayYear,
    MultiYearMonthDayRange,
    MonthOnly,
    Season,
    ParenthesizedYear,
    ParenthesizedCircaYear,
    ParenthesizedYearRange,
    ParenthesizedCircaYearRange,
    ParenthesizedShortYearRange,
    ParenthesizedLocationYear,
    ParenthesizedLocationYearRange,
    ParenthesizedLocationCircaYearRange,
    Fallback,
}

impl StrategyId {
    pub const ALL: &[StrategyId] = &[
        Self::ExplicitYear,
        Self::YearRange,
        Self::MirroredEraRange,
        Self::CircaYear,
        Self::TildeCircaYear,
        Self::CircaYearRange,
        Self::Century,
        Self::CenturyRange,
        Self::CenturyWithModifier,
        Self::Decade,
        Self::DecadeRange,
        Self::YearsAgo,
        Self::YearsAgoRange,
        Self::MonthDay,
        Self::MonthDayRange,
        Self::MonthDayCrossMonthRange,
        Self::MonthDayYear,
        Self::MultiYearMonthDayRange,
        Self::MonthOnly,
        Self::Season,
        Self::ParenthesizedYear,
        Self::ParenthesizedCircaYear,
        Self::ParenthesizedYearRange,
        Self::ParenthesizedCircaYearRange,
        Self::ParenthesizedShortYearRange,
        Self::ParenthesizedLocationYear,
        Self::ParenthesizedLocationYearRange,
        Self::ParenthesizedLocationCircaYearRange,
        Self::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExplicitYear => "explicit-year",
            Self::YearRange => "year-range",
            Self::MirroredEraRange => "mirrored-era-range",
            Self::CircaYear => "circa-year",
            Self::TildeCircaYear => "tilde-circa-year",
            Self::CircaYearRange => "circa-year-range",
            Self::Century => "century",
            Self::CenturyRange => "century-range",
            Self::CenturyWithModifier => "century-with-modifier",
            Self::Decade => "decade",
            Self::DecadeRange => "decade-range",
            Self::YearsAgo => "years-ago",
            Self::YearsAgoRange => "years-ago-range",
            Self::MonthDay => "month-day",
            Self::MonthDayRange => "month-day-range",
            Self::MonthDayCrossMonthRange => "month-day-cross-month-range",
            Self::MonthDayYear => "month-day-year",
            Self::MultiYearMonthDayRange => "multi-year-month-day-range",
            Self::MonthOnly => "month-only",
            Self::Season => "season",
            Self::ParenthesizedYear => "parenthesized-year",
            Self::ParenthesizedCircaYear => "parenthesized-circa-year",
            Self::ParenthesizedYearRange => "parenthesized-year-range",
            Self::ParenthesizedCircaYearRange => "parenthesized-circa-year-range",
            Self::ParenthesizedShortYearRange => "parenthesized-short-year-range",
            Self::ParenthesizedLocationYear => "parenthesized-location-year",
            Self::ParenthesizedLocationYearRange => "parenthesized-location-year-range",
            Self::ParenthesizedLocationCircaYearRange => "parenthesized-location-circa-year-range",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

// ── Factory ──────────────────────────────────────────────────────────

const fn paren(shape: ParenShape, location: bool, circa: bool, policy: EraPolicy) -> Strategy {
    Strategy::Parenthesized(Parenthesized::new(shape, location, circa, policy))
}

/// Construct the recognizer for `id`.
///
/// `parenthesized-location-year-range` keeps two differing markers as
/// written ("(China, 206 BC – AD 220)") while its siblings reject them.
/// Sources rely on both behaviors, so they are kept apart here.
pub fn build(id: StrategyId) -> Strategy {
    use EraPolicy::{KeepExplicit, Propagate};
    use ParenShape::{Range, ShortRange, Year};

    match id {
        StrategyId::ExplicitYear => Strategy::ExplicitYear,
        StrategyId::YearRange => Strategy::YearRange,
        StrategyId::MirroredEraRange => Strategy::MirroredEraRange,
        StrategyId::CircaYear => Strategy::CircaYear,
        StrategyId::TildeCircaYear => Strategy::TildeCircaYear,
        StrategyId::CircaYearRange => Strategy::CircaYearRange,
        StrategyId::Century => Strategy::Century,
        StrategyId::CenturyRange => Strategy::CenturyRange,
        StrategyId::CenturyWithModifier => Strategy::CenturyWithModifier,
        StrategyId::Decade => Strategy::Decade,
        StrategyId::DecadeRange => Strategy::DecadeRange,
        StrategyId::YearsAgo => Strategy::YearsAgo,
        StrategyId::YearsAgoRange => Strategy::YearsAgoRange,
        StrategyId::MonthDay => Strategy::MonthDay,
        StrategyId::MonthDayRange => Strategy::MonthDayRange,
        StrategyId::MonthDayCrossMonthRange => Strategy::MonthDayCrossMonthRange,
        StrategyId::MonthDayYear => Strategy::MonthDayYear,
        StrategyId::MultiYearMonthDayRange => Strategy::MultiYearMonthDayRange,
        StrategyId::MonthOnly => Strategy::MonthOnly,
        StrategyId::Season => Strategy::Season,
        StrategyId::ParenthesizedYear => paren(Year, false, false, Propagate),
        StrategyId::ParenthesizedCircaYear => paren(Year, false, true, Propagate),
        StrategyId::ParenthesizedYearRange => paren(Range, false, false, Propagate),
        StrategyId::ParenthesizedCircaYearRange => paren(Range, false, true, Propagate),
        StrategyId::ParenthesizedShortYearRange => paren(ShortRange, false, false, Propagate),
        StrategyId::ParenthesizedLocationYear => paren(Year, true, false, Propagate),
        StrategyId::ParenthesizedLocationYearRange => paren(Range, true, false, KeepExplicit),
        StrategyId::ParenthesizedLocationCircaYearRange => paren(Range, true, true, Propagate),
        StrategyId::Fallback => Strategy::Fallback,
    }
}
