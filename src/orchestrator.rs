//! Ordered strategy pipelines.
//!
//! Every orchestrator is an explicit precedence list. The first strategy
//! that returns a span wins and nothing after it runs, so moving an entry
//! changes results for ambiguous text: "century range" has to sit before
//! "century", month/day forms before bare years, and "fallback" last.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use span_types::{PageContext, Span};
use tracing::{debug, trace};

use crate::calendar::normalize_dashes;
use crate::catalog::{self, StrategyId};
use crate::error::Error;
use crate::strategy::Strategy;
use crate::weight::fill_weight;

// ── Precedence lists ─────────────────────────────────────────────────

use StrategyId as S;

/// Plain year lists ("List of years in ..." pages, day-by-day timelines).
const YEARS: &[StrategyId] = &[
    S::MultiYearMonthDayRange,
    S::MonthDayYear,
    S::MonthDayCrossMonthRange,
    S::MonthDayRange,
    S::MonthDay,
    S::Season,
    S::MonthOnly,
    S::YearsAgoRange,
    S::YearsAgo,
    S::MirroredEraRange,
    S::CenturyWithModifier,
    S::CenturyRange,
    S::Century,
    S::DecadeRange,
    S::Decade,
    S::CircaYearRange,
    S::CircaYear,
    S::TildeCircaYear,
    S::YearRange,
    S::ExplicitYear,
    S::Fallback,
];

const YEARS_NO_FALLBACK: &[StrategyId] = &[
    S::MultiYearMonthDayRange,
    S::MonthDayYear,
    S::MonthDayCrossMonthRange,
    S::MonthDayRange,
    S::MonthDay,
    S::Season,
    S::MonthOnly,
    S::YearsAgoRange,
    S::YearsAgo,
    S::MirroredEraRange,
    S::CenturyWithModifier,
    S::CenturyRange,
    S::Century,
    S::DecadeRange,
    S::Decade,
    S::CircaYearRange,
    S::CircaYear,
    S::TildeCircaYear,
    S::YearRange,
    S::ExplicitYear,
];

/// Time-period lists, where entries end in "(Location, start–end)".
const TIME_PERIODS: &[StrategyId] = &[
    S::ParenthesizedLocationCircaYearRange,
    S::ParenthesizedLocationYearRange,
    S::ParenthesizedLocationYear,
    S::ParenthesizedCircaYearRange,
    S::ParenthesizedShortYearRange,
    S::ParenthesizedYearRange,
    S::ParenthesizedCircaYear,
    S::ParenthesizedYear,
    S::YearsAgoRange,
    S::YearsAgo,
    S::MirroredEraRange,
    S::CenturyWithModifier,
    S::CenturyRange,
    S::Century,
    S::DecadeRange,
    S::Decade,
    S::CircaYearRange,
    S::CircaYear,
    S::TildeCircaYear,
    S::YearRange,
    S::ExplicitYear,
    S::Fallback,
];

const TIME_PERIODS_NO_FALLBACK: &[StrategyId] = &[
    S::ParenthesizedLocationCircaYearRange,
    S::ParenthesizedLocationYearRange,
    S::ParenthesizedLocationYear,
    S::ParenthesizedCircaYearRange,
    S::ParenthesizedShortYearRange,
    S::ParenthesizedYearRange,
    S::ParenthesizedCircaYear,
    S::ParenthesizedYear,
    S::YearsAgoRange,
    S::YearsAgo,
    S::MirroredEraRange,
    S::CenturyWithModifier,
    S::CenturyRange,
    S::Century,
    S::DecadeRange,
    S::Decade,
    S::CircaYearRange,
    S::CircaYear,
    S::TildeCircaYear,
    S::YearRange,
    S::ExplicitYear,
];

/// The food timeline mixes prehistory with approximate dates.
const FOOD_TIMELINE: &[StrategyId] = &[
    S::YearsAgoRange,
    S::YearsAgo,
    S::CircaYearRange,
    S::CircaYear,
    S::TildeCircaYear,
    S::MirroredEraRange,
    S::YearRange,
    S::CenturyWithModifier,
    S::CenturyRange,
    S::Century,
    S::DecadeRange,
    S::Decade,
    S::ExplicitYear,
    S::Fallback,
];

// ── Kinds ────────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OrchestratorKind {
    #[default]
    Years,
    YearsNoFallback,
    TimePeriods,
    TimePeriodsNoFallback,
    FoodTimeline,
}

impl OrchestratorKind {
    pub const ALL: &[OrchestratorKind] = &[
        Self::Years,
        Self::YearsNoFallback,
        Self::TimePeriods,
        Self::TimePeriodsNoFallback,
        Self::FoodTimeline,
    ];

    /// Strategy precedence, first tried first.
    pub fn sequence(self) -> &'static [StrategyId] {
        match self {
            Self::Years => YEARS,
            Self::YearsNoFallback => YEARS_NO_FALLBACK,
            Self::TimePeriods => TIME_PERIODS,
            Self::TimePeriodsNoFallback => TIME_PERIODS_NO_FALLBACK,
            Self::FoodTimeline => FOOD_TIMELINE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::YearsNoFallback => "years-no-fallback",
            Self::TimePeriods => "time-periods",
            Self::TimePeriodsNoFallback => "time-periods-no-fallback",
            Self::FoodTimeline => "food-timeline",
        }
    }
}

impl FromStr for OrchestratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownOrchestrator(s.to_string()))
    }
}

// ── Orchestrator ─────────────────────────────────────────────────────

/// A built pipeline. Cheap to clone; holds no state between calls.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    kind: OrchestratorKind,
    strategies: Vec<(StrategyId, Strategy)>,
}

impl Orchestrator {
    pub fn new(kind: OrchestratorKind) -> Self {
        let strategies = kind
            .sequence()
            .iter()
            .map(|&id| (id, catalog::build(id)))
            .collect();
        Self { kind, strategies }
    }

    pub fn kind(&self) -> OrchestratorKind {
        self.kind
    }

    pub fn strategy_ids(&self) -> impl Iterator<Item = StrategyId> + '_ {
        self.strategies.iter().map(|(id, _)| *id)
    }

    /// Parse one bullet or table cell against the page it came from.
    pub fn parse_span_from_bullet(
        &self,
        text: &str,
        page_year: u32,
        page_is_bc: Option<bool>,
    ) -> Option<Span> {
        self.parse(text, &PageContext::new(page_year, page_is_bc))
    }

    pub fn parse(&self, text: &str, page: &PageContext) -> Option<Span> {
        self.parse_with_id(text, page).map(|(_, span)| span)
    }

    /// Like [`Orchestrator::parse`], also reporting which strategy won.
    pub fn parse_with_id(&self, text: &str, page: &PageContext) -> Option<(StrategyId, Span)> {
        if text.is_empty() {
            return None;
        }
        let normalized = normalize_dashes(text);
        let text = normalized.trim();

        for (id, strategy) in &self.strategies {
            trace!(strategy = %id, "trying");
            let Some(span) = strategy.parse_normalized(text, page) else {
                continue;
            };
            let span = fill_weight(span);
            debug!(
                orchestrator = self.kind.as_str(),
                strategy = %id,
                match_type = %span.match_type,
                "matched"
            );
            return Some((*id, span));
        }

        debug!(orchestrator = self.kind.as_str(), text, "no strategy matched");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use span_types::Precision;

    fn years() -> Orchestrator {
        Orchestrator::new(OrchestratorKind::Years)
    }

    #[test]
    fn test_no_fallback_lists_drop_only_fallback() {
        for (full, trimmed) in [
            (OrchestratorKind::Years, OrchestratorKind::YearsNoFallback),
            (OrchestratorKind::TimePeriods, OrchestratorKind::TimePeriodsNoFallback),
        ] {
            let (last, rest) = full.sequence().split_last().unwrap();
            assert_eq!(*last, StrategyId::Fallback);
            assert_eq!(rest, trimmed.sequence());
        }
    }

    #[test]
    fn test_kind_names_parse() {
        for kind in OrchestratorKind::ALL {
            assert_eq!(kind.as_str().parse::<OrchestratorKind>().unwrap(), *kind);
        }
        assert!(matches!(
            "decades".parse::<OrchestratorKind>(),
            Err(Error::UnknownOrchestrator(_))
        ));
    }

    #[test]
    fn test_fallback_is_last_wherever_present() {
        for kind in OrchestratorKind::ALL {
            let seq = kind.sequence();
            if let Some(pos) = seq.iter().position(|id| *id == StrategyId::Fallback) {
                assert_eq!(pos, seq.len() - 1, "{kind:?}");
            }
        }
    }

    #[test]
    fn test_range_patterns_precede_single_patterns() {
        for kind in OrchestratorKind::ALL {
            let seq = kind.sequence();
            let pos = |id| seq.iter().position(|x| *x == id);
            for (range, single) in [
                (StrategyId::CenturyRange, StrategyId::Century),
                (StrategyId::DecadeRange, StrategyId::Decade),
                (StrategyId::YearRange, StrategyId::ExplicitYear),
                (StrategyId::CircaYearRange, StrategyId::CircaYear),
                (StrategyId::YearsAgoRange, StrategyId::YearsAgo),
            ] {
                if let (Some(r), Some(s)) = (pos(range), pos(single)) {
                    assert!(r < s, "{kind:?}: {range} must precede {single}");
                }
            }
        }
    }

    #[test]
    fn test_century_range_wins_over_century() {
        let s = years().parse_span_from_bullet("11th-14th centuries", 1200, Some(false)).unwrap();
        assert_eq!((s.start_year, s.end_year), (1001, 1400));
        assert_eq!(s.precision, Precision::Approximate);
    }

    #[test]
    fn test_empty_input_is_no_match() {
        assert!(years().parse_span_from_bullet("", 1990, Some(false)).is_none());
    }

    #[test]
    fn test_whitespace_input_reaches_fallback() {
        let s = years().parse_span_from_bullet("   \t", 1990, Some(false)).unwrap();
        assert_eq!(s.precision, Precision::Fallback);
        assert_eq!((s.start_year, s.weight), (1990, Some(1)));
        let o = Orchestrator::new(OrchestratorKind::YearsNoFallback);
        assert!(o.parse_span_from_bullet("   \t", 1990, Some(false)).is_none());
    }

    #[test]
    fn test_fallback_catches_unparseable_text() {
        let s = years()
            .parse_span_from_bullet("The harvest failed again", 1315, Some(false))
            .unwrap();
        assert_eq!((s.start_year, s.end_year), (1315, 1315));
        assert_eq!(s.precision, Precision::Fallback);
        assert_eq!(s.weight, Some(1));
    }

    #[test]
    fn test_no_fallback_returns_none() {
        let o = Orchestrator::new(OrchestratorKind::YearsNoFallback);
        assert!(o.parse_span_from_bullet("The harvest failed again", 1315, Some(false)).is_none());
    }

    #[test]
    fn test_weight_filled_when_strategy_leaves_it() {
        let s = years().parse_span_from_bullet("c. 1450 - printing press", 1450, None).unwrap();
        assert_eq!(s.precision, Precision::Circa);
        assert_eq!(s.weight, Some(365));
    }

    #[test]
    fn test_month_day_uses_page_year_in_years_orchestrator() {
        let (id, s) = years()
            .parse_with_id("September 28 \u{2013} October 2: strike", &PageContext::new(1990, Some(false)))
            .unwrap();
        assert_eq!(id, StrategyId::MonthDayCrossMonthRange);
        assert_eq!((s.start_month, s.start_day, s.end_month, s.end_day), (9, 28, 10, 2));
        assert_eq!(s.weight, Some(5));
    }

    #[test]
    fn test_time_periods_reads_trailing_qualifier() {
        let o = Orchestrator::new(OrchestratorKind::TimePeriods);
        let (id, s) = o
            .parse_with_id(
                "Uruk period (Mesopotamia, c. 4000\u{2013}3100 BC)",
                &PageContext::new(3500, Some(true)),
            )
            .unwrap();
        assert_eq!(id, StrategyId::ParenthesizedLocationCircaYearRange);
        assert_eq!((s.start_year, s.end_year), (4000, 3100));
    }

    #[test]
    fn test_food_timeline_years_ago_first() {
        let o = Orchestrator::new(OrchestratorKind::FoodTimeline);
        let (id, s) = o
            .parse_with_id("250,000 years ago: fire", &PageContext::new(2000, Some(false)))
            .unwrap();
        assert_eq!(id, StrategyId::YearsAgo);
        assert!(s.start_year_is_bc);
    }
}
