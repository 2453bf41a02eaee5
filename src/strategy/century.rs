//! Century patterns, including "Early/Mid/Late" thirds and "Before Nth".

use std::sync::LazyLock;

use regex::Regex;
use span_types::{PageContext, Precision, Span, axis_year, from_axis_year};

use super::{END, finish, label};
use crate::calendar::{ordinal_regex, parse_ordinal};
use crate::era::{self, Era, EraPolicy};

// ── Patterns ─────────────────────────────────────────────────────────
//
// Real data examples:
//   5th century BCE – Classical Greece
//   the 19th century
//   11th–14th centuries: Hanseatic League
//   2nd century BC – 1st century AD
//   Early 1700s, Late 16th century, Mid-19th century, Before 17th century

static RE_CENTURY: LazyLock<Regex> = LazyLock::new(|| {
    let era = &*era::MARKER_RE;
    let ord = ordinal_regex();
    Regex::new(&format!(
        r"(?i)^(?:the\s+)?(?P<n>{ord})[\s-]+century(?:\s*(?P<era>{era}))?{END}"
    ))
    .expect("century regex")
});

static RE_CENTURY_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let era = &*era::MARKER_RE;
    let ord = ordinal_regex();
    Regex::new(&format!(
        r"(?i)^(?:the\s+)?(?P<a>{ord})(?:[\s-]+century)?(?:\s*(?P<a_era>{era}))?\s*(?:-|\bto\b|\band\b|\bthrough\b)\s*(?:the\s+)?(?P<b>{ord})[\s-]+centur(?:y|ies)(?:\s*(?P<b_era>{era}))?{END}"
    ))
    .expect("century range regex")
});

static RE_CENTURY_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    let era = &*era::MARKER_RE;
    let ord = ordinal_regex();
    Regex::new(&format!(
        r"(?i)^(?:the\s+)?(?P<modifier>early|mid|middle|late|before)(?:[\s-]+the)?[\s-]+(?:(?P<n>{ord})[\s-]+century|(?P<hundreds>\d{{1,2}}00)'?s)(?:\s*(?P<era>{era}))?{END}"
    ))
    .expect("century modifier regex")
});

// ── Arithmetic ───────────────────────────────────────────────────────

/// Year magnitudes of the Nth century, in chronological order.
/// AD: `100(N-1)+1 .. 100N`. BC counts backward: `100N .. 100(N-1)+1`.
pub(crate) fn century_bounds(n: u32, is_bc: bool) -> Option<(u32, u32)> {
    let last = n.checked_mul(100)?;
    let first = last.checked_sub(99)?;
    Some(if is_bc { (last, first) } else { (first, last) })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Early,
    Mid,
    Late,
    Before,
}

impl Modifier {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "early" => Some(Self::Early),
            "mid" | "middle" => Some(Self::Mid),
            "late" => Some(Self::Late),
            "before" => Some(Self::Before),
            _ => None,
        }
    }

    /// Year offsets inside a 100-year block, counted from its earliest year.
    fn offsets(self) -> (i64, i64) {
        match self {
            Self::Early => (0, 33),
            Self::Mid => (34, 66),
            Self::Late | Self::Before => (67, 99),
        }
    }
}

/// A 100-year block as axis years, earliest first.
struct Block {
    first: i64,
    last: i64,
}

impl Block {
    fn century(n: u32, is_bc: bool) -> Option<Self> {
        let (a, b) = century_bounds(n, is_bc)?;
        Some(Block {
            first: axis_year(a, is_bc),
            last: axis_year(b, is_bc),
        })
    }

    /// "1700s" = 1700..1799; "1700s BC" = 1799 BC..1700 BC.
    fn hundreds(base: u32, is_bc: bool) -> Option<Self> {
        let top = base.checked_add(99)?;
        let (a, b) = if is_bc { (top, base) } else { (base, top) };
        Some(Block {
            first: axis_year(a, is_bc),
            last: axis_year(b, is_bc),
        })
    }

    fn portion(&self, modifier: Modifier) -> Option<((u32, bool), (u32, bool))> {
        let (lo, hi) = modifier.offsets();
        let start = self.first + lo;
        let end = (self.first + hi).min(self.last);
        Some((from_axis_year(start)?, from_axis_year(end)?))
    }
}

// ── Strategies ───────────────────────────────────────────────────────

/// "5th century BCE" → 500..401 BC; "19th century" → 1801..1900.
pub fn century(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_CENTURY.captures(text)?;
    let n = parse_ordinal(caps.name("n")?.as_str())?;
    let marker = caps.name("era").and_then(|m| era::parse_marker(m.as_str()));
    let is_bc = era::resolve_single(marker, page);
    let (start, end) = century_bounds(n, is_bc)?;
    finish(Span::years(
        start,
        is_bc,
        end,
        is_bc,
        Precision::Approximate,
        label("Century", &caps),
    ))
}

/// "11th–14th centuries" → 1001..1400. A lone marker covers both sides;
/// two explicit markers are kept as written ("2nd century BC – 1st century AD").
pub fn century_range(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_CENTURY_RANGE.captures(text)?;
    let a = parse_ordinal(caps.name("a")?.as_str())?;
    let b = parse_ordinal(caps.name("b")?.as_str())?;
    let a_era = caps.name("a_era").and_then(|m| era::parse_marker(m.as_str()));
    let b_era = caps.name("b_era").and_then(|m| era::parse_marker(m.as_str()));
    let (start_bc, end_bc) = era::resolve_pair(a_era, b_era, EraPolicy::KeepExplicit, page)?;
    let (start, _) = century_bounds(a, start_bc)?;
    let (_, end) = century_bounds(b, end_bc)?;
    finish(Span::years(
        start,
        start_bc,
        end,
        end_bc,
        Precision::Approximate,
        label("Century range", &caps),
    ))
}

/// "Early 1700s", "Mid-19th century", "Late 16th century", "Before 17th century".
///
/// Early/Mid/Late cover offsets 0–33, 34–66 and 67–99 of the 100-year
/// block. "Before Nth" is the late portion of century N-1. On that path an
/// explicit BC marker is dropped and the page era used instead, so
/// "Before 5th century BCE" on an AD page lands in the 4th century AD.
pub fn century_with_modifier(text: &str, page: &PageContext) -> Option<Span> {
    let caps = RE_CENTURY_MODIFIER.captures(text)?;
    let modifier = Modifier::from_word(caps.name("modifier")?.as_str())?;
    let marker = caps.name("era").and_then(|m| era::parse_marker(m.as_str()));

    let is_bc = match (modifier, marker) {
        (Modifier::Before, Some(Era::Bc)) => page.assume_bc(),
        _ => era::resolve_single(marker, page),
    };

    let block = if let Some(n) = caps.name("n") {
        let n = parse_ordinal(n.as_str())?;
        let n = if modifier == Modifier::Before {
            n.checked_sub(1)?
        } else {
            n
        };
        Block::century(n, is_bc)?
    } else {
        let base: u32 = caps.name("hundreds")?.as_str().parse().ok()?;
        let base = if modifier == Modifier::Before {
            base.checked_sub(100)?
        } else {
            base
        };
        if base == 0 {
            return None;
        }
        Block::hundreds(base, is_bc)?
    };

    let ((start, start_bc), (end, end_bc)) = block.portion(modifier)?;
    finish(Span::years(
        start,
        start_bc,
        end,
        end_bc,
        Precision::Approximate,
        label("Century with modifier", &caps),
    ))
}
