//! Trailing "(...)" qualifiers: "Reign (1958)", "Shang (China, 1600–1046 BC)".
//!
//! Unlike the other families these patterns are anchored at the end of the
//! text. One configurable recognizer covers every combination of shape,
//! location prefix and circa prefix; the catalog decides which ones exist.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use span_types::{PageContext, Precision, Span};

use super::{CIRCA, YearCapture, finish, label, year_group};
use crate::era::{self, Era, EraPolicy};

// ── Configuration ────────────────────────────────────────────────────

/// What sits inside the parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParenShape {
    /// "(1958)"
    Year,
    /// "(1600–1046 BC)"
    Range,
    /// "(1914–18)": the end year keeps only its last two digits.
    ShortRange,
}

/// A parenthesized recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parenthesized {
    pub shape: ParenShape,
    /// A "Location, " prefix is required before the date.
    pub location: bool,
    /// A circa prefix ("c.", "ca.", "circa", "~") is required.
    pub circa: bool,
    /// How range endpoints without a marker get their era.
    pub policy: EraPolicy,
}

// ── Patterns ─────────────────────────────────────────────────────────
//
// Real data examples:
//   Meiji era (1868–1912)
//   Old Kingdom (Egypt, 2686 BC)
//   Shang dynasty (China, 1600–1046 BC)
//   Uruk period (Mesopotamia, c. 4000–3100 BC)
//   First World War (1914–18)

const LOCATION: &str = r"(?P<loc>[^(),]+?)\s*,\s*";

fn body(shape: ParenShape, circa: bool) -> String {
    let era = &*era::MARKER_RE;
    let lead = if circa {
        format!(r"(?:{CIRCA}|~)\s*")
    } else {
        String::new()
    };
    match shape {
        ParenShape::Year => format!("{lead}{}", year_group("s")),
        ParenShape::Range => format!(
            r"{lead}{}\s*(?:-|\bto\b)\s*(?:(?:{CIRCA}|~)\s*)?{}",
            year_group("s"),
            year_group("e")
        ),
        ParenShape::ShortRange => format!(
            r"{lead}(?:(?P<s_pre>{era})\s*)?(?P<s_year>\d{{4}})\s*-\s*(?P<short>\d{{2}})(?:\s*(?P<e_suf>{era}))?"
        ),
    }
}

fn build_pattern(shape: ParenShape, location: bool, circa: bool) -> Regex {
    let loc = if location { LOCATION } else { "" };
    Regex::new(&format!(
        r"(?i)\(\s*{loc}{}\s*\)\s*$",
        body(shape, circa)
    ))
    .expect("parenthesized regex")
}

static PATTERNS: LazyLock<HashMap<(ParenShape, bool, bool), Regex>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for shape in [ParenShape::Year, ParenShape::Range, ParenShape::ShortRange] {
        for location in [false, true] {
            for circa in [false, true] {
                map.insert((shape, location, circa), build_pattern(shape, location, circa));
            }
        }
    }
    map
});

// ── Short years ──────────────────────────────────────────────────────

/// "1914–18" → 1918; "1999–02" → 2002. The suffix takes the start year's
/// century and rolls into the next one if that would precede the start.
pub(crate) fn infer_short_year(start: u32, suffix: u32) -> u32 {
    let candidate = start / 100 * 100 + suffix;
    if candidate < start {
        candidate + 100
    } else {
        candidate
    }
}

// ── Recognizer ───────────────────────────────────────────────────────

impl Parenthesized {
    pub const fn new(shape: ParenShape, location: bool, circa: bool, policy: EraPolicy) -> Self {
        Self {
            shape,
            location,
            circa,
            policy,
        }
    }

    fn rule(&self) -> String {
        let mut rule = String::from("Parenthesized");
        if self.location {
            rule.push_str(" location");
        }
        if self.circa {
            rule.push_str(" circa");
        }
        rule.push_str(match self.shape {
            ParenShape::Year => " year",
            ParenShape::Range => " year range",
            ParenShape::ShortRange => " short year range",
        });
        rule
    }

    fn precision(&self) -> Precision {
        if self.circa {
            Precision::Circa
        } else {
            Precision::YearOnly
        }
    }

    pub fn parse(&self, text: &str, page: &PageContext) -> Option<Span> {
        let re = PATTERNS.get(&(self.shape, self.location, self.circa))?;
        let caps = re.captures(text)?;
        let rule = label(&self.rule(), &caps);
        let span = match self.shape {
            ParenShape::Year => {
                let y = YearCapture::from_caps(&caps, "s")?;
                let is_bc = era::resolve_single(y.marker().ok()?, page);
                Span::year(y.year, is_bc, self.precision(), rule)
            }
            ParenShape::Range => {
                let s = YearCapture::from_caps(&caps, "s")?;
                let e = YearCapture::from_caps(&caps, "e")?;
                let (start_bc, end_bc) =
                    era::resolve_pair(s.marker().ok()?, e.marker().ok()?, self.policy, page)?;
                Span::years(s.year, start_bc, e.year, end_bc, self.precision(), rule)
            }
            ParenShape::ShortRange => self.short_range(&caps, page, rule)?,
        };
        finish(span)
    }

    /// Short ranges only read as AD: a BC marker, or a BC page with no
    /// AD marker, is no-match.
    fn short_range(&self, caps: &Captures<'_>, page: &PageContext, rule: String) -> Option<Span> {
        let marker = era::endpoint_marker(
            caps.name("s_pre").map(|m| m.as_str()),
            caps.name("e_suf").map(|m| m.as_str()),
        )
        .ok()?;
        match marker {
            Some(Era::Bc) => return None,
            None if page.assume_bc() => return None,
            _ => {}
        }
        let start: u32 = caps.name("s_year")?.as_str().parse().ok()?;
        let suffix: u32 = caps.name("short")?.as_str().parse().ok()?;
        let end = infer_short_year(start, suffix);
        Some(Span::years(start, false, end, false, self.precision(), rule))
    }
}
