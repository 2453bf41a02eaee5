//! Era markers (BC/BCE, AD/CE) and the rules that assign an era to each
//! endpoint of a span.
//!
//! The marker table is the single source for both recognition (a regex
//! alternation built from it) and interpretation ([`parse_marker`]).
//! Endpoint resolution is shared by every strategy that reads years.

use std::sync::LazyLock;

use span_types::PageContext;

// ── Era ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    Bc,
    Ad,
}

impl Era {
    pub fn is_bc(self) -> bool {
        matches!(self, Self::Bc)
    }
}

// ── Marker table ─────────────────────────────────────────────────────

/// One spelling of an era marker.
pub struct MarkerEntry {
    pub text: &'static str,
    pub era: Era,
}

/// Every accepted spelling. BC and BCE are synonyms, as are AD and CE.
pub static MARKERS: &[MarkerEntry] = &[
    MarkerEntry {
        text: "BCE",
        era: Era::Bc,
    },
    MarkerEntry {
        text: "B.C.E.",
        era: Era::Bc,
    },
    MarkerEntry {
        text: "BC",
        era: Era::Bc,
    },
    MarkerEntry {
        text: "B.C.",
        era: Era::Bc,
    },
    MarkerEntry {
        text: "AD",
        era: Era::Ad,
    },
    MarkerEntry {
        text: "A.D.",
        era: Era::Ad,
    },
    MarkerEntry {
        text: "CE",
        era: Era::Ad,
    },
    MarkerEntry {
        text: "C.E.",
        era: Era::Ad,
    },
];

/// Build a regex fragment matching any era marker.
/// Sorted by length descending so "BCE" wins over "BC".
pub fn build_marker_regex() -> String {
    let mut all: Vec<&str> = MARKERS.iter().map(|m| m.text).collect();
    all.sort_by_key(|t| std::cmp::Reverse(t.len()));

    let alts: Vec<String> = all
        .iter()
        .map(|t| {
            let escaped = regex::escape(t);
            // A dotted marker ends in punctuation, where \b would demand a
            // following word character.
            if t.ends_with(|c: char| c.is_ascii_alphanumeric()) {
                format!(r"{escaped}\b")
            } else {
                escaped
            }
        })
        .collect();

    format!("(?:{})", alts.join("|"))
}

/// The marker alternation, built once. Patterns embed it in a capture group.
pub static MARKER_RE: LazyLock<String> = LazyLock::new(build_marker_regex);

/// Interpret a matched marker. Case and dots are ignored.
pub fn parse_marker(s: &str) -> Option<Era> {
    let bare: String = s
        .chars()
        .filter(|c| *c != '.')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    MARKERS
        .iter()
        .find(|m| m.text.replace('.', "") == bare)
        .map(|m| m.era)
}

// ── Endpoint resolution ──────────────────────────────────────────────

/// A BC-class and an AD-class marker were both attached to one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerConflict;

/// Combine the markers found before and after one endpoint's number
/// ("AD 200", "200 AD").
pub fn endpoint_marker(
    prefix: Option<&str>,
    suffix: Option<&str>,
) -> Result<Option<Era>, MarkerConflict> {
    let before = prefix.and_then(parse_marker);
    let after = suffix.and_then(parse_marker);
    match (before, after) {
        (Some(a), Some(b)) if a != b => Err(MarkerConflict),
        (Some(a), _) | (None, Some(a)) => Ok(Some(a)),
        (None, None) => Ok(None),
    }
}

/// Era of a single endpoint: explicit marker, else page context.
pub fn resolve_single(marker: Option<Era>, page: &PageContext) -> bool {
    marker.map_or_else(|| page.assume_bc(), Era::is_bc)
}

/// How a range fills in an endpoint that carries no marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EraPolicy {
    /// A lone marker applies to both endpoints; differing markers are rejected.
    Propagate,
    /// Two markers are kept as written; a lone marker covers both
    /// endpoints. The page is consulted only when neither side is marked.
    KeepExplicit,
}

/// Resolve `(start_is_bc, end_is_bc)` for a range. `None` means the
/// markers are incompatible under `policy`.
pub fn resolve_pair(
    start: Option<Era>,
    end: Option<Era>,
    policy: EraPolicy,
    page: &PageContext,
) -> Option<(bool, bool)> {
    match policy {
        EraPolicy::Propagate => match (start, end) {
            (Some(a), Some(b)) if a != b => None,
            (Some(a), _) | (None, Some(a)) => Some((a.is_bc(), a.is_bc())),
            (None, None) => Some((page.assume_bc(), page.assume_bc())),
        },
        EraPolicy::KeepExplicit => match (start, end) {
            (Some(a), Some(b)) => Some((a.is_bc(), b.is_bc())),
            _ => resolve_pair(start, end, EraPolicy::Propagate, page),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(is_bc: Option<bool>) -> PageContext {
        PageContext::new(1000, is_bc)
    }

    #[test]
    fn test_parse_marker_synonyms() {
        assert_eq!(parse_marker("BC"), Some(Era::Bc));
        assert_eq!(parse_marker("bce"), Some(Era::Bc));
        assert_eq!(parse_marker("B.C."), Some(Era::Bc));
        assert_eq!(parse_marker("b.c.e."), Some(Era::Bc));
        assert_eq!(parse_marker("AD"), Some(Era::Ad));
        assert_eq!(parse_marker("ce"), Some(Era::Ad));
        assert_eq!(parse_marker("A.D."), Some(Era::Ad));
        assert_eq!(parse_marker("BCX"), None);
        assert_eq!(parse_marker(""), None);
    }

    #[test]
    fn test_marker_regex_longest_first() {
        let frag = build_marker_regex();
        assert!(frag.starts_with("(?:B\\.C\\.E\\."));
        let re = regex::Regex::new(&format!("(?i)^({frag})")).unwrap();
        assert_eq!(&re.captures("BCE rest").unwrap()[1], "BCE");
        assert_eq!(&re.captures("bc,").unwrap()[1], "bc");
        assert_eq!(&re.captures("A.D. 200").unwrap()[1], "A.D.");
        assert!(re.captures("Adelaide").is_none());
        assert!(re.captures("CEO").is_none());
    }

    #[test]
    fn test_endpoint_marker_conflict() {
        assert_eq!(endpoint_marker(Some("AD"), Some("BC")), Err(MarkerConflict));
        assert_eq!(endpoint_marker(Some("AD"), Some("CE")), Ok(Some(Era::Ad)));
        assert_eq!(endpoint_marker(None, Some("BCE")), Ok(Some(Era::Bc)));
        assert_eq!(endpoint_marker(None, None), Ok(None));
    }

    #[test]
    fn test_resolve_single_uses_page_when_unmarked() {
        assert!(resolve_single(None, &page(Some(true))));
        assert!(!resolve_single(None, &page(None)));
        assert!(!resolve_single(Some(Era::Ad), &page(Some(true))));
    }

    #[test]
    fn test_resolve_pair_propagate() {
        let p = page(Some(false));
        assert_eq!(
            resolve_pair(None, Some(Era::Bc), EraPolicy::Propagate, &p),
            Some((true, true))
        );
        assert_eq!(
            resolve_pair(Some(Era::Bc), None, EraPolicy::Propagate, &p),
            Some((true, true))
        );
        assert_eq!(
            resolve_pair(Some(Era::Bc), Some(Era::Ad), EraPolicy::Propagate, &p),
            None
        );
        assert_eq!(
            resolve_pair(None, None, EraPolicy::Propagate, &page(Some(true))),
            Some((true, true))
        );
    }

    #[test]
    fn test_resolve_pair_keep_explicit() {
        let p = page(Some(true));
        assert_eq!(
            resolve_pair(Some(Era::Bc), Some(Era::Ad), EraPolicy::KeepExplicit, &p),
            Some((true, false))
        );
        assert_eq!(
            resolve_pair(None, Some(Era::Ad), EraPolicy::KeepExplicit, &p),
            Some((false, false))
        );
        assert_eq!(
            resolve_pair(None, None, EraPolicy::KeepExplicit, &p),
            Some((true, true))
        );
    }

    #[test]
    fn test_resolve_pair_lone_marker_beats_page() {
        for policy in [EraPolicy::Propagate, EraPolicy::KeepExplicit] {
            assert_eq!(
                resolve_pair(None, Some(Era::Ad), policy, &page(Some(true))),
                Some((false, false))
            );
            assert_eq!(
                resolve_pair(None, Some(Era::Bc), policy, &page(Some(false))),
                Some((true, true))
            );
        }
    }
}
