//! Text and number helpers shared by the strategies: dash normalization,
//! English month/season/ordinal names, and numbers written with commas or
//! "thousand"/"million" multipliers.

use span_types::axis_year;

// ── Dashes ───────────────────────────────────────────────────────────

/// Every dash-like character that separates range endpoints in source text.
const DASHES: &[char] = &[
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2015}', // horizontal bar
    '\u{2212}', // minus sign
    '\u{FE63}', // small hyphen-minus
    '\u{FF0D}', // fullwidth hyphen-minus
];

/// Replace dash variants with an ASCII hyphen.
pub fn normalize_dashes(text: &str) -> String {
    text.chars()
        .map(|c| if DASHES.contains(&c) { '-' } else { c })
        .collect()
}

// ── Months ───────────────────────────────────────────────────────────

const MONTHS: &[(&str, u8)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

/// Regex fragment for a month name, full or abbreviated ("Sep", "Sept.").
pub const MONTH_RE: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

/// Parse an English month name → month number (1–12).
///
/// Accepts the full name or any prefix of at least three letters, with an
/// optional trailing period.
pub fn parse_month(s: &str) -> Option<u8> {
    let lower = s.trim_end_matches('.').to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .find(|(name, _)| name.starts_with(&lower))
        .map(|(_, n)| *n)
}

// ── Seasons ──────────────────────────────────────────────────────────

pub const SEASON_RE: &str = r"(?:spring|summer|autumn|fall|winter)";

/// Month/day bounds of a season within one calendar year.
///
/// Winter is read as the January–February part of the stated year.
pub fn season_bounds(s: &str) -> Option<((u8, u8), (u8, u8))> {
    match s.to_ascii_lowercase().as_str() {
        "spring" => Some(((3, 1), (5, 31))),
        "summer" => Some(((6, 1), (8, 31))),
        "autumn" | "fall" => Some(((9, 1), (11, 30))),
        "winter" => Some(((1, 1), (2, 28))),
        _ => None,
    }
}

// ── Days per month ───────────────────────────────────────────────────

/// Proleptic Gregorian leap rule applied to an axis year (1 BC = axis 0).
pub fn is_leap_axis_year(axis: i64) -> bool {
    axis.rem_euclid(4) == 0 && (axis.rem_euclid(100) != 0 || axis.rem_euclid(400) == 0)
}

/// Last day of `month` in the given year magnitude and era.
pub fn days_in_month(year: u32, is_bc: bool, month: u8) -> Option<u8> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_axis_year(axis_year(year, is_bc)) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

// ── Ordinals ─────────────────────────────────────────────────────────

const ORDINAL_WORDS: &[(&str, u32)] = &[
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
    ("eleventh", 11),
    ("twelfth", 12),
    ("thirteenth", 13),
    ("fourteenth", 14),
    ("fifteenth", 15),
    ("sixteenth", 16),
    ("seventeenth", 17),
    ("eighteenth", 18),
    ("nineteenth", 19),
    ("twentieth", 20),
    ("twenty-first", 21),
];

/// Regex fragment for an ordinal: "5th", "21st", "fifth", "twenty-first".
pub fn ordinal_regex() -> String {
    let mut words: Vec<&str> = ORDINAL_WORDS.iter().map(|(w, _)| *w).collect();
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    format!(r"(?:\d{{1,2}}(?:st|nd|rd|th)|{})", words.join("|"))
}

/// Parse an ordinal → its number. "0th" is rejected.
pub fn parse_ordinal(s: &str) -> Option<u32> {
    let lower = s.to_ascii_lowercase();
    if let Some((_, n)) = ORDINAL_WORDS.iter().find(|(w, _)| *w == lower) {
        return Some(*n);
    }
    let digits = lower.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &lower[digits.len()..];
    if !matches!(suffix, "st" | "nd" | "rd" | "th") {
        return None;
    }
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

// ── Numbers ──────────────────────────────────────────────────────────

/// Regex fragment for a year-like integer, optionally comma-grouped.
pub const NUMBER_RE: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)";

/// Regex fragment for a quantity that may carry a fraction ("2.5").
pub const QUANTITY_RE: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)";

/// Regex fragment for a magnitude word.
pub const MULTIPLIER_RE: &str = r"(?:thousand|million|billion)";

/// Parse "1,250" or "1250" → 1250.
pub fn parse_number(s: &str) -> Option<u32> {
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}

/// Scale factor of a magnitude word.
pub fn multiplier(word: &str) -> Option<u64> {
    match word.to_ascii_lowercase().as_str() {
        "thousand" => Some(1_000),
        "million" => Some(1_000_000),
        "billion" => Some(1_000_000_000),
        _ => None,
    }
}

/// Parse a quantity with an optional multiplier: "250,000" → 250000,
/// "2.5" + "million" → 2500000. Fractions are only meaningful with a
/// multiplier and are rounded to whole years.
pub fn parse_quantity(num: &str, mult: Option<&str>) -> Option<u64> {
    let scale = match mult {
        Some(w) => multiplier(w)?,
        None => 1,
    };
    let cleaned: String = num.chars().filter(|c| *c != ',').collect();
    match cleaned.split_once('.') {
        None => cleaned.parse::<u64>().ok()?.checked_mul(scale),
        Some((whole, frac)) => {
            let whole: u64 = whole.parse().ok()?;
            let frac_digits = u32::try_from(frac.len()).ok()?;
            let frac_value: u64 = frac.parse().ok()?;
            let denom = 10u64.checked_pow(frac_digits)?;
            let scaled_frac = frac_value.checked_mul(scale)?;
            // round half up
            let frac_years = scaled_frac.checked_add(denom / 2)? / denom;
            whole.checked_mul(scale)?.checked_add(frac_years)
        }
    }
}
