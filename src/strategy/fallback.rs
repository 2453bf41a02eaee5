use span_types::{PageContext, Precision, Span};

use super::finish;

/// The page year as a whole-year span. Matches any text; the weight is
/// fixed at one day whatever the span covers.
pub fn fallback(page: &PageContext) -> Option<Span> {
    let span = Span::year(
        page.year,
        page.assume_bc(),
        Precision::Fallback,
        format!("Fallback: page year {}", page.year),
    );
    finish(span).map(|s| s.with_weight(Some(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_uses_page_context() {
        let s = fallback(&PageContext::new(1066, Some(false))).unwrap();
        assert_eq!((s.start_year, s.end_year), (1066, 1066));
        assert_eq!((s.start_month, s.start_day, s.end_month, s.end_day), (1, 1, 12, 31));
        assert_eq!(s.precision, Precision::Fallback);
        assert_eq!(s.weight, Some(1));

        let s = fallback(&PageContext::new(44, Some(true))).unwrap();
        assert!(s.start_year_is_bc && s.end_year_is_bc);
    }

    #[test]
    fn test_fallback_unknown_era_reads_ad() {
        let s = fallback(&PageContext::new(300, None)).unwrap();
        assert!(!s.start_year_is_bc);
    }

    #[test]
    fn test_fallback_rejects_year_zero() {
        assert!(fallback(&PageContext::new(0, Some(false))).is_none());
    }
}
