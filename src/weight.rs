//! Span duration ("weight") in days.
//!
//! BC years are mapped onto the proleptic axis here (`-year + 1`) before
//! chrono sees them; chrono only ever receives an astronomical year.

use chrono::NaiveDate;
use span_types::{Precision, Span};
use tracing::debug;

/// Inclusive day count between the span's endpoints.
///
/// Returns `None` when either endpoint is not a real calendar date
/// (e.g. 31 September) or lies outside the range chrono can represent.
pub fn compute_weight_days(span: &Span) -> Option<i64> {
    let start = endpoint_date(span.start_axis_year(), span.start_month, span.start_day)?;
    let end = endpoint_date(span.end_axis_year(), span.end_month, span.end_day)?;
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    end.signed_duration_since(start).num_days().checked_add(1)
}

/// Multiply a day count by the precision value, rounding to whole days.
pub fn scaled_by_precision(days: i64, precision: Precision) -> Option<i64> {
    let scaled = (days as f64 * precision.value()).round();
    if scaled.is_finite() && scaled.abs() < i64::MAX as f64 {
        Some(scaled as i64)
    } else {
        None
    }
}

/// Base weight scaled by precision, as the year-family strategies report it.
pub fn precision_weight(span: &Span) -> Option<i64> {
    compute_weight_days(span).and_then(|days| scaled_by_precision(days, span.precision))
}

/// Attach the unscaled day count unless the strategy already set a weight.
pub fn fill_weight(span: Span) -> Span {
    if span.weight.is_some() {
        return span;
    }
    let weight = compute_weight_days(&span);
    if weight.is_none() {
        debug!(match_type = %span.match_type, "weight could not be computed");
    }
    span.with_weight(weight)
}

fn endpoint_date(axis: i64, month: u8, day: u8) -> Option<NaiveDate> {
    let year = i32::try_from(axis).ok()?;
    // 0 marks a missing component
    let month = u32::from(month.max(1));
    let day = u32::from(day.max(1));
    NaiveDate::from_ymd_opt(year, month, day)
}
