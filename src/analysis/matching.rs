//! Year-over-year date matching.
//!
//! Resolves a reference day's intraday curve together with the curve of the
//! same calendar day one year later, re-indexed by time of day so both can be
//! overlaid on a shared 0:00-24:00 axis.

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::analysis::series::Series;
use crate::domain::{DayComparison, DayCurve, MatchSkipReason};
use crate::error::AnalysisError;

/// The calendar date exactly one year after `date`. Feb 29 maps to Feb 28 of
/// the following year.
pub fn one_year_later(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() + 1).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(date.year() + 1, 2, 28).expect("valid date")
    })
}

/// Extract one day's curve, re-indexed by time of day.
///
/// `DateUnavailable` when the date is absent from the date set; a date present
/// in the date set with zero samples would violate the series invariant and is
/// treated as a programming error.
fn day_curve(series: &Series, date: NaiveDate) -> Result<DayCurve, AnalysisError> {
    if !series.contains_date(date) {
        return Err(AnalysisError::DateUnavailable { date });
    }
    let points: Vec<_> = series
        .samples()
        .iter()
        .filter(|s| s.date() == date)
        .map(|s| (s.timestamp.time(), s.energy_wh))
        .collect();
    debug_assert!(!points.is_empty(), "date set contains {date} but no samples match");
    Ok(DayCurve { date, points })
}

/// Resolve the reference day and, when requested, the day one calendar year
/// later for side-by-side comparison.
///
/// The reference date must lie within the loaded range and carry defined
/// values. A matching date that is in the future, absent from the reports, or
/// holds only undefined values degrades the result to single-day mode with an
/// explanatory reason instead of failing.
pub fn match_dates(
    series: &Series,
    reference: NaiveDate,
    with_match: bool,
) -> Result<DayComparison, AnalysisError> {
    let (min, max) = match (series.min_date(), series.max_date()) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(AnalysisError::DateUnavailable { date: reference }),
    };
    if reference < min || reference > max {
        return Err(AnalysisError::DateOutOfRange {
            date: reference,
            min,
            max,
        });
    }

    let curve = day_curve(series, reference)?;
    if curve.is_empty_of_values() {
        return Err(AnalysisError::EmptyDaySeries { date: reference });
    }

    if !with_match {
        return Ok(DayComparison {
            reference: curve,
            matched: None,
            skipped: None,
        });
    }

    let matched_date = one_year_later(reference);
    let skipped = if matched_date > max {
        Some(MatchSkipReason::Future { date: matched_date })
    } else if !series.contains_date(matched_date) {
        Some(MatchSkipReason::Unavailable { date: matched_date })
    } else {
        None
    };

    if let Some(reason) = skipped {
        warn!(%reason, "comparison disabled");
        return Ok(DayComparison {
            reference: curve,
            matched: None,
            skipped: Some(reason),
        });
    }

    let matched = day_curve(series, matched_date)?;
    if matched.is_empty_of_values() {
        let reason = MatchSkipReason::EmptyDay { date: matched_date };
        warn!(%reason, "comparison disabled");
        return Ok(DayComparison {
            reference: curve,
            matched: None,
            skipped: Some(reason),
        });
    }

    info!("comparing {reference} with {matched_date}");
    Ok(DayComparison {
        reference: curve,
        matched: Some(matched),
        skipped: None,
    })
}
