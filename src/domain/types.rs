use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single inverter measurement.
///
/// Energy may be NaN when the source report left the cell empty; downstream
/// aggregation skips undefined values instead of poisoning daily sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub energy_wh: f64,
    /// Original timestamp string from the report, kept for display output.
    pub raw_timestamp: Option<String>,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, energy_wh: f64) -> Self {
        Self {
            timestamp,
            energy_wh,
            raw_timestamp: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Total produced energy for one calendar date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub sum_wh: f64,
}

/// Number of threshold-exceeding samples on one calendar date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CloudCoverage {
    pub date: NaiveDate,
    pub flagged_count: usize,
}

/// A day judged to have had largely uninterrupted sunlight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClearDay {
    pub date: NaiveDate,
    pub sum_wh: f64,
    pub flagged_count: usize,
    /// Date shifted to local noon, used purely for chronological plot order.
    pub display_at: NaiveDateTime,
}

impl ClearDay {
    pub fn new(date: NaiveDate, sum_wh: f64, flagged_count: usize) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");
        Self {
            date,
            sum_wh,
            flagged_count,
            display_at: date.and_time(noon),
        }
    }
}

/// One day's production curve re-indexed by time of day, so that two
/// different calendar dates can be overlaid on a shared 0:00-24:00 axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCurve {
    pub date: NaiveDate,
    pub points: Vec<(NaiveTime, f64)>,
}

impl DayCurve {
    /// True when every energy value of the day is undefined.
    pub fn is_empty_of_values(&self) -> bool {
        self.points.iter().all(|(_, wh)| wh.is_nan())
    }
}

/// Why a requested one-year comparison degraded to single-day mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSkipReason {
    /// The matching date lies beyond the newest loaded report.
    Future { date: NaiveDate },
    /// The matching date is within range but absent from the reports.
    Unavailable { date: NaiveDate },
    /// The matching date exists but carries no defined energy values.
    EmptyDay { date: NaiveDate },
}

impl fmt::Display for MatchSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Future { date } => write!(f, "matching date ({date}) is in the future"),
            Self::Unavailable { date } => write!(f, "matching date ({date}) is not available"),
            Self::EmptyDay { date } => {
                write!(f, "matching date ({date}) has no defined energy values")
            }
        }
    }
}

/// Result of a date-matching query: the reference day's curve, plus the
/// one-year-offset day's curve when it could be resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayComparison {
    pub reference: DayCurve,
    pub matched: Option<DayCurve>,
    /// Set when the comparison was requested but had to be skipped.
    pub skipped: Option<MatchSkipReason>,
}

impl DayComparison {
    pub fn matched_date(&self) -> Option<NaiveDate> {
        self.matched.as_ref().map(|curve| curve.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_clear_day_display_timestamp_is_noon() {
        let day = ClearDay::new(date(2021, 8, 15), 6100.0, 2);
        assert_eq!(
            day.display_at,
            date(2021, 8, 15).and_hms_opt(12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_day_curve_empty_of_values() {
        let t = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let all_nan = DayCurve {
            date: date(2021, 8, 15),
            points: vec![(t, f64::NAN), (t, f64::NAN)],
        };
        assert!(all_nan.is_empty_of_values());

        let mixed = DayCurve {
            date: date(2021, 8, 15),
            points: vec![(t, f64::NAN), (t, 12.0)],
        };
        assert!(!mixed.is_empty_of_values());
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = MatchSkipReason::Future {
            date: date(2023, 8, 15),
        };
        assert_eq!(reason.to_string(), "matching date (2023-08-15) is in the future");
    }
}
