//! One immutable load-and-classify result.
//!
//! A fresh load builds a whole new snapshot; nothing is updated incrementally.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::cloud::{classify, CloudReport};
use crate::analysis::daily::daily_sums;
use crate::analysis::derivative::DerivativeSeries;
use crate::analysis::matching;
use crate::analysis::series::Series;
use crate::config::DetectionConfig;
use crate::domain::{DayComparison, Sample};
use crate::error::AnalysisError;

/// All derived state for one loaded report set: the series, its derivatives,
/// per-day totals, and the clear/cloudy classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub series: Series,
    pub derivatives: DerivativeSeries,
    pub daily_sums: BTreeMap<NaiveDate, f64>,
    pub cloud: CloudReport,
}

impl Snapshot {
    /// Run the full pipeline over a set of raw samples.
    pub fn compute(samples: Vec<Sample>, cfg: &DetectionConfig) -> Result<Self, AnalysisError> {
        let series = Series::from_samples(samples);
        let derivatives = DerivativeSeries::compute(&series.energies());
        let sums = daily_sums(&series);
        let cloud = classify(&series, &derivatives, &sums, cfg)?;

        info!(
            samples = series.len(),
            days = series.n_days(),
            clear_days = cloud.clear_days.len(),
            "analysis complete"
        );

        Ok(Self {
            series,
            derivatives,
            daily_sums: sums,
            cloud,
        })
    }

    /// Read-only year-over-year query against this snapshot.
    pub fn match_dates(
        &self,
        reference: NaiveDate,
        with_match: bool,
    ) -> Result<DayComparison, AnalysisError> {
        matching::match_dates(&self.series, reference, with_match)
    }

    /// One-line status report data: day counts and the extreme days.
    pub fn summary(&self) -> Summary {
        let dimmest = extreme_day(&self.daily_sums, |a, b| a < b);
        let brightest = extreme_day(&self.daily_sums, |a, b| a > b);
        Summary {
            n_days: self.series.n_days(),
            n_clear_days: self.cloud.clear_days.len(),
            dimmest,
            brightest,
        }
    }
}

fn extreme_day(
    sums: &BTreeMap<NaiveDate, f64>,
    better: impl Fn(f64, f64) -> bool,
) -> Option<NaiveDate> {
    let mut best: Option<(NaiveDate, f64)> = None;
    for (&date, &sum) in sums {
        match best {
            Some((_, current)) if !better(sum, current) => {}
            _ => best = Some((date, sum)),
        }
    }
    best.map(|(date, _)| date)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub n_days: usize,
    pub n_clear_days: usize,
    pub dimmest: Option<NaiveDate>,
    pub brightest: Option<NaiveDate>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of days in reports: {}", self.n_days)?;
        writeln!(f, "Number of clear days: {}", self.n_clear_days)?;
        if let (Some(dimmest), Some(brightest)) = (self.dimmest, self.brightest) {
            writeln!(f, "Dimmest day: {dimmest}")?;
            writeln!(f, "Brightest day: {brightest}")?;
        }
        Ok(())
    }
}
