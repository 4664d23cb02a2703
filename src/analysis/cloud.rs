//! Clear/cloudy day classification.
//!
//! Cloud-induced fluctuations scale with a day's overall production magnitude
//! rather than an absolute Wh value, so the slope threshold is self-normalizing:
//! the brightest day of the dataset sets the global sensitivity factor and each
//! day's threshold is its own total scaled by that factor.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::derivative::DerivativeSeries;
use crate::analysis::series::Series;
use crate::config::DetectionConfig;
use crate::domain::{ClearDay, CloudCoverage};
use crate::error::AnalysisError;

/// Classification output for one loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudReport {
    /// Global sensitivity factor, `scale / max(sum_wh)`.
    pub factor: f64,
    /// Per-day slope threshold, `sum_wh(date) * factor`.
    pub thresholds: BTreeMap<NaiveDate, f64>,
    /// Positions of all samples whose slope magnitude exceeded their day's
    /// threshold, index-aligned with the series.
    pub flagged: Vec<usize>,
    /// Per-day flagged sample counts.
    pub coverage: Vec<CloudCoverage>,
    /// Days at or below the clear-day flag bound, with their aggregate sums.
    pub clear_days: Vec<ClearDay>,
}

impl CloudReport {
    pub fn flagged_count_on(&self, date: NaiveDate) -> Option<usize> {
        self.coverage
            .iter()
            .find(|c| c.date == date)
            .map(|c| c.flagged_count)
    }

    pub fn is_clear(&self, date: NaiveDate) -> bool {
        self.clear_days.iter().any(|d| d.date == date)
    }
}

/// Classify every day of the series as clear or cloudy.
///
/// A sample is flagged when `|slope| > sum_wh(sample's date) * factor`; a
/// boundary-crossing slope value counts toward whichever day the sample's own
/// timestamp falls on. A day is clear when its flagged count is at most
/// `clear_day_max_flags`. An empty clear set is a valid outcome.
pub fn classify(
    series: &Series,
    derivatives: &DerivativeSeries,
    sums: &BTreeMap<NaiveDate, f64>,
    cfg: &DetectionConfig,
) -> Result<CloudReport, AnalysisError> {
    let max_sum = sums.values().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max_sum.is_finite() || max_sum <= 0.0 {
        return Err(AnalysisError::DegenerateData);
    }

    let factor = cfg.volatility_scale / max_sum;
    let thresholds: BTreeMap<NaiveDate, f64> = sums
        .iter()
        .map(|(&date, &sum)| (date, sum * factor))
        .collect();

    // Broadcast each day's threshold across its samples and flag by position.
    let mut flagged = Vec::new();
    let mut counts: BTreeMap<NaiveDate, usize> =
        series.dates().iter().map(|&d| (d, 0)).collect();

    for (i, sample) in series.samples().iter().enumerate() {
        let threshold = thresholds[&sample.date()];
        if derivatives.slope[i].abs() > threshold {
            flagged.push(i);
            if let Some(count) = counts.get_mut(&sample.date()) {
                *count += 1;
            }
        }
    }

    let coverage: Vec<CloudCoverage> = counts
        .iter()
        .map(|(&date, &flagged_count)| CloudCoverage {
            date,
            flagged_count,
        })
        .collect();

    let clear_days: Vec<ClearDay> = coverage
        .iter()
        .filter(|c| c.flagged_count <= cfg.clear_day_max_flags)
        .map(|c| ClearDay::new(c.date, sums[&c.date], c.flagged_count))
        .collect();

    debug!(
        factor,
        flagged = flagged.len(),
        clear = clear_days.len(),
        "cloud classification complete"
    );

    Ok(CloudReport {
        factor,
        thresholds,
        flagged,
        coverage,
        clear_days,
    })
}
