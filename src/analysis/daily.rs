//! Per-date energy totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analysis::series::Series;

/// Sum of energy values per distinct calendar date, one entry per member of
/// the series' date set. NaN samples are skipped, so a day holding only
/// undefined values sums to zero.
pub fn daily_sums(series: &Series) -> BTreeMap<NaiveDate, f64> {
    let mut sums: BTreeMap<NaiveDate, f64> = series
        .dates()
        .iter()
        .map(|&date| (date, 0.0))
        .collect();

    for sample in series.samples() {
        if sample.energy_wh.is_nan() {
            continue;
        }
        if let Some(sum) = sums.get_mut(&sample.date()) {
            *sum += sample.energy_wh;
        }
    }
    sums
}
