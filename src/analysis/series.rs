//! Normalization of raw report rows into one chronologically-indexed series.

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::Sample;

/// The full multi-day energy series plus the set of distinct calendar dates
/// present in it.
///
/// Samples keep their source concatenation order; overlapping report files may
/// produce duplicates and out-of-order runs, and consumers must not assume
/// global sortedness. The date set is sorted and deduplicated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    samples: Vec<Sample>,
    dates: Vec<NaiveDate>,
}

impl Series {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let dates = samples
            .iter()
            .map(Sample::date)
            .sorted()
            .dedup()
            .collect();
        Self { samples, dates }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sorted distinct calendar dates present in the series.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn n_days(&self) -> usize {
        self.dates.len()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn energies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.energy_wh).collect()
    }
}
