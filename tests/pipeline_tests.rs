//! End-to-end pipeline tests: CSV reports on disk through ingestion,
//! classification, and date matching.

use std::fs::File;
use std::io::Write;

use chrono::{NaiveDate, Timelike};
use proptest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;

use pv_clearsky::analysis::{daily_sums, Series, Snapshot};
use pv_clearsky::config::{DetectionConfig, ReportsConfig};
use pv_clearsky::domain::{MatchSkipReason, Sample};
use pv_clearsky::ingest;

fn reports_cfg(dir: &TempDir) -> ReportsConfig {
    ReportsConfig {
        template: format!("{}/Weekly_*.csv", dir.path().display()),
        timestamp_format: "%d.%m.%Y %H:%M".to_string(),
    }
}

/// Write one day of 96 bell-curve samples at 15-minute cadence as a report
/// file, with spikes added at the given sample indices.
fn write_day_report(dir: &TempDir, name: &str, date: NaiveDate, spikes: &[usize]) {
    let mut body = String::from("Weekly report\nsys time,[dd.MM.yyyy HH:mm],[Wh],[W],[A]\n");
    for i in 0..96usize {
        let x = i as f64 / 95.0;
        let mut wh = (std::f64::consts::PI * x).sin().max(0.0) * 100.0;
        if spikes.contains(&i) {
            wh += 500.0;
        }
        let t = date
            .and_hms_opt((i / 4) as u32, ((i % 4) * 15) as u32, 0)
            .unwrap();
        let stamp = t.format("%d.%m.%Y %H:%M");
        body.push_str(&format!("{stamp},{stamp},{wh:.3},0,0\n"));
    }
    let mut f = File::create(dir.path().join(name)).unwrap();
    f.write_all(body.as_bytes()).unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn csv_to_classification_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_day_report(&dir, "Weekly_01.csv", date(2021, 8, 15), &[]);
    write_day_report(&dir, "Weekly_02.csv", date(2021, 8, 16), &[30, 48, 66]);

    let samples = ingest::load_samples(&reports_cfg(&dir)).unwrap();
    assert_eq!(samples.len(), 192);

    let snapshot = Snapshot::compute(samples, &DetectionConfig::default()).unwrap();

    assert!(snapshot.cloud.is_clear(date(2021, 8, 15)));
    assert!(!snapshot.cloud.is_clear(date(2021, 8, 16)));
    assert!(snapshot.cloud.flagged_count_on(date(2021, 8, 16)).unwrap() >= 3);

    let summary = snapshot.summary();
    assert_eq!(summary.n_days, 2);
    assert_eq!(summary.n_clear_days, 1);
    // The spiked day carries the extra energy
    assert_eq!(summary.brightest, Some(date(2021, 8, 16)));
    assert_eq!(summary.dimmest, Some(date(2021, 8, 15)));
}

#[rstest]
#[case::no_spikes(&[], true)]
#[case::five_spikes_two_flags_each(&[10, 25, 40, 55, 70], false)]
#[case::two_spikes(&[30, 60], true)]
fn spike_count_drives_the_label(#[case] spikes: &[usize], #[case] expect_clear: bool) {
    let dir = TempDir::new().unwrap();
    write_day_report(&dir, "Weekly_01.csv", date(2021, 8, 15), &[]);
    write_day_report(&dir, "Weekly_02.csv", date(2021, 8, 16), spikes);

    let samples = ingest::load_samples(&reports_cfg(&dir)).unwrap();
    let snapshot = Snapshot::compute(samples, &DetectionConfig::default()).unwrap();
    assert_eq!(snapshot.cloud.is_clear(date(2021, 8, 16)), expect_clear);
}

#[test]
fn year_over_year_matching_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_day_report(&dir, "Weekly_01.csv", date(2021, 8, 15), &[]);
    write_day_report(&dir, "Weekly_02.csv", date(2022, 8, 15), &[]);

    let samples = ingest::load_samples(&reports_cfg(&dir)).unwrap();
    let snapshot = Snapshot::compute(samples, &DetectionConfig::default()).unwrap();

    let cmp = snapshot.match_dates(date(2021, 8, 15), true).unwrap();
    let matched = cmp.matched.expect("matched day resolves");
    assert_eq!(matched.date, date(2022, 8, 15));
    assert_eq!(cmp.reference.points.len(), 96);
    assert_eq!(matched.points.len(), 96);
    // Overlaid on a shared time-of-day axis
    assert_eq!(cmp.reference.points[0].0.hour(), 0);
    assert_eq!(cmp.reference.points[0].0, matched.points[0].0);

    // The newest day has no next year yet
    let cmp = snapshot.match_dates(date(2022, 8, 15), true).unwrap();
    assert!(matches!(
        cmp.skipped,
        Some(MatchSkipReason::Future { .. })
    ));
    assert!(cmp.matched.is_none());
}

#[test]
fn clear_days_always_resolve_in_the_matcher() {
    let dir = TempDir::new().unwrap();
    write_day_report(&dir, "Weekly_01.csv", date(2021, 8, 15), &[]);
    write_day_report(&dir, "Weekly_02.csv", date(2021, 8, 16), &[]);
    write_day_report(&dir, "Weekly_03.csv", date(2021, 8, 17), &[5, 20, 35, 50]);

    let samples = ingest::load_samples(&reports_cfg(&dir)).unwrap();
    let snapshot = Snapshot::compute(samples, &DetectionConfig::default()).unwrap();

    assert!(!snapshot.cloud.clear_days.is_empty());
    for clear in &snapshot.cloud.clear_days {
        let cmp = snapshot.match_dates(clear.date, false).unwrap();
        assert_eq!(cmp.reference.date, clear.date);
    }
}

proptest! {
    /// Partition property: summing per-day totals recovers the total of all
    /// defined samples, regardless of how rows are spread across days.
    #[test]
    fn daily_sums_partition_the_series(
        energies in prop::collection::vec(0.0f64..1000.0, 1..200),
        day_picks in prop::collection::vec(0u32..5, 1..200),
    ) {
        let samples: Vec<Sample> = energies
            .iter()
            .zip(day_picks.iter().cycle())
            .enumerate()
            .map(|(i, (&wh, &d))| {
                let ts = date(2021, 8, 10 + d)
                    .and_hms_opt((i % 24) as u32, 0, 0)
                    .unwrap();
                Sample::new(ts, wh)
            })
            .collect();

        let total: f64 = samples.iter().map(|s| s.energy_wh).sum();
        let series = Series::from_samples(samples);
        let sums = daily_sums(&series);

        prop_assert_eq!(sums.len(), series.n_days());
        let partitioned: f64 = sums.values().sum();
        prop_assert!((partitioned - total).abs() < 1e-6 * total.max(1.0));
    }
}
