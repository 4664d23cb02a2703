//! Command dispatch and text output.
//!
//! Thin shell around the analysis pipeline: loads the reports named by the
//! config (or the `--reports` override), computes one snapshot, and prints the
//! requested view of it.

pub mod args;

use anyhow::Result;

use crate::analysis::Snapshot;
use crate::config::Config;
use crate::domain::DayComparison;
use crate::ingest;

pub use args::{Cli, Commands, MatchingArgs};

pub fn run(cli: Cli) -> Result<()> {
    let mut cfg = Config::load()?;
    if let Some(template) = cli.reports {
        cfg.reports.template = template;
    }

    let samples = ingest::load_samples(&cfg.reports)?;
    let snapshot = Snapshot::compute(samples, &cfg.detection)?;

    if cli.json {
        let rendered = match cli.command {
            Commands::Summary => serde_json::to_string_pretty(&snapshot.summary())?,
            Commands::Detect => serde_json::to_string_pretty(&snapshot.cloud)?,
            Commands::Clear => serde_json::to_string_pretty(&snapshot.cloud.clear_days)?,
            Commands::Matching(args) => {
                serde_json::to_string_pretty(&snapshot.match_dates(args.date, !args.single)?)?
            }
        };
        println!("{rendered}");
        return Ok(());
    }

    match cli.command {
        Commands::Summary => print_summary(&snapshot),
        Commands::Detect => print_detection(&snapshot),
        Commands::Clear => print_clear_days(&snapshot),
        Commands::Matching(args) => print_matching(&snapshot, &args)?,
    }
    Ok(())
}

fn print_summary(snapshot: &Snapshot) {
    print!("{}", snapshot.summary());
}

fn print_detection(snapshot: &Snapshot) {
    println!("{:<12} {:>8}  {}", "date", "flagged", "label");
    for coverage in &snapshot.cloud.coverage {
        let label = if snapshot.cloud.is_clear(coverage.date) {
            "clear"
        } else {
            "cloudy"
        };
        println!(
            "{:<12} {:>8}  {}",
            coverage.date, coverage.flagged_count, label
        );
    }

    if snapshot.cloud.flagged.is_empty() {
        println!("\nNo flagged samples.");
        return;
    }

    println!("\nFlagged samples:");
    for &i in &snapshot.cloud.flagged {
        let sample = &snapshot.series.samples()[i];
        println!(
            "  {}  {:>10.1} Wh  slope {:>8.1}",
            sample.timestamp, sample.energy_wh, snapshot.derivatives.slope[i]
        );
    }
}

fn print_clear_days(snapshot: &Snapshot) {
    if snapshot.cloud.clear_days.is_empty() {
        println!("No clear days found.");
        return;
    }
    println!("{:<12} {:>12}  {:>8}", "date", "sum [Wh]", "flagged");
    for day in &snapshot.cloud.clear_days {
        println!(
            "{:<12} {:>12.1}  {:>8}",
            day.date, day.sum_wh, day.flagged_count
        );
    }
}

fn print_matching(snapshot: &Snapshot, args: &MatchingArgs) -> Result<()> {
    let comparison = snapshot.match_dates(args.date, !args.single)?;

    if let Some(reason) = &comparison.skipped {
        println!("Warning: {reason}; showing {} only.", args.date);
    } else if let Some(matched) = comparison.matched_date() {
        println!("Comparing {} with {matched}", args.date);
    }

    print_comparison(&comparison);
    Ok(())
}

fn print_comparison(comparison: &DayComparison) {
    match &comparison.matched {
        Some(matched) => {
            println!(
                "{:<8} {:>12}  {:>12}",
                "time", comparison.reference.date, matched.date
            );
            // Align rows by time of day; days with differing cadence simply
            // print their leftover rows one-sided.
            let mut left = comparison.reference.points.iter().peekable();
            let mut right = matched.points.iter().peekable();
            loop {
                match (left.peek(), right.peek()) {
                    (Some((t0, v0)), Some((t1, v1))) if t0 == t1 => {
                        println!("{:<8} {v0:>12.1}  {v1:>12.1}", t0.format("%H:%M"));
                        left.next();
                        right.next();
                    }
                    (Some((t0, v0)), Some((t1, _))) if t0 < t1 => {
                        println!("{:<8} {v0:>12.1}  {:>12}", t0.format("%H:%M"), "-");
                        left.next();
                    }
                    (Some(_), Some((t1, v1))) => {
                        println!("{:<8} {:>12}  {v1:>12.1}", t1.format("%H:%M"), "-");
                        right.next();
                    }
                    (Some((t0, v0)), None) => {
                        println!("{:<8} {v0:>12.1}  {:>12}", t0.format("%H:%M"), "-");
                        left.next();
                    }
                    (None, Some((t1, v1))) => {
                        println!("{:<8} {:>12}  {v1:>12.1}", t1.format("%H:%M"), "-");
                        right.next();
                    }
                    (None, None) => break,
                }
            }
        }
        None => {
            println!("{:<8} {:>12}", "time", comparison.reference.date);
            for (t, v) in &comparison.reference.points {
                println!("{:<8} {v:>12.1}", t.format("%H:%M"));
            }
        }
    }
}
