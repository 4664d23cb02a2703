//! CLI argument definitions using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pv-clearsky")]
#[command(author, version, about = "PV production report analyzer")]
#[command(
    long_about = "Analyzes weekly inverter CSV exports: per-day energy totals,\n\
    clear/cloudy day classification from slope volatility, and year-over-year\n\
    day comparison.\n\
    \nExamples:\n  \
    pv-clearsky summary\n  \
    pv-clearsky --reports '~/reports/Weekly_*.csv' detect\n  \
    pv-clearsky matching --date 2021-08-15"
)]
pub struct Cli {
    /// Glob template used to locate report files
    #[arg(long, value_name = "GLOB", global = true)]
    pub reports: Option<String>,

    /// Emit results as JSON instead of text tables
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// One-line status report: day counts, dimmest and brightest days
    Summary,

    /// Per-day cloud coverage counts and flagged sample positions
    Detect,

    /// List clear days with their daily energy totals
    Clear,

    /// Compare one day against the same calendar day one year later
    Matching(MatchingArgs),
}

#[derive(Parser)]
pub struct MatchingArgs {
    /// Reference date to look up
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: NaiveDate,

    /// Only print the reference day, skip the one-year comparison
    #[arg(long, default_value_t = false)]
    pub single: bool,
}
