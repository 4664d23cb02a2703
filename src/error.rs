use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating and parsing report files.
///
/// Malformed rows fail fast with file and line context instead of leaking
/// undefined values into the numeric pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No reports found using template: {template}")]
    NoReports { template: String },

    #[error("Invalid report template {template:?}: {source}")]
    BadTemplate {
        template: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse report {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Report {} is missing the {column:?} column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Report {} line {line}: invalid timestamp {value:?} (expected {format})", path.display())]
    Timestamp {
        path: PathBuf,
        line: u64,
        value: String,
        format: String,
    },

    #[error("Report {} line {line}: invalid energy value {value:?}", path.display())]
    Energy {
        path: PathBuf,
        line: u64,
        value: String,
    },
}

/// Errors raised by the analysis pipeline and date-matching queries.
///
/// All variants are recoverable at the core boundary; callers degrade or
/// re-prompt rather than abort.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Degenerate dataset: maximum daily sum is not a positive finite value")]
    DegenerateData,

    #[error("Date {date} is outside the loaded range [{min}, {max}]")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("No report data available for {date}")]
    DateUnavailable { date: NaiveDate },

    #[error("Day {date} has no defined energy values")]
    EmptyDaySeries { date: NaiveDate },
}
