//! Report discovery and parsing.
//!
//! Inverter exports are weekly CSV files with a title line, a header line, a
//! timestamp column (`DD.MM.YYYY HH:MM`), a `[Wh]` energy column, and in some
//! firmware revisions a sixth trailing column that carries no data. Rows from
//! all matched files are concatenated in file order; overlapping files are
//! tolerated and not deduplicated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::config::ReportsConfig;
use crate::domain::Sample;
use crate::error::IngestError;

const ENERGY_COLUMN: &str = "[Wh]";
const DISPLAY_COLUMN: &str = "[dd.MM.yyyy HH:mm]";

/// Expand a leading tilde and resolve the glob template to a sorted list of
/// report paths.
pub fn discover_reports(template: &str) -> Result<Vec<PathBuf>, IngestError> {
    let expanded = expand_tilde(template);
    let paths = glob::glob(&expanded)
        .map_err(|source| IngestError::BadTemplate {
            template: template.to_string(),
            source,
        })?
        .filter_map(Result::ok)
        .collect();
    Ok(paths)
}

/// Load and concatenate all reports matched by the template.
///
/// Zero matched files is the recoverable no-data condition; the caller may
/// retry with a different template.
pub fn load_samples(cfg: &ReportsConfig) -> Result<Vec<Sample>, IngestError> {
    let paths = discover_reports(&cfg.template)?;
    if paths.is_empty() {
        return Err(IngestError::NoReports {
            template: cfg.template.clone(),
        });
    }

    let mut samples = Vec::new();
    for path in &paths {
        let n_before = samples.len();
        read_report(path, &cfg.timestamp_format, &mut samples)?;
        debug!(
            path = %path.display(),
            rows = samples.len() - n_before,
            "report loaded"
        );
    }

    info!(reports = paths.len(), samples = samples.len(), "reports loaded");
    Ok(samples)
}

fn read_report(
    path: &Path,
    timestamp_format: &str,
    out: &mut Vec<Sample>,
) -> Result<(), IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    // The first line is a report title, not data.
    let mut title = String::new();
    reader
        .read_line(&mut title)
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let energy_idx = headers
        .iter()
        .position(|h| h == ENERGY_COLUMN)
        .ok_or_else(|| IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: ENERGY_COLUMN,
        })?;

    // Original timestamp strings are kept for display; fall back to the
    // timestamp column when the dedicated display column is absent.
    let display_idx = headers
        .iter()
        .position(|h| h == DISPLAY_COLUMN)
        .unwrap_or(0);

    if headers.len() == 6 {
        debug!(path = %path.display(), "6-column layout detected, dropping trailing column");
    }

    for result in csv_reader.records() {
        let record = result.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        // The title line was consumed before the CSV reader saw the input,
        // so file line numbers are off by one.
        let line = record.position().map(|p| p.line() + 1).unwrap_or(0);

        let stamp_field = record.get(0).unwrap_or("");
        let timestamp = NaiveDateTime::parse_from_str(stamp_field, timestamp_format)
            .map_err(|_| IngestError::Timestamp {
                path: path.to_path_buf(),
                line,
                value: stamp_field.to_string(),
                format: timestamp_format.to_string(),
            })?;
        let raw_timestamp = record.get(display_idx).unwrap_or(stamp_field).to_string();

        let energy_field = record.get(energy_idx).unwrap_or("");
        // Empty cells become NaN rather than failing the row; downstream
        // aggregation skips undefined values.
        let energy_wh = if energy_field.is_empty() {
            f64::NAN
        } else {
            energy_field
                .parse::<f64>()
                .map_err(|_| IngestError::Energy {
                    path: path.to_path_buf(),
                    line,
                    value: energy_field.to_string(),
                })?
        };

        out.push(Sample {
            timestamp,
            energy_wh,
            raw_timestamp: Some(raw_timestamp),
        });
    }

    Ok(())
}

fn expand_tilde(template: &str) -> String {
    if let Some(rest) = template.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return format!("{home}/{rest}");
        }
    }
    template.to_string()
}
