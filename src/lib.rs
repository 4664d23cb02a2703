//! PV production report analyzer.
//!
//! Loads timestamped energy samples from inverter CSV exports, reconstructs
//! per-day production curves, classifies each calendar day as clear or cloudy
//! from short-term slope volatility, and aligns a day's curve against the same
//! calendar day one year later.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod telemetry;
