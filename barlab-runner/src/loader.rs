//! CSV import for bars and signals.
//!
//! The engine takes pre-aligned slices; these loaders are the host-side
//! bridge from files on disk. Network retrieval lives with the data
//! provider, not here.

use barlab_core::domain::Bar;
use barlab_core::signal::{Signal, SignalStream};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unrecognized timestamp '{value}'")]
    Timestamp { row: usize, value: String },

    #[error("row {row}: unrecognized signal '{value}'")]
    Signal { row: usize, value: String },

    #[error("row {row}: bar violates the OHLC envelope")]
    InsaneBar { row: usize },
}

#[derive(Debug, Deserialize)]
struct BarRecord {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: f64,
}

#[derive(Debug, Deserialize)]
struct SignalRecord {
    signal: String,
}

/// Load a bar series from a CSV file with columns
/// `timestamp,open,high,low,close,volume`.
///
/// Rows are checked against the OHLC envelope here so a malformed file fails
/// at the load boundary with a row number, not later inside the engine.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars = Vec::new();
    for (row, record) in reader.deserialize::<BarRecord>().enumerate() {
        let record = record?;
        let timestamp =
            parse_timestamp(&record.timestamp).ok_or_else(|| LoadError::Timestamp {
                row,
                value: record.timestamp.clone(),
            })?;
        let bar = Bar {
            timestamp,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        };
        if !bar.is_sane() {
            return Err(LoadError::InsaneBar { row });
        }
        bars.push(bar);
    }
    Ok(bars)
}

/// Load a signal stream from a CSV file with a `signal` column.
///
/// Accepted values: `long`/`1`, `short`/`-1`, `flat`/`none`/`0`, and empty
/// or `nan` for warm-up gaps.
pub fn load_signals_csv(path: &Path) -> Result<SignalStream, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut raw = Vec::new();
    for (row, record) in reader.deserialize::<SignalRecord>().enumerate() {
        let record = record?;
        let parsed = parse_signal(&record.signal).ok_or_else(|| LoadError::Signal {
            row,
            value: record.signal.clone(),
        })?;
        raw.push(parsed);
    }
    Ok(SignalStream::from_sparse(&raw))
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(ts);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `Some(None)` is a warm-up gap; outer `None` means unparseable.
fn parse_signal(text: &str) -> Option<Option<Signal>> {
    match text.trim().to_ascii_lowercase().as_str() {
        "" | "nan" => Some(None),
        "long" | "1" => Some(Some(Signal::Long)),
        "short" | "-1" => Some(Some(Signal::Short)),
        "flat" | "none" | "0" => Some(Some(Signal::Flat)),
        _ => None,
    }
}
