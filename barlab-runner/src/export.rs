//! Artifact export — trade tape and equity curve as CSV, full outcome as
//! JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::runner::BacktestOutcome;
use barlab_core::domain::EquitySnapshot;
use barlab_core::ledger::Ledger;

#[derive(Serialize)]
struct EquityRow {
    timestamp: String,
    equity: f64,
}

/// One row per trade, flat columns per the ledger's tabular form.
pub fn write_trades_csv(path: &Path, ledger: &Ledger) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;
    for row in ledger.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_equity_csv(path: &Path, curve: &[EquitySnapshot]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create equity CSV {}", path.display()))?;
    for snap in curve {
        writer.serialize(EquityRow {
            timestamp: snap.timestamp.to_string(),
            equity: snap.equity,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_outcome_json(path: &Path, outcome: &BacktestOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("failed to serialize outcome")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write outcome JSON {}", path.display()))?;
    Ok(())
}

/// Write the full artifact set (trades.csv, equity.csv, outcome.json) under
/// a run directory named by the run hash. Returns the run directory.
pub fn save_artifacts(outcome: &BacktestOutcome, output_dir: &Path) -> Result<PathBuf> {
    let run_dir = output_dir.join(&outcome.report.run_hash[..12]);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create run directory {}", run_dir.display()))?;

    write_trades_csv(&run_dir.join("trades.csv"), &outcome.ledger)?;
    write_equity_csv(&run_dir.join("equity.csv"), &outcome.equity_curve)?;
    write_outcome_json(&run_dir.join("outcome.json"), outcome)?;

    Ok(run_dir)
}
