//! Barlab runner — backtest orchestration on top of `barlab-core`.
//!
//! This crate provides:
//! - TOML-loadable run configuration with content-hashed run IDs
//! - Single-backtest runner wiring engine, metrics, and report together
//! - Performance metrics (cumulative return, running peak, drawdown)
//! - Parameter sweeps over risk settings, parallel via rayon
//! - CSV import of bars/signals and artifact export
//! - Seeded synthetic data for demos and tests

pub mod config;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod sweep;
pub mod synthetic;

pub use config::{ConfigError, RunConfig};
pub use export::{save_artifacts, write_equity_csv, write_trades_csv};
pub use loader::{load_bars_csv, load_signals_csv, LoadError};
pub use metrics::EquityAnalysis;
pub use report::BacktestReport;
pub use runner::{run_backtest, BacktestOutcome, RunError};
pub use sweep::{ParamGrid, ParamSweep, SweepOutcome, SweepResults};
pub use synthetic::{synthetic_bars, synthetic_signals};
