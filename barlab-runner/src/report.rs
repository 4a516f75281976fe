//! Scalar run summary with stable field names for reporting layers.

use crate::metrics::{profit_factor, EquityAnalysis};
use barlab_core::domain::PositionSide;
use barlab_core::engine::RunResult;
use barlab_core::ledger::SideSummary;
use serde::{Deserialize, Serialize};

/// Headline numbers for one backtest run.
///
/// Field names are part of the reporting contract — exporters, tables, and
/// notification layers all read them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub initial_capital: f64,
    pub final_equity: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub trade_count: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub long_trades: SideSummary,
    pub short_trades: SideSummary,
    pub bar_count: usize,
    pub warnings: Vec<String>,
    /// Content hash of config + data; identical runs share it.
    pub run_hash: String,
}

impl BacktestReport {
    pub fn from_run(result: &RunResult, analysis: &EquityAnalysis, initial_capital: f64) -> Self {
        Self {
            initial_capital,
            final_equity: result.final_equity,
            total_return: (result.final_equity - initial_capital) / initial_capital,
            max_drawdown: analysis.max_drawdown,
            trade_count: result.ledger.len(),
            win_rate: result.ledger.win_rate(),
            profit_factor: profit_factor(result.ledger.trades()),
            long_trades: result.ledger.side_summary(PositionSide::Long),
            short_trades: result.ledger.side_summary(PositionSide::Short),
            bar_count: result.bar_count,
            warnings: result.warnings.clone(),
            run_hash: result.fingerprint.run_hash.clone(),
        }
    }
}
