//! Backtest runner — wires together the engine, metrics, and report.

use barlab_core::domain::{Bar, EquitySnapshot};
use barlab_core::engine::{run_simulation, SimError};
use barlab_core::fingerprint::RunFingerprint;
use barlab_core::ledger::Ledger;
use barlab_core::signal::SignalStream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, RunConfig};
use crate::loader::LoadError;
use crate::metrics::EquityAnalysis;
use crate::report::BacktestReport;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Load(#[from] LoadError),
    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
}

/// Complete result of a single backtest run: the headline report plus the
/// full trade log, equity curve, and drawdown analysis for downstream
/// consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestOutcome {
    pub report: BacktestReport,
    pub ledger: Ledger,
    pub equity_curve: Vec<EquitySnapshot>,
    pub analysis: EquityAnalysis,
    pub fingerprint: RunFingerprint,
}

/// Run a single backtest over pre-loaded bars and signals.
pub fn run_backtest(
    bars: &[Bar],
    signals: &SignalStream,
    config: &RunConfig,
) -> Result<BacktestOutcome, RunError> {
    let result = run_simulation(bars, signals, &config.to_sim_config())?;
    let analysis = EquityAnalysis::compute(&result.equity_curve);
    let report = BacktestReport::from_run(&result, &analysis, config.initial_capital);

    Ok(BacktestOutcome {
        report,
        ledger: result.ledger,
        equity_curve: result.equity_curve,
        analysis,
        fingerprint: result.fingerprint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use barlab_core::domain::ExitReason;
    use barlab_core::signal::Signal;
    use chrono::NaiveDate;

    fn make_bars(ohlc: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        ohlc.iter()
            .enumerate()
            .map(|(i, &(o, h, l, c))| Bar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open: o,
                high: h,
                low: l,
                close: c,
                volume: 100.0,
            })
            .collect()
    }

    fn base_config() -> RunConfig {
        RunConfig {
            initial_capital: 10_000.0,
            stop_fraction: 0.03,
            take_fraction: 0.05,
            fee_rate: 0.0,
            tax_rate: 0.0,
            allow_short: true,
        }
    }

    #[test]
    fn outcome_parts_are_consistent() {
        let bars = make_bars(&[
            (100.0, 100.0, 100.0, 100.0),
            (100.0, 100.0, 100.0, 100.0), // entry
            (101.0, 105.5, 100.5, 105.0), // take-profit at 105
            (105.0, 105.0, 105.0, 105.0),
        ]);
        let signals = SignalStream::new(vec![
            Signal::Flat,
            Signal::Long,
            Signal::Flat,
            Signal::Flat,
        ]);

        let outcome = run_backtest(&bars, &signals, &base_config()).unwrap();

        assert_eq!(outcome.report.trade_count, outcome.ledger.len());
        assert_eq!(outcome.equity_curve.len(), bars.len());
        assert_eq!(outcome.analysis.drawdown.len(), bars.len());
        assert_eq!(outcome.report.run_hash, outcome.fingerprint.run_hash);
        assert_eq!(
            outcome.ledger.trades()[0].exit_reason,
            ExitReason::TakeProfit
        );
        assert!((outcome.report.final_equity - 10_500.0).abs() < 1e-9);
        assert!((outcome.report.total_return - 0.05).abs() < 1e-12);
    }

    #[test]
    fn engine_errors_surface_as_run_errors() {
        let bars = make_bars(&[(100.0, 100.0, 100.0, 100.0)]);
        let signals = SignalStream::new(vec![]);
        let err = run_backtest(&bars, &signals, &base_config()).unwrap_err();
        assert!(matches!(err, RunError::Sim(_)));
    }

    #[test]
    fn outcome_round_trips_through_json() {
        let bars = make_bars(&[
            (100.0, 100.0, 100.0, 100.0),
            (100.0, 100.0, 100.0, 100.0),
            (101.0, 101.0, 100.0, 101.0),
        ]);
        let signals = SignalStream::new(vec![Signal::Flat, Signal::Long, Signal::Flat]);

        let outcome = run_backtest(&bars, &signals, &base_config()).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let deser: BacktestOutcome = serde_json::from_str(&json).unwrap();

        assert_eq!(outcome.report, deser.report);
        assert_eq!(outcome.ledger, deser.ledger);
        assert_eq!(outcome.equity_curve, deser.equity_curve);
    }
}
