//! Parameter sweep utilities for grid search over risk settings.
//!
//! Independent runs share no state, so the sweep fans them out over rayon
//! worker threads when parallelism is enabled.

use rayon::prelude::*;

use crate::config::RunConfig;
use crate::report::BacktestReport;
use crate::runner::{run_backtest, RunError};
use barlab_core::domain::Bar;
use barlab_core::signal::SignalStream;

/// Parameter grid specification over the fixed risk rules.
#[derive(Debug, Clone)]
pub struct ParamGrid {
    /// Stop-loss fractions to test
    pub stop_fractions: Vec<f64>,

    /// Take-profit fractions to test
    pub take_fractions: Vec<f64>,

    /// Fee rates to test
    pub fee_rates: Vec<f64>,
}

impl ParamGrid {
    /// A small default grid around common risk settings.
    pub fn default_risk_grid() -> Self {
        Self {
            stop_fractions: vec![0.01, 0.02, 0.03, 0.05],
            take_fractions: vec![0.02, 0.05, 0.10],
            fee_rates: vec![0.0],
        }
    }

    /// Total number of configurations in this grid.
    pub fn size(&self) -> usize {
        self.stop_fractions.len() * self.take_fractions.len() * self.fee_rates.len()
    }

    /// All configurations in the grid, derived from a base config.
    pub fn generate_configs(&self, base: &RunConfig) -> Vec<RunConfig> {
        let mut configs = Vec::with_capacity(self.size());
        for &stop in &self.stop_fractions {
            for &take in &self.take_fractions {
                for &fee in &self.fee_rates {
                    let mut config = base.clone();
                    config.stop_fraction = stop;
                    config.take_fraction = take;
                    config.fee_rate = fee;
                    configs.push(config);
                }
            }
        }
        configs
    }
}

/// One grid cell's result.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub config: RunConfig,
    pub report: BacktestReport,
}

/// Results from a parameter sweep, sortable by outcome quality.
#[derive(Debug)]
pub struct SweepResults {
    results: Vec<SweepOutcome>,
}

impl SweepResults {
    fn new(results: Vec<SweepOutcome>) -> Self {
        Self { results }
    }

    pub fn all(&self) -> &[SweepOutcome] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results sorted by final equity, best first.
    pub fn sorted_by_final_equity(&self) -> Vec<&SweepOutcome> {
        let mut sorted: Vec<_> = self.results.iter().collect();
        sorted.sort_by(|a, b| {
            b.report
                .final_equity
                .partial_cmp(&a.report.final_equity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    pub fn best(&self) -> Option<&SweepOutcome> {
        self.sorted_by_final_equity().into_iter().next()
    }
}

/// Parameter sweep executor over one shared bar/signal dataset.
pub struct ParamSweep {
    parallel: bool,
}

impl Default for ParamSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamSweep {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every configuration in the grid against the same data.
    pub fn sweep(
        &self,
        bars: &[Bar],
        signals: &SignalStream,
        grid: &ParamGrid,
        base: &RunConfig,
    ) -> Result<SweepResults, RunError> {
        let configs = grid.generate_configs(base);

        let results: Vec<SweepOutcome> = if self.parallel {
            configs
                .par_iter()
                .map(|config| {
                    let outcome = run_backtest(bars, signals, config)?;
                    Ok(SweepOutcome {
                        config: config.clone(),
                        report: outcome.report,
                    })
                })
                .collect::<Result<Vec<_>, RunError>>()?
        } else {
            configs
                .iter()
                .map(|config| {
                    let outcome = run_backtest(bars, signals, config)?;
                    Ok(SweepOutcome {
                        config: config.clone(),
                        report: outcome.report,
                    })
                })
                .collect::<Result<Vec<_>, RunError>>()?
        };

        Ok(SweepResults::new(results))
    }
}
