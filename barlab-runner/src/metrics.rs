//! Performance metrics — pure functions over the equity curve and trade log.
//!
//! Every metric is a pure function: equity values and/or trades in, numbers
//! out. No dependency on the engine or any I/O.

use barlab_core::domain::{EquitySnapshot, Trade};
use serde::{Deserialize, Serialize};

/// Drawdown analysis of one equity curve.
///
/// `running_peak` and `drawdown` are index-aligned with the input snapshots,
/// so charting layers can overlay them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityAnalysis {
    /// (final - initial) / initial.
    pub cumulative_return: f64,
    /// Prefix maximum of equity.
    pub running_peak: Vec<f64>,
    /// (equity - peak) / peak at each point; non-positive, zero at new highs.
    pub drawdown: Vec<f64>,
    /// Minimum of the drawdown series; zero for a never-declining curve.
    pub max_drawdown: f64,
}

impl EquityAnalysis {
    /// Single pass over the snapshot sequence.
    pub fn compute(curve: &[EquitySnapshot]) -> Self {
        let equity: Vec<f64> = curve.iter().map(|s| s.equity).collect();
        let running_peak = running_peak(&equity);
        let drawdown = drawdown_series(&equity, &running_peak);
        Self {
            cumulative_return: cumulative_return(&equity),
            max_drawdown: drawdown.iter().copied().fold(0.0_f64, f64::min),
            running_peak,
            drawdown,
        }
    }
}

/// Total return as a fraction: (final - initial) / initial.
///
/// Zero for empty or single-point curves and for a non-positive start.
pub fn cumulative_return(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let initial = equity[0];
    let final_eq = *equity.last().unwrap();
    if initial <= 0.0 {
        return 0.0;
    }
    (final_eq - initial) / initial
}

/// Prefix maximum of the equity curve.
pub fn running_peak(equity: &[f64]) -> Vec<f64> {
    let mut peak = f64::MIN;
    equity
        .iter()
        .map(|&eq| {
            if eq > peak {
                peak = eq;
            }
            peak
        })
        .collect()
}

/// Drawdown at each point relative to the aligned running peak.
pub fn drawdown_series(equity: &[f64], peaks: &[f64]) -> Vec<f64> {
    equity
        .iter()
        .zip(peaks)
        .map(|(&eq, &peak)| if peak > 0.0 { (eq - peak) / peak } else { 0.0 })
        .collect()
}

/// Maximum drawdown as a non-positive fraction (e.g., -0.15 = 15% decline).
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let peaks = running_peak(equity);
    drawdown_series(equity, &peaks)
        .into_iter()
        .fold(0.0_f64, f64::min)
}

/// Gross profits / gross losses. Capped at 100.0 when losses are zero but
/// profits exist; zero for an empty or all-losing log.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let gross_profit: f64 = trades
        .iter()
        .filter(|t| t.net_pnl > 0.0)
        .map(|t| t.net_pnl)
        .sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.net_pnl < 0.0)
        .map(|t| t.net_pnl.abs())
        .sum();

    if gross_loss < 1e-10 {
        return if gross_profit > 0.0 { 100.0 } else { 0.0 };
    }
    (gross_profit / gross_loss).min(100.0)
}
