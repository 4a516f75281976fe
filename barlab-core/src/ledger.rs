//! Ledger — append-only trade log with summary queries.

use crate::domain::{PositionSide, Trade};
use serde::{Deserialize, Serialize};

/// Append-only collection of completed trades.
///
/// Trades are pushed by the engine as positions close and are never mutated
/// or removed afterward. Everything else here is read-only derivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    trades: Vec<Trade>,
}

/// Per-direction summary, mirroring the long/short breakdown of the
/// end-of-run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    pub count: usize,
    pub total_pnl: f64,
    pub win_rate: f64,
}

/// One flat row per trade for tabular export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub entry_timestamp: String,
    pub exit_timestamp: String,
    pub side: &'static str,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    pub gross_pnl: f64,
    pub costs: f64,
    pub net_pnl: f64,
    pub exit_reason: &'static str,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Sum of net P&L across all trades.
    pub fn total_pnl(&self) -> f64 {
        self.trades.iter().map(|t| t.net_pnl).sum()
    }

    /// Fraction of trades with positive net P&L. Zero when there are no
    /// trades, never a division by zero.
    pub fn win_rate(&self) -> f64 {
        if self.trades.is_empty() {
            return 0.0;
        }
        let winners = self.trades.iter().filter(|t| t.is_winner()).count();
        winners as f64 / self.trades.len() as f64
    }

    pub fn count_by_side(&self, side: PositionSide) -> usize {
        self.trades.iter().filter(|t| t.side == side).count()
    }

    /// Count / total P&L / win rate for one direction.
    pub fn side_summary(&self, side: PositionSide) -> SideSummary {
        let of_side: Vec<&Trade> = self.trades.iter().filter(|t| t.side == side).collect();
        let count = of_side.len();
        let total_pnl = of_side.iter().map(|t| t.net_pnl).sum();
        let win_rate = if count == 0 {
            0.0
        } else {
            of_side.iter().filter(|t| t.is_winner()).count() as f64 / count as f64
        };
        SideSummary {
            count,
            total_pnl,
            win_rate,
        }
    }

    /// Flat tabular form, one row per trade, for downstream export.
    pub fn rows(&self) -> Vec<TradeRow> {
        self.trades
            .iter()
            .map(|t| TradeRow {
                entry_timestamp: t.entry_timestamp.to_string(),
                exit_timestamp: t.exit_timestamp.to_string(),
                side: t.side.label(),
                entry_price: t.entry_price,
                exit_price: t.exit_price,
                quantity: t.quantity,
                gross_pnl: t.gross_pnl,
                costs: t.costs,
                net_pnl: t.net_pnl,
                exit_reason: t.exit_reason.label(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExitReason;
    use chrono::NaiveDate;

    fn make_trade(side: PositionSide, net_pnl: f64) -> Trade {
        let entry = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Trade {
            side,
            entry_timestamp: entry,
            entry_price: 100.0,
            exit_timestamp: entry + chrono::Duration::hours(5),
            exit_price: 100.0 + net_pnl / 50.0,
            exit_reason: ExitReason::SignalReversal,
            quantity: 50.0,
            gross_pnl: net_pnl,
            costs: 0.0,
            net_pnl,
        }
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.push(make_trade(PositionSide::Long, 500.0));
        ledger.push(make_trade(PositionSide::Long, -200.0));
        ledger.push(make_trade(PositionSide::Short, 300.0));
        ledger
    }

    #[test]
    fn total_pnl_sums_net() {
        assert!((sample_ledger().total_pnl() - 600.0).abs() < 1e-10);
    }

    #[test]
    fn win_rate_mixed() {
        assert!((sample_ledger().win_rate() - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn win_rate_empty_is_zero() {
        assert_eq!(Ledger::new().win_rate(), 0.0);
    }

    #[test]
    fn count_by_side() {
        let ledger = sample_ledger();
        assert_eq!(ledger.count_by_side(PositionSide::Long), 2);
        assert_eq!(ledger.count_by_side(PositionSide::Short), 1);
    }

    #[test]
    fn side_summary_breakdown() {
        let ledger = sample_ledger();
        let longs = ledger.side_summary(PositionSide::Long);
        assert_eq!(longs.count, 2);
        assert!((longs.total_pnl - 300.0).abs() < 1e-10);
        assert!((longs.win_rate - 0.5).abs() < 1e-10);

        let shorts = ledger.side_summary(PositionSide::Short);
        assert_eq!(shorts.count, 1);
        assert!((shorts.win_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn side_summary_empty_direction() {
        let mut ledger = Ledger::new();
        ledger.push(make_trade(PositionSide::Long, 100.0));
        let shorts = ledger.side_summary(PositionSide::Short);
        assert_eq!(shorts.count, 0);
        assert_eq!(shorts.win_rate, 0.0);
        assert_eq!(shorts.total_pnl, 0.0);
    }

    #[test]
    fn rows_flatten_every_trade() {
        let ledger = sample_ledger();
        let rows = ledger.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].side, "long");
        assert_eq!(rows[2].side, "short");
        assert_eq!(rows[0].exit_reason, "signal_reversal");
        assert!((rows[0].net_pnl - 500.0).abs() < 1e-10);
    }
}
