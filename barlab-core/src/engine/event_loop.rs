//! Bar-by-bar event loop — the position state machine at the heart of the
//! engine.
//!
//! One pass over the bar/signal sequence, one transition evaluation per bar:
//!
//! 1. Exit checks for an open position, in fixed priority order:
//!    stop-loss (bar range), take-profit (bar range), opposing signal (close).
//! 2. Entry while flat, at the bar's close, committing all capital.
//! 3. One equity snapshot, mark-to-market when a position is open.
//!
//! A position that survives to the last bar is force-closed at that bar's
//! close, so every run ends fully realized.

use crate::domain::{Bar, EquitySnapshot, ExitReason, OpenPosition, Position, PositionSide, Trade};
use crate::fingerprint::RunFingerprint;
use crate::ledger::Ledger;
use crate::signal::{Signal, SignalStream};

use super::config::SimConfig;
use super::cost_model::{CostEvent, CostModel};
use super::error::{InputError, SimError};

use chrono::NaiveDateTime;

/// Everything a completed simulation run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub ledger: Ledger,
    /// Exactly one snapshot per input bar, in bar order.
    pub equity_curve: Vec<EquitySnapshot>,
    /// Fully realized account value after the last bar.
    pub final_equity: f64,
    pub bar_count: usize,
    /// Recoverable conditions folded into the run (signal warm-up gaps).
    pub warnings: Vec<String>,
    pub fingerprint: RunFingerprint,
}

/// Run one simulation over aligned bars and signals.
///
/// Validates the full input contract before the first step, then walks the
/// bars once. Deterministic: identical inputs produce identical results and
/// an identical fingerprint.
pub fn run_simulation(
    bars: &[Bar],
    signals: &SignalStream,
    config: &SimConfig,
) -> Result<RunResult, SimError> {
    config.validate()?;
    validate_bars(bars)?;
    if signals.len() != bars.len() {
        return Err(InputError::SignalLengthMismatch {
            bars: bars.len(),
            signals: signals.len(),
        }
        .into());
    }

    let fingerprint = RunFingerprint::compute(config, bars, signals);
    let costs = config.cost_model();

    let mut capital = config.initial_capital;
    let mut position = Position::Flat;
    let mut ledger = Ledger::new();
    let mut equity_curve = Vec::with_capacity(bars.len());

    let last = bars.len().saturating_sub(1);
    for (i, bar) in bars.iter().enumerate() {
        let signal = signals.get(i);
        let mut closed_this_bar = false;

        if let Position::Open(open) = &position {
            if let Some((exit_price, reason)) = exit_trigger(open, bar, signal) {
                let trade = close_trade(open, bar.timestamp, exit_price, reason, &costs);
                capital = settle(open, &trade, bar.timestamp)?;
                ledger.push(trade);
                position = Position::Flat;
                closed_this_bar = true;
            }
        }

        // One transition per bar: a bar that closed a position cannot also
        // open one. Entries are skipped on the final bar, which has no later
        // bar to close them on.
        if position.is_flat() && !closed_this_bar && i < last {
            if let Some(side) = entry_side(signal, config.allow_short) {
                position = Position::Open(open_position(side, bar, capital, config, &costs));
                capital = 0.0;
            }
        }

        let equity = match &position {
            Position::Flat => capital,
            Position::Open(open) => open.mark_to_market(bar.close),
        };
        equity_curve.push(EquitySnapshot {
            timestamp: bar.timestamp,
            equity,
        });
    }

    // Force-close anything still open at the end of data, and let the final
    // snapshot reflect the realized value.
    if let Position::Open(open) = &position {
        let bar = bars.last().expect("open position implies at least one bar");
        let trade = close_trade(open, bar.timestamp, bar.close, ExitReason::EndOfData, &costs);
        capital = settle(open, &trade, bar.timestamp)?;
        ledger.push(trade);
        if let Some(snap) = equity_curve.last_mut() {
            snap.equity = capital;
        }
    }

    let final_equity = equity_curve
        .last()
        .map(|s| s.equity)
        .unwrap_or(config.initial_capital);

    let mut warnings = Vec::new();
    if signals.gap_count() > 0 {
        warnings.push(format!(
            "{} bar(s) had undefined signals (warm-up); treated as flat",
            signals.gap_count()
        ));
    }

    Ok(RunResult {
        ledger,
        equity_curve,
        final_equity,
        bar_count: bars.len(),
        warnings,
        fingerprint,
    })
}

fn validate_bars(bars: &[Bar]) -> Result<(), InputError> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            return Err(InputError::InsaneBar { index: i });
        }
        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            return Err(InputError::NonMonotonicBars { index: i });
        }
    }
    Ok(())
}

fn entry_side(signal: Signal, allow_short: bool) -> Option<PositionSide> {
    match signal {
        Signal::Long => Some(PositionSide::Long),
        Signal::Short if allow_short => Some(PositionSide::Short),
        Signal::Short | Signal::Flat => None,
    }
}

fn open_position(
    side: PositionSide,
    bar: &Bar,
    capital: f64,
    config: &SimConfig,
    costs: &CostModel,
) -> OpenPosition {
    let entry_price = bar.close;
    let quantity = capital / entry_price;
    let (stop_price, take_price) = match side {
        PositionSide::Long => (
            entry_price * (1.0 - config.stop_fraction),
            entry_price * (1.0 + config.take_fraction),
        ),
        PositionSide::Short => (
            entry_price * (1.0 + config.stop_fraction),
            entry_price * (1.0 - config.take_fraction),
        ),
    };
    OpenPosition {
        side,
        entry_timestamp: bar.timestamp,
        entry_price,
        quantity,
        stop_price,
        take_price,
        entry_notional: capital,
        entry_cost: costs.charge(capital, CostEvent::Open),
    }
}

/// First matching exit wins; the fixed order resolves bars whose range spans
/// both protective levels in favor of the stop.
fn exit_trigger(open: &OpenPosition, bar: &Bar, signal: Signal) -> Option<(f64, ExitReason)> {
    match open.side {
        PositionSide::Long => {
            if bar.low <= open.stop_price {
                Some((open.stop_price, ExitReason::StopLoss))
            } else if bar.high >= open.take_price {
                Some((open.take_price, ExitReason::TakeProfit))
            } else if signal == Signal::Short {
                Some((bar.close, ExitReason::SignalReversal))
            } else {
                None
            }
        }
        PositionSide::Short => {
            if bar.high >= open.stop_price {
                Some((open.stop_price, ExitReason::StopLoss))
            } else if bar.low <= open.take_price {
                Some((open.take_price, ExitReason::TakeProfit))
            } else if signal == Signal::Long {
                Some((bar.close, ExitReason::SignalReversal))
            } else {
                None
            }
        }
    }
}

fn close_trade(
    open: &OpenPosition,
    exit_timestamp: NaiveDateTime,
    exit_price: f64,
    exit_reason: ExitReason,
    costs: &CostModel,
) -> Trade {
    let gross_pnl = open.unrealized_pnl(exit_price);
    let exit_notional = open.quantity * exit_price;
    let total_costs = open.entry_cost + costs.charge(exit_notional, CostEvent::Close);
    Trade {
        side: open.side,
        entry_timestamp: open.entry_timestamp,
        entry_price: open.entry_price,
        exit_timestamp,
        exit_price,
        exit_reason,
        quantity: open.quantity,
        gross_pnl,
        costs: total_costs,
        net_pnl: gross_pnl - total_costs,
    }
}

/// Cash realized from unwinding: the committed notional plus the trade's net
/// P&L. Fails if costs push the account below zero.
fn settle(open: &OpenPosition, trade: &Trade, timestamp: NaiveDateTime) -> Result<f64, SimError> {
    let capital = open.entry_notional + trade.net_pnl;
    if capital < 0.0 {
        return Err(SimError::CapitalExhausted {
            timestamp,
            side: open.side,
            entry_price: open.entry_price,
            capital,
        });
    }
    Ok(capital)
}
