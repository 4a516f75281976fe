//! Signal stream — per-bar directional instructions, aligned 1:1 with bars.
//!
//! Signals are produced externally (indicator pipelines, strategy code); the
//! engine only consumes them. The constructors here handle the messy parts of
//! that hand-off: numeric encodings, and indicator warm-up windows where the
//! signal is simply not defined yet.

use serde::{Deserialize, Serialize};

/// Directional instruction attached to one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Long,
    Short,
    Flat,
}

impl Signal {
    /// Decode the conventional numeric encoding: positive → Long,
    /// negative → Short, zero → Flat. NaN means "not defined yet" and has
    /// no signal value.
    pub fn from_value(value: f64) -> Option<Signal> {
        if value.is_nan() {
            None
        } else if value > 0.0 {
            Some(Signal::Long)
        } else if value < 0.0 {
            Some(Signal::Short)
        } else {
            Some(Signal::Flat)
        }
    }
}

/// An ordered signal sequence plus a count of warm-up gaps.
///
/// Gaps (bars whose raw signal was undefined) fold to `Flat` — the engine
/// treats them as "no instruction" — and the count surfaces as a run warning
/// rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalStream {
    signals: Vec<Signal>,
    gap_count: usize,
}

impl SignalStream {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self {
            signals,
            gap_count: 0,
        }
    }

    /// Build from a sparse sequence; `None` entries become `Flat` gaps.
    pub fn from_sparse(raw: &[Option<Signal>]) -> Self {
        let gap_count = raw.iter().filter(|s| s.is_none()).count();
        let signals = raw.iter().map(|s| s.unwrap_or(Signal::Flat)).collect();
        Self { signals, gap_count }
    }

    /// Build from the numeric encoding (see [`Signal::from_value`]).
    pub fn from_values(values: &[f64]) -> Self {
        let raw: Vec<Option<Signal>> = values.iter().map(|&v| Signal::from_value(v)).collect();
        Self::from_sparse(&raw)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn get(&self, index: usize) -> Signal {
        self.signals[index]
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Bars whose raw signal was undefined and folded to `Flat`.
    pub fn gap_count(&self) -> usize {
        self.gap_count
    }
}

/// Relative-strength reading on a 0–100 scale from pre-averaged gain and
/// loss magnitudes.
///
/// The naive ratio `avg_gain / avg_loss` is undefined when the window has no
/// losses. That case maps to maximum strength (100.0) when gains exist, and
/// to the neutral midpoint (50.0) when the window did not move at all.
pub fn strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss <= 0.0 {
        if avg_gain > 0.0 {
            100.0
        } else {
            50.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
