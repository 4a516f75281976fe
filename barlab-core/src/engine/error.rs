//! Engine error taxonomy.
//!
//! Precondition violations are `InputError` and are raised before the first
//! simulation step. `CapitalExhausted` is the one mid-run failure: a close
//! whose costs would leave the account below zero.

use crate::domain::PositionSide;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Fatal precondition violations, checked before any simulation step runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("bar {index} is not strictly after its predecessor")]
    NonMonotonicBars { index: usize },

    #[error("bar {index} violates the OHLC envelope")]
    InsaneBar { index: usize },

    #[error("signal stream has {signals} entries for {bars} bars")]
    SignalLengthMismatch { bars: usize, signals: usize },

    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),

    #[error("stop fraction must lie in (0, 1), got {0}")]
    StopFractionOutOfRange(f64),

    #[error("take fraction must be positive, got {0}")]
    TakeFractionNotPositive(f64),

    #[error("fee rate must be non-negative, got {0}")]
    NegativeFeeRate(f64),

    #[error("tax rate must be non-negative, got {0}")]
    NegativeTaxRate(f64),
}

/// Any failure a simulation run can end with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(
        "closing the {side} position entered at {entry_price} would leave \
         negative capital ({capital}) at {timestamp}"
    )]
    CapitalExhausted {
        timestamp: NaiveDateTime,
        side: PositionSide,
        entry_price: f64,
        capital: f64,
    },
}
