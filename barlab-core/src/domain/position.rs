//! Position — the mutable state of the simulation's single open slot.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an open position or completed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub fn label(&self) -> &'static str {
        match self {
            PositionSide::Long => "long",
            PositionSide::Short => "short",
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An open position with its entry context and protective levels.
///
/// Only exists inside `Position::Open`, so entry fields are never readable
/// while the simulation is flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub side: PositionSide,
    pub entry_timestamp: NaiveDateTime,
    pub entry_price: f64,
    /// Quantity of the underlying, always positive.
    pub quantity: f64,
    pub stop_price: f64,
    pub take_price: f64,
    /// Cash committed at entry (quantity * entry_price, up to rounding).
    pub entry_notional: f64,
    /// Open-event charge, settled together with the close-event charge.
    pub entry_cost: f64,
}

impl OpenPosition {
    /// Unrealized P&L at the given price, before costs.
    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        match self.side {
            PositionSide::Long => (price - self.entry_price) * self.quantity,
            PositionSide::Short => (self.entry_price - price) * self.quantity,
        }
    }

    /// Account value if the position were unwound at the given price, before costs.
    pub fn mark_to_market(&self, price: f64) -> f64 {
        match self.side {
            PositionSide::Long => self.quantity * price,
            PositionSide::Short => self.entry_notional + self.unrealized_pnl(price),
        }
    }
}

/// The one position slot a simulation run owns. No pyramiding, no hedging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Position {
    Flat,
    Open(OpenPosition),
}

impl Position {
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }

    pub fn side(&self) -> Option<PositionSide> {
        match self {
            Position::Flat => None,
            Position::Open(open) => Some(open.side),
        }
    }
}
