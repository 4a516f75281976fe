//! Cost model — fee and transaction-tax charges on position changes.
//!
//! The fee applies per side; the transaction tax is split evenly across the
//! round trip, so a full open/close cycle pays `2*fee + tax` on the traded
//! notional.

use serde::{Deserialize, Serialize};

/// Which side of a round trip a charge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostEvent {
    Open,
    Close,
}

/// Pure charge schedule for position-changing events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub fee_rate: f64,
    pub tax_rate: f64,
}

impl CostModel {
    pub fn new(fee_rate: f64, tax_rate: f64) -> Self {
        Self { fee_rate, tax_rate }
    }

    pub fn frictionless() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Charge for one position-changing event on the given notional.
    ///
    /// The schedule is symmetric: both sides pay the fee plus half the tax.
    pub fn charge(&self, notional: f64, event: CostEvent) -> f64 {
        match event {
            CostEvent::Open | CostEvent::Close => {
                notional * self.fee_rate + notional * self.tax_rate / 2.0
            }
        }
    }
}
