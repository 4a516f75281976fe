//! Simulation configuration and its validation.

use super::cost_model::CostModel;
use super::error::InputError;
use serde::{Deserialize, Serialize};

/// Configuration for a single simulation run.
///
/// `validate()` enforces the input contract; the engine calls it before
/// touching any bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub initial_capital: f64,
    /// Stop-loss distance as a fraction of entry price, in (0, 1).
    pub stop_fraction: f64,
    /// Take-profit distance as a fraction of entry price, positive.
    pub take_fraction: f64,
    pub fee_rate: f64,
    pub tax_rate: f64,
    /// When false, short signals never open positions (they still close longs).
    pub allow_short: bool,
}

impl SimConfig {
    /// Cost-free configuration with both directions enabled.
    pub fn new(initial_capital: f64, stop_fraction: f64, take_fraction: f64) -> Self {
        Self {
            initial_capital,
            stop_fraction,
            take_fraction,
            fee_rate: 0.0,
            tax_rate: 0.0,
            allow_short: true,
        }
    }

    pub fn with_costs(mut self, fee_rate: f64, tax_rate: f64) -> Self {
        self.fee_rate = fee_rate;
        self.tax_rate = tax_rate;
        self
    }

    pub fn long_only(mut self) -> Self {
        self.allow_short = false;
        self
    }

    pub fn cost_model(&self) -> CostModel {
        CostModel::new(self.fee_rate, self.tax_rate)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.initial_capital > 0.0) {
            return Err(InputError::NonPositiveCapital(self.initial_capital));
        }
        if !(self.stop_fraction > 0.0 && self.stop_fraction < 1.0) {
            return Err(InputError::StopFractionOutOfRange(self.stop_fraction));
        }
        if !(self.take_fraction > 0.0) {
            return Err(InputError::TakeFractionNotPositive(self.take_fraction));
        }
        if !(self.fee_rate >= 0.0) {
            return Err(InputError::NegativeFeeRate(self.fee_rate));
        }
        if !(self.tax_rate >= 0.0) {
            return Err(InputError::NegativeTaxRate(self.tax_rate));
        }
        Ok(())
    }
}
