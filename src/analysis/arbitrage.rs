//! Two-venue arbitrage check
//!
//! Buy on venue A, sell on venue B when B trades richer than A by more than
//! a fixed absolute gap.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

/// Outcome of a cross-venue comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageSignal {
    pub found: bool,
    /// Gap per unit (B - A) when found, otherwise zero
    pub profit_per_unit: f64,
}

impl ArbitrageSignal {
    /// Profit for a given quantity
    pub fn profit_for(&self, quantity: f64) -> f64 {
        self.profit_per_unit * quantity
    }
}

/// Compare prices on two venues
///
/// An opportunity exists only when `price_b - price_a > threshold`.
pub fn detect_arbitrage(price_a: f64, price_b: f64, threshold: f64) -> EngineResult<ArbitrageSignal> {
    for (name, value) in [("price_a", price_a), ("price_b", price_b), ("threshold", threshold)] {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::invalid_input(format!(
                "{} must be finite and non-negative, got {}",
                name, value
            )));
        }
    }

    let gap = price_b - price_a;
    if gap > threshold {
        Ok(ArbitrageSignal {
            found: true,
            profit_per_unit: gap,
        })
    } else {
        Ok(ArbitrageSignal {
            found: false,
            profit_per_unit: 0.0,
        })
    }
}
