//! Option Greeks
//!
//! First and second order sensitivities for a single option.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt, annualized
    pub theta: f64,
    /// Vega: dV/dσ, per unit of volatility
    pub vega: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
        }
    }

    /// Theta per calendar day
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }

    /// Vega per 1% volatility move
    pub fn vega_per_point(&self) -> f64 {
        self.vega / 100.0
    }

    /// Scale Greeks by a factor (e.g., for quantity or multiplier)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.theta.is_finite()
            && self.vega.is_finite()
    }
}
