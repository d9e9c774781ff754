//! Option contract parameters
//!
//! A European option described by the five Black-Scholes inputs plus its kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ensure_positive, EngineError, EngineResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Inputs for one Black-Scholes evaluation
///
/// Spot, strike, time to expiry and volatility must be finite and strictly
/// positive; the rate only has to be finite. Fields are public, so every
/// pricing function re-checks them through [`OptionParams::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParams {
    /// Current underlying price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub time_to_expiry: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Annualized volatility (σ)
    pub volatility: f64,
    /// Call or put
    pub option_type: OptionType,
}

impl OptionParams {
    /// Create validated parameters
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> EngineResult<Self> {
        let params = Self {
            spot,
            strike,
            time_to_expiry,
            rate,
            volatility,
            option_type,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn call(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> EngineResult<Self> {
        Self::new(spot, strike, time_to_expiry, rate, volatility, OptionType::Call)
    }

    pub fn put(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> EngineResult<Self> {
        Self::new(spot, strike, time_to_expiry, rate, volatility, OptionType::Put)
    }

    /// Check the invariants, reporting the first offending field
    pub fn validate(&self) -> EngineResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("time_to_expiry", self.time_to_expiry)?;
        ensure_positive("volatility", self.volatility)?;
        if !self.rate.is_finite() {
            return Err(EngineError::domain("rate", self.rate, "must be finite"));
        }
        Ok(())
    }

    /// Same contract with the other option kind
    pub fn with_type(&self, option_type: OptionType) -> Self {
        Self { option_type, ..*self }
    }

    /// Same contract at a different spot
    pub fn with_spot(&self, spot: f64) -> Self {
        Self { spot, ..*self }
    }

    /// Discount factor e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time_to_expiry).exp()
    }

    /// Intrinsic value at the current spot
    pub fn intrinsic(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }

    /// Log-moneyness: ln(S/K)
    pub fn log_moneyness(&self) -> f64 {
        (self.spot / self.strike).ln()
    }
}
