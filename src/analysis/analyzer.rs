//! Opportunity analysis
//!
//! Compares an observed market price with the Black-Scholes fair value and
//! classifies the gap against a relative threshold band:
//!
//! - |deviation| <= threshold: HOLD (the band edge itself is a HOLD)
//! - market below fair value: BUY, profit = fair - market
//! - market above fair value: SELL, profit = market - fair
//!
//! Greeks are computed alongside for downstream risk sizing but never take
//! part in the decision.

use crate::core::error::ensure_positive;
use crate::core::{Action, EngineError, EngineResult, OptionParams, Recommendation};
use crate::models::black_scholes;

use super::AnalyzerConfig;

/// Decision step on its own: action, expected profit and deviation
///
/// # Errors
/// * `DegenerateMarket` if `theoretical` is not finite and positive
pub fn classify(market_price: f64, theoretical: f64, threshold: f64) -> EngineResult<(Action, f64, f64)> {
    if theoretical <= 0.0 || !theoretical.is_finite() {
        return Err(EngineError::DegenerateMarket { theoretical });
    }

    let deviation = (market_price - theoretical) / theoretical;

    let decision = if deviation.abs() > threshold {
        if market_price < theoretical {
            (Action::Buy, theoretical - market_price, deviation)
        } else {
            (Action::Sell, market_price - theoretical, deviation)
        }
    } else {
        (Action::Hold, 0.0, deviation)
    };
    Ok(decision)
}

/// Analyze one option quote
///
/// # Errors
/// * `Domain` if the market price, threshold or option parameters are invalid
/// * `DegenerateMarket` if the fair value is not positive, which would make
///   the relative deviation meaningless
pub fn analyze(market_price: f64, params: &OptionParams, threshold: f64) -> EngineResult<Recommendation> {
    ensure_positive("market_price", market_price)?;
    ensure_positive("threshold", threshold)?;

    let (theoretical, greeks) = black_scholes::price_and_greeks(params)?;
    let (action, expected_profit, deviation) = classify(market_price, theoretical, threshold)?;

    Ok(Recommendation {
        action,
        expected_profit,
        theoretical_price: theoretical,
        market_price,
        deviation,
        greeks,
    })
}

/// Analyzer bound to a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct OpportunityAnalyzer {
    config: AnalyzerConfig,
}

impl OpportunityAnalyzer {
    /// Create a new analyzer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: AnalyzerConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn analyze(&self, market_price: f64, params: &OptionParams) -> EngineResult<Recommendation> {
        analyze(market_price, params, self.config.threshold)
    }
}
