//! Price source abstraction

use std::collections::HashMap;

use crate::core::{EngineError, EngineResult};

/// Anything that can quote a current price for a symbol
pub trait PriceSource {
    fn current_price(&self, symbol: &str) -> EngineResult<f64>;
}

/// Fixed prices held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    prices: HashMap<String, f64>,
}

impl StaticPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, symbol: impl Into<String>, price: f64) -> Self {
        self.set(symbol, price);
        self
    }

    pub fn set(&mut self, symbol: impl Into<String>, price: f64) {
        self.prices.insert(symbol.into(), price);
    }
}

impl PriceSource for StaticPriceSource {
    fn current_price(&self, symbol: &str) -> EngineResult<f64> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| EngineError::data(format!("No price available for {}", symbol)))
    }
}
