//! Order execution
//!
//! The engine never places orders on its own. Strategy code hands orders to
//! an [`ExecutionVenue`]; [`PaperVenue`] fills them at the requested price
//! and keeps a log.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// A completed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl Fill {
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}

/// Destination for orders
pub trait ExecutionVenue {
    fn buy(&mut self, symbol: &str, quantity: f64, price: f64) -> EngineResult<Fill>;
    fn sell(&mut self, symbol: &str, quantity: f64, price: f64) -> EngineResult<Fill>;
}

/// Simulated venue filling every order in full at the given price
#[derive(Debug, Default)]
pub struct PaperVenue {
    fills: Vec<Fill>,
}

impl PaperVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    fn fill(&mut self, symbol: &str, side: Side, quantity: f64, price: f64) -> EngineResult<Fill> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(EngineError::execution(format!(
                "{} {}: quantity must be positive, got {}",
                side, symbol, quantity
            )));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(EngineError::execution(format!(
                "{} {}: price must be positive, got {}",
                side, symbol, price
            )));
        }

        let fill = Fill {
            symbol: symbol.to_string(),
            side,
            quantity,
            price,
            timestamp: Utc::now(),
        };
        tracing::info!("Executed {}: {} {} at {:.2}", side, quantity, symbol, price);
        self.fills.push(fill.clone());
        Ok(fill)
    }
}

impl ExecutionVenue for PaperVenue {
    fn buy(&mut self, symbol: &str, quantity: f64, price: f64) -> EngineResult<Fill> {
        self.fill(symbol, Side::Buy, quantity, price)
    }

    fn sell(&mut self, symbol: &str, quantity: f64, price: f64) -> EngineResult<Fill> {
        self.fill(symbol, Side::Sell, quantity, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_fills() {
        let mut venue = PaperVenue::new();
        let fill = venue.buy("BTC/USD", 2.0, 100.0).unwrap();
        assert_eq!(fill.side, Side::Buy);
        assert_eq!(fill.notional(), 200.0);

        venue.sell("BTC/USD", 2.0, 110.0).unwrap();
        assert_eq!(venue.fills().len(), 2);
        assert_eq!(venue.fills()[1].side, Side::Sell);
    }

    #[test]
    fn test_rejects_bad_orders() {
        let mut venue = PaperVenue::new();
        assert!(matches!(venue.buy("X", 0.0, 10.0), Err(EngineError::Execution(_))));
        assert!(matches!(venue.sell("X", 1.0, f64::NAN), Err(EngineError::Execution(_))));
        assert!(venue.fills().is_empty());
    }
}
