//! Underlying price data
//!
//! Spot quotes from a live source and timestamped points for history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest quote for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl SpotQuote {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            timestamp: Utc::now(),
        }
    }
}

/// One historical observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}
