//! Trade recommendation produced by the opportunity analyzer

use std::fmt;

use serde::{Deserialize, Serialize};

use super::greeks::Greeks;

/// Discrete trade action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of comparing a market price against the model's fair value
///
/// A report, not a tracked entity: it carries no identity and is never
/// updated after the analysis that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    /// Absolute price gap captured by the trade; zero for HOLD
    pub expected_profit: f64,
    pub theoretical_price: f64,
    pub market_price: f64,
    /// (market - theoretical) / theoretical
    pub deviation: f64,
    /// Risk context only, never part of the decision
    pub greeks: Greeks,
}

impl Recommendation {
    pub fn should_trade(&self) -> bool {
        self.action != Action::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::Buy.to_string(), "BUY");
        assert_eq!(Action::Sell.label(), "SELL");
        assert_eq!(serde_json::to_string(&Action::Hold).unwrap(), "\"HOLD\"");
    }

    #[test]
    fn test_should_trade() {
        let rec = Recommendation {
            action: Action::Hold,
            expected_profit: 0.0,
            theoretical_price: 10.0,
            market_price: 10.2,
            deviation: 0.02,
            greeks: Greeks::default(),
        };
        assert!(!rec.should_trade());
        assert!(Recommendation { action: Action::Buy, ..rec }.should_trade());
    }
}
