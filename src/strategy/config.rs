//! Configuration for the moving-average strategy

use serde::{Deserialize, Serialize};

use crate::core::error::ensure_positive;
use crate::core::{EngineError, EngineResult};

/// Moving-average band configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingAverageConfig {
    /// Number of most recent periods averaged
    /// Default: 5
    pub window: usize,

    /// Enter when price < MA * buy_threshold
    /// Default: 0.95 (5% below MA)
    pub buy_threshold: f64,

    /// Exit when price > MA * sell_threshold
    /// Default: 1.40 (40% above MA)
    pub sell_threshold: f64,

    /// Units per position
    /// Default: 1.0
    pub position_size: f64,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            window: 5,
            buy_threshold: 0.95,
            sell_threshold: 1.40,
            position_size: 1.0,
        }
    }
}

impl MovingAverageConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.window == 0 {
            return Err(EngineError::invalid_input("window must be at least 1"));
        }
        ensure_positive("buy_threshold", self.buy_threshold)?;
        ensure_positive("sell_threshold", self.sell_threshold)?;
        ensure_positive("position_size", self.position_size)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(MovingAverageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid() {
        let config = MovingAverageConfig {
            window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MovingAverageConfig {
            position_size: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field(), Some("position_size"));
    }
}
