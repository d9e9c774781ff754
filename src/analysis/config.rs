//! Configuration for opportunity analysis

use serde::{Deserialize, Serialize};

use crate::core::error::ensure_positive;
use crate::core::EngineResult;

/// Configuration for the opportunity analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Relative deviation band around fair value
    /// |deviation| <= threshold means HOLD
    /// Default: 0.05 (5%)
    pub threshold: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { threshold: 0.05 }
    }
}

impl AnalyzerConfig {
    pub fn with_threshold(threshold: f64) -> EngineResult<Self> {
        let config = Self { threshold };
        config.validate()?;
        Ok(config)
    }

    /// Aggressive settings: narrow band, more trades
    pub fn aggressive() -> Self {
        Self { threshold: 0.02 }
    }

    /// Conservative settings: wide band, fewer trades
    pub fn conservative() -> Self {
        Self { threshold: 0.10 }
    }

    pub fn validate(&self) -> EngineResult<()> {
        ensure_positive("threshold", self.threshold)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_ordered() {
        assert!(AnalyzerConfig::aggressive().threshold < AnalyzerConfig::default().threshold);
        assert!(AnalyzerConfig::conservative().threshold > AnalyzerConfig::default().threshold);
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        assert!(AnalyzerConfig::with_threshold(0.0).unwrap_err().is_domain());
        assert!(AnalyzerConfig::with_threshold(-0.1).is_err());
        assert!(AnalyzerConfig::with_threshold(0.15).is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AnalyzerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }
}
