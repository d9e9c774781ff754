//! Engine configuration
//!
//! One JSON document with a section per component. Every section has
//! defaults, so an empty object is a valid configuration.
//!
//! ```json
//! {
//!   "analyzer": { "threshold": 0.05 },
//!   "moving_average": { "window": 5, "buy_threshold": 0.95, "sell_threshold": 1.4 },
//!   "feed": { "base_url": "https://api.example.com/v1", "timeout_secs": 10 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerConfig;
use crate::core::{EngineError, EngineResult};
use crate::data::FeedConfig;
use crate::strategy::MovingAverageConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub analyzer: AnalyzerConfig,
    pub moving_average: MovingAverageConfig,
    pub feed: FeedConfig,
}

impl EngineConfig {
    /// Load and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.analyzer.validate()?;
        self.moving_average.validate()?;
        Ok(())
    }

    /// Pretty-printed default configuration
    pub fn template() -> String {
        serde_json::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}
