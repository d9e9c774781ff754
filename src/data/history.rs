//! Historical price store
//!
//! Keeps timestamped prices per symbol and persists them as a single JSON
//! file. Queries return points newest first.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult, PricePoint};

/// Per-symbol price history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    symbols: BTreeMap<String, Vec<PricePoint>>,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; a missing file is an empty history
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let json = fs::read_to_string(path)?;
        let stored: PriceHistory = serde_json::from_str(&json)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;

        // Rebuild through insert: sorted, one point per timestamp (later entries win)
        let mut history = Self::new();
        for (symbol, points) in stored.symbols {
            for point in points {
                if !point.price.is_finite() || point.price <= 0.0 {
                    return Err(EngineError::data(format!(
                        "Invalid stored price for {} at {}: {}",
                        symbol, point.timestamp, point.price
                    )));
                }
                history.insert(&symbol, point.timestamp, point.price)?;
            }
        }

        tracing::info!("Loaded price history for {} symbols from {:?}", history.symbols.len(), path);
        Ok(history)
    }

    /// Save to a JSON file, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;
        fs::write(path, json)?;

        tracing::info!("Saved price history to {:?}", path);
        Ok(())
    }

    /// Insert or replace the point at `timestamp`
    pub fn insert(&mut self, symbol: &str, timestamp: DateTime<Utc>, price: f64) -> EngineResult<()> {
        if !price.is_finite() || price <= 0.0 {
            return Err(EngineError::invalid_input(format!(
                "price for {} must be positive, got {}",
                symbol, price
            )));
        }

        let points = self.symbols.entry(symbol.to_string()).or_default();
        match points.binary_search_by_key(&timestamp, |p| p.timestamp) {
            Ok(i) => points[i].price = price,
            Err(i) => points.insert(i, PricePoint::new(timestamp, price)),
        }
        Ok(())
    }

    /// Points at or after `since`, newest first
    pub fn recent(&self, symbol: &str, since: DateTime<Utc>) -> Vec<PricePoint> {
        self.symbols
            .get(symbol)
            .map(|points| {
                points
                    .iter()
                    .rev()
                    .take_while(|p| p.timestamp >= since)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Points from the last `weeks` weeks before `now`, newest first
    ///
    /// A span reaching past the representable calendar returns everything.
    pub fn weekly_window(&self, symbol: &str, weeks: usize, now: DateTime<Utc>) -> Vec<PricePoint> {
        let since = i64::try_from(weeks)
            .ok()
            .and_then(Duration::try_weeks)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.recent(symbol, since)
    }

    /// Most recent point
    pub fn latest(&self, symbol: &str) -> Option<PricePoint> {
        self.symbols.get(symbol).and_then(|p| p.last().copied())
    }

    pub fn len(&self, symbol: &str) -> usize {
        self.symbols.get(symbol).map_or(0, Vec::len)
    }

    pub fn symbols(&self) -> Vec<String> {
        self.symbols.keys().cloned().collect()
    }
}

/// History bound to a file path
pub struct HistoryFile {
    path: PathBuf,
    history: PriceHistory,
}

impl HistoryFile {
    pub fn open(path: impl Into<PathBuf>) -> EngineResult<Self> {
        let path = path.into();
        let history = PriceHistory::load(&path)?;
        Ok(Self { path, history })
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Record a price and persist immediately
    pub fn record(&mut self, symbol: &str, timestamp: DateTime<Utc>, price: f64) -> EngineResult<()> {
        self.history.insert(symbol, timestamp, price)?;
        self.history.save(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn week(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 16, 0, 0).unwrap() + Duration::weeks(n)
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut history = PriceHistory::new();
        for n in [2, 0, 3, 1] {
            history.insert("BTC", week(n), 100.0 + n as f64).unwrap();
        }

        let points = history.recent("BTC", week(1));
        let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![103.0, 102.0, 101.0]);
        assert_eq!(history.latest("BTC").unwrap().price, 103.0);
        assert!(history.recent("ETH", week(0)).is_empty());
    }

    #[test]
    fn test_insert_replaces_same_timestamp() {
        let mut history = PriceHistory::new();
        history.insert("BTC", week(0), 100.0).unwrap();
        history.insert("BTC", week(0), 105.0).unwrap();
        assert_eq!(history.len("BTC"), 1);
        assert_eq!(history.latest("BTC").unwrap().price, 105.0);
        assert!(history.insert("BTC", week(1), -1.0).is_err());
    }

    #[test]
    fn test_weekly_window() {
        let mut history = PriceHistory::new();
        for n in 0..10 {
            history.insert("AAPL", week(n), 150.0 + n as f64).unwrap();
        }
        let window = history.weekly_window("AAPL", 5, week(9));
        assert_eq!(window.len(), 6);
        assert_eq!(window[0].price, 159.0);
    }

    #[test]
    fn test_file_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("prices.json");

        let mut file = HistoryFile::open(&path).unwrap();
        assert!(file.history().symbols().is_empty());
        file.record("BTC", week(0), 42_000.0).unwrap();
        file.record("BTC", week(1), 43_000.0).unwrap();

        let loaded = PriceHistory::load(&path).unwrap();
        assert_eq!(loaded.symbols(), vec!["BTC".to_string()]);
        assert_eq!(loaded.len("BTC"), 2);
        assert_eq!(loaded.latest("BTC").unwrap().price, 43_000.0);
    }

    #[test]
    fn test_weekly_window_huge_span_returns_all() {
        let mut history = PriceHistory::new();
        for n in 0..3 {
            history.insert("AAPL", week(n), 150.0 + n as f64).unwrap();
        }
        assert_eq!(history.weekly_window("AAPL", usize::MAX, week(2)).len(), 3);
    }

    #[test]
    fn test_load_rejects_non_positive_prices() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("prices.json");
        let json = format!(
            r#"{{"symbols": {{"BTC": [
                {{"timestamp": "{}", "price": -100.0}},
                {{"timestamp": "{}", "price": 0.0}}
            ]}}}}"#,
            week(0).to_rfc3339(),
            week(1).to_rfc3339()
        );
        fs::write(&path, json).unwrap();

        assert!(matches!(PriceHistory::load(&path), Err(EngineError::Data(_))));
    }

    #[test]
    fn test_load_sorts_and_dedupes_timestamps() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("prices.json");
        let json = format!(
            r#"{{"symbols": {{"BTC": [
                {{"timestamp": "{w1}", "price": 110.0}},
                {{"timestamp": "{w0}", "price": 100.0}},
                {{"timestamp": "{w1}", "price": 120.0}}
            ]}}}}"#,
            w0 = week(0).to_rfc3339(),
            w1 = week(1).to_rfc3339()
        );
        fs::write(&path, json).unwrap();

        let loaded = PriceHistory::load(&path).unwrap();
        assert_eq!(loaded.len("BTC"), 2);
        assert_eq!(loaded.latest("BTC").unwrap().price, 120.0);
        let prices: Vec<f64> = loaded.recent("BTC", week(0)).iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![120.0, 100.0]);
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("prices.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(PriceHistory::load(&path), Err(EngineError::Serialization(_))));
    }
}
