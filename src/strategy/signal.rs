//! Moving-average band signal
//!
//! Enter when the price drops below a fraction of the trailing average,
//! exit when it rises above a multiple of it. Both comparisons are strict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult, PricePoint};
use crate::data::{PriceHistory, PriceSource};

use super::MovingAverageConfig;

/// What the strategy wants to do this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Open a position
    Enter,
    /// Close the open position
    Exit,
    /// Nothing to do
    Hold,
}

/// Mean of the `window` most recent points
///
/// `history` must be ordered newest first, as returned by
/// [`PriceHistory::recent`](crate::data::PriceHistory::recent).
pub fn moving_average(history: &[PricePoint], window: usize) -> EngineResult<f64> {
    if window == 0 {
        return Err(EngineError::invalid_input("window must be at least 1"));
    }
    if history.len() < window {
        return Err(EngineError::InsufficientData {
            needed: window,
            available: history.len(),
        });
    }

    let sum: f64 = history.iter().take(window).map(|p| p.price).sum();
    Ok(sum / window as f64)
}

/// Weekly moving average from stored history, plus the live price
///
/// Averages the `weeks` newest points recorded in the last `weeks` weeks
/// before `now`, then asks `source` for the current price. Returns
/// `(moving_average, current_price)`.
pub fn weekly_ma(
    history: &PriceHistory,
    source: &dyn PriceSource,
    symbol: &str,
    weeks: usize,
    now: DateTime<Utc>,
) -> EngineResult<(f64, f64)> {
    let points = history.weekly_window(symbol, weeks, now);
    let ma = moving_average(&points, weeks)?;
    let current = source.current_price(symbol)?;

    tracing::info!("{} - MA: {:.2}, Current: {:.2}", symbol, ma, current);
    Ok((ma, current))
}

/// Threshold bands around a moving average
#[derive(Debug, Clone)]
pub struct MovingAverageSignal {
    config: MovingAverageConfig,
}

impl MovingAverageSignal {
    pub fn new(config: MovingAverageConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MovingAverageConfig {
        &self.config
    }

    /// Price below MA * buy_threshold
    pub fn check_buy(&self, price: f64, ma: f64) -> bool {
        let buy_price = ma * self.config.buy_threshold;
        let should_buy = price < buy_price;
        if should_buy {
            tracing::info!(
                "Buy signal: Price {:.2} < {:.2} ({:.2}% of MA {:.2})",
                price,
                buy_price,
                self.config.buy_threshold * 100.0,
                ma
            );
        }
        should_buy
    }

    /// Price above MA * sell_threshold
    pub fn check_sell(&self, price: f64, ma: f64) -> bool {
        let sell_price = ma * self.config.sell_threshold;
        let should_sell = price > sell_price;
        if should_sell {
            tracing::info!(
                "Sell signal: Price {:.2} > {:.2} ({:.2}% of MA {:.2})",
                price,
                sell_price,
                self.config.sell_threshold * 100.0,
                ma
            );
        }
        should_sell
    }

    /// Enter only when flat, exit only when holding
    pub fn evaluate(&self, price: f64, ma: f64, has_position: bool) -> Signal {
        if !has_position && self.check_buy(price, ma) {
            Signal::Enter
        } else if has_position && self.check_sell(price, ma) {
            Signal::Exit
        } else {
            Signal::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticPriceSource;
    use chrono::{Duration, TimeZone, Utc};

    fn history(prices: &[f64]) -> Vec<PricePoint> {
        let start = Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(start - Duration::weeks(i as i64), p))
            .collect()
    }

    #[test]
    fn test_moving_average_uses_newest_window() {
        let h = history(&[10.0, 20.0, 30.0, 40.0, 50.0, 1000.0]);
        assert!((moving_average(&h, 5).unwrap() - 30.0).abs() < 1e-12);
        assert!((moving_average(&h, 1).unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_insufficient_history() {
        let h = history(&[10.0, 20.0]);
        match moving_average(&h, 5) {
            Err(EngineError::InsufficientData { needed, available }) => {
                assert_eq!(needed, 5);
                assert_eq!(available, 2);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn test_weekly_ma_combines_history_and_live_price() {
        let now = Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap();
        let mut store = PriceHistory::new();
        for (i, price) in [100.0, 110.0, 120.0, 130.0, 140.0, 5000.0].iter().enumerate() {
            store.insert("AAPL", now - Duration::weeks(i as i64), *price).unwrap();
        }
        let source = StaticPriceSource::new().with_price("AAPL", 99.5);

        let (ma, current) = weekly_ma(&store, &source, "AAPL", 5, now).unwrap();
        assert!((ma - 120.0).abs() < 1e-12);
        assert_eq!(current, 99.5);
    }

    #[test]
    fn test_weekly_ma_errors() {
        let now = Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap();
        let mut store = PriceHistory::new();
        store.insert("AAPL", now, 100.0).unwrap();
        // Too old to fall inside the window
        store.insert("AAPL", now - Duration::weeks(20), 100.0).unwrap();
        let source = StaticPriceSource::new().with_price("AAPL", 100.0);

        assert!(matches!(
            weekly_ma(&store, &source, "AAPL", 2, now),
            Err(EngineError::InsufficientData { needed: 2, available: 1 })
        ));

        let empty = StaticPriceSource::new();
        assert!(matches!(
            weekly_ma(&store, &empty, "AAPL", 1, now),
            Err(EngineError::Data(_))
        ));
    }

    #[test]
    fn test_bands_are_strict() {
        let signal = MovingAverageSignal::new(MovingAverageConfig::default()).unwrap();

        assert!(signal.check_buy(94.0, 100.0));
        assert!(!signal.check_buy(95.0, 100.0));
        assert!(signal.check_sell(141.0, 100.0));
        assert!(!signal.check_sell(140.0, 100.0));
    }

    #[test]
    fn test_evaluate_respects_position_state() {
        let signal = MovingAverageSignal::new(MovingAverageConfig::default()).unwrap();

        assert_eq!(signal.evaluate(90.0, 100.0, false), Signal::Enter);
        assert_eq!(signal.evaluate(90.0, 100.0, true), Signal::Hold);
        assert_eq!(signal.evaluate(150.0, 100.0, true), Signal::Exit);
        assert_eq!(signal.evaluate(150.0, 100.0, false), Signal::Hold);
        assert_eq!(signal.evaluate(100.0, 100.0, false), Signal::Hold);
    }
}
